use tracing::trace;

use super::error::CheckError;
use crate::jmx::{path, MBeanValue};

/// Рекурсивно спускается по composite значению и достаёт примитив.
///
/// `fields` — оставшийся путь в сыром (экранированном) виде; пустая
/// строка означает "само значение". Голова пути отрезается и
/// разэкранируется на каждом шаге.
pub fn drill(value: &MBeanValue, fields: &str) -> Result<String, CheckError> {
    trace!("спускаемся по полям '{}'", fields);

    if let MBeanValue::Null = value {
        return Err(CheckError::NullAttribute);
    }

    // Сначала проверка исчерпания пути, потом проверка типа
    if fields.is_empty() {
        return match value {
            MBeanValue::Primitive(p) => Ok(p.to_string()),
            other => Err(CheckError::NotPrimitive(other.type_label())),
        };
    }

    match value {
        MBeanValue::Composite(_) => {
            let (head, tail) = path::split(fields);
            let field = path::unescape(head);

            match value.field(&field) {
                Some(inner) => drill(inner, tail),
                None => Err(CheckError::FieldNotFound(field)),
            }
        }
        MBeanValue::Primitive(p) => Err(CheckError::NotPrimitive(p.type_name())),
        MBeanValue::Unsupported(label) => Err(CheckError::UnsupportedContainer(label)),
        // Null отсечён на входе
        MBeanValue::Null => unreachable!(),
    }
}
