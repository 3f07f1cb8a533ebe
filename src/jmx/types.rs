use serde::Deserialize;
use std::collections::HashMap;

/// Примитивное значение атрибута — то, что можно отдать монолиту как текст.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Числа, не влезающие в i64/f64 (аналог BigInteger/BigDecimal)
    Decimal(String),
    Date(String),
    /// Имя объекта как строка
    ObjectName(String),
}

impl Primitive {
    /// Имя типа для discovery записей
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Bool(_) => "Boolean",
            Primitive::Int(_) => "Integer",
            Primitive::Float(_) => "Float",
            Primitive::Text(_) => "String",
            Primitive::Decimal(_) => "Decimal",
            Primitive::Date(_) => "Date",
            Primitive::ObjectName(_) => "ObjectName",
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Bool(v) => write!(f, "{}", v),
            Primitive::Int(v) => write!(f, "{}", v),
            Primitive::Float(v) => write!(f, "{}", v),
            Primitive::Text(v) => f.write_str(v),
            Primitive::Decimal(v) => f.write_str(v),
            Primitive::Date(v) => f.write_str(v),
            Primitive::ObjectName(v) => f.write_str(v),
        }
    }
}

/// Значение MBean атрибута, каким его вернул удалённый процесс.
///
/// Composite хранит поля в порядке получения — discovery обходит их в том
/// же порядке. Unsupported (таблицы, массивы и любые незнакомые формы) —
/// терминальная ветка: внутрь не спускаемся никогда.
#[derive(Debug, Clone, PartialEq)]
pub enum MBeanValue {
    Null,
    Primitive(Primitive),
    Composite(Vec<(String, MBeanValue)>),
    Unsupported(&'static str),
}

impl MBeanValue {
    /// Конвертирует JSON ответа бриджа в модель значений.
    pub fn from_json(value: serde_json::Value) -> MBeanValue {
        match value {
            serde_json::Value::Null => MBeanValue::Null,
            serde_json::Value::Bool(b) => MBeanValue::Primitive(Primitive::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    MBeanValue::Primitive(Primitive::Int(i))
                } else if let Some(f) = n.as_f64() {
                    MBeanValue::Primitive(Primitive::Float(f))
                } else {
                    // u64 за пределами i64
                    MBeanValue::Primitive(Primitive::Decimal(n.to_string()))
                }
            }
            serde_json::Value::String(s) => MBeanValue::Primitive(Primitive::Text(s)),
            serde_json::Value::Array(_) => MBeanValue::Unsupported("array"),
            serde_json::Value::Object(map) => {
                // Бридж сериализует javax.management.ObjectName как {"objectName": "..."}
                if map.len() == 1 {
                    if let Some(serde_json::Value::String(s)) = map.get("objectName") {
                        return MBeanValue::Primitive(Primitive::ObjectName(s.clone()));
                    }
                }
                let fields = map
                    .into_iter()
                    .map(|(k, v)| (k, MBeanValue::from_json(v)))
                    .collect();
                MBeanValue::Composite(fields)
            }
        }
    }

    /// Поле composite значения по имени.
    pub fn field(&self, name: &str) -> Option<&MBeanValue> {
        match self {
            MBeanValue::Composite(fields) => fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Метка типа для сообщений об ошибках и discovery записей.
    pub fn type_label(&self) -> &'static str {
        match self {
            MBeanValue::Null => "null",
            MBeanValue::Primitive(p) => p.type_name(),
            MBeanValue::Composite(_) => "composite",
            MBeanValue::Unsupported(label) => label,
        }
    }
}

/// Описание атрибута, полученное при discovery.
#[derive(Debug, Clone)]
pub struct AttributeInfo {
    pub name: String,
    pub description: String,
    pub readable: bool,
}

/// Пара current/highWaterMark — единственная числовая форма vendor статистики.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RangeStatistic {
    pub current: i64,
    #[serde(rename = "highWaterMark")]
    pub high_water_mark: i64,
}

/// Узел дерева vendor статистики (WSStats в терминах admin клиента).
#[derive(Debug, Clone, Deserialize)]
pub struct StatsNode {
    pub name: String,
    #[serde(default)]
    pub statistics: HashMap<String, RangeStatistic>,
    #[serde(default, rename = "subStats")]
    pub sub_stats: Vec<StatsNode>,
}

impl StatsNode {
    /// Статистика узла по имени атрибута.
    pub fn statistic(&self, name: &str) -> Option<RangeStatistic> {
        self.statistics.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_scalars_become_primitives() {
        assert_eq!(
            MBeanValue::from_json(json!(true)),
            MBeanValue::Primitive(Primitive::Bool(true))
        );
        assert_eq!(
            MBeanValue::from_json(json!(42)),
            MBeanValue::Primitive(Primitive::Int(42))
        );
        assert_eq!(
            MBeanValue::from_json(json!(1.5)),
            MBeanValue::Primitive(Primitive::Float(1.5))
        );
        assert_eq!(
            MBeanValue::from_json(json!("up")),
            MBeanValue::Primitive(Primitive::Text("up".into()))
        );
        assert_eq!(MBeanValue::from_json(json!(null)), MBeanValue::Null);
    }

    #[test]
    fn wide_unsigned_falls_back_to_decimal() {
        let v = MBeanValue::from_json(json!(u64::MAX));
        assert_eq!(
            v,
            MBeanValue::Primitive(Primitive::Decimal(u64::MAX.to_string()))
        );
    }

    #[test]
    fn json_object_becomes_ordered_composite() {
        let v = MBeanValue::from_json(json!({"used": 10, "max": 20}));
        match &v {
            MBeanValue::Composite(fields) => {
                let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["used", "max"]);
            }
            other => panic!("ожидали composite, получили {:?}", other),
        }
        assert_eq!(v.field("max"), Some(&MBeanValue::Primitive(Primitive::Int(20))));
        assert_eq!(v.field("missing"), None);
    }

    #[test]
    fn json_array_is_unsupported() {
        let v = MBeanValue::from_json(json!([1, 2, 3]));
        assert_eq!(v, MBeanValue::Unsupported("array"));
        assert_eq!(v.type_label(), "array");
    }

    #[test]
    fn object_name_wrapper_is_primitive() {
        let v = MBeanValue::from_json(json!({"objectName": "java.lang:type=Memory"}));
        assert_eq!(
            v,
            MBeanValue::Primitive(Primitive::ObjectName("java.lang:type=Memory".into()))
        );
    }

    #[test]
    fn primitive_textual_form() {
        assert_eq!(Primitive::Int(42).to_string(), "42");
        assert_eq!(Primitive::Bool(false).to_string(), "false");
        assert_eq!(Primitive::Text("ok".into()).to_string(), "ok");
    }

    #[test]
    fn stats_node_deserializes_bridge_shape() {
        let node: StatsNode = serde_json::from_value(json!({
            "name": "jdbc/app",
            "statistics": {
                "PoolSize": {"current": 5, "highWaterMark": 12}
            },
            "subStats": []
        }))
        .unwrap();

        let stat = node.statistic("PoolSize").unwrap();
        assert_eq!(stat.current, 5);
        assert_eq!(stat.high_water_mark, 12);
        assert!(node.statistic("FreePoolSize").is_none());
    }
}
