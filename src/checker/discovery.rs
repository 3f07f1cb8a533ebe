use anyhow::Result;
use serde::Serialize;
use tracing::trace;

use crate::jmx::{JmxSession, MBeanValue, ObjectName};

/// Одна найденная метрика: лист composite дерева одного атрибута.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub description: String,
    pub object: String,
    pub attribute: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

/// Конверт discovery ответа — список записей под одним тегом data
#[derive(Debug, Serialize)]
pub struct DiscoveryPayload {
    pub data: Vec<Record>,
}

/// Обходит все объекты и читаемые атрибуты сессии и раскладывает их
/// значения в плоские записи.
///
/// Ошибка чтения одного атрибута не валит обход: пишем trace и идём
/// дальше. Порядок записей — порядок перечисления объектов, атрибутов и
/// полей; никакой сортировки.
pub async fn walk<S: JmxSession + ?Sized>(session: &S) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for object in session.query_objects(None).await? {
        trace!("обнаружен объект '{}'", object);

        for attr in session.list_attributes(&object).await? {
            trace!("обнаружен атрибут '{}'", attr.name);

            if !attr.readable {
                trace!("атрибут нечитаемый, пропускаем");
                continue;
            }

            let value = match session.get_attribute(&object, &attr.name).await {
                Ok(value) => value,
                Err(e) => {
                    trace!("обработка '{},{}' не удалась: {:#}", object, attr.name, e);
                    continue;
                }
            };

            // Описание, совпадающее с именем атрибута, бридж подставляет
            // сам — считаем, что описания нет
            let description = if attr.description.is_empty() || attr.description == attr.name {
                None
            } else {
                Some(attr.description.as_str())
            };

            flatten(&mut records, &object, description, &attr.name, &value);
        }
    }

    Ok(records)
}

/// Рекурсивно раскладывает значение атрибута в записи.
///
/// Имена полей НЕ экранируются при дописывании к пути — discovery пути
/// информационные, обратно через кодек они не обязаны проходить.
fn flatten(
    records: &mut Vec<Record>,
    object: &ObjectName,
    description: Option<&str>,
    attr_path: &str,
    value: &MBeanValue,
) {
    trace!("спускаемся по пути атрибута '{}'", attr_path);

    match value {
        MBeanValue::Primitive(p) => {
            records.push(Record {
                description: description
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{},{}", object, attr_path)),
                object: object.to_string(),
                attribute: attr_path.to_string(),
                value_type: p.type_name().to_string(),
                value: p.to_string(),
            });
        }
        MBeanValue::Composite(fields) => {
            for (name, inner) in fields {
                flatten(
                    records,
                    object,
                    description,
                    &format!("{}.{}", attr_path, name),
                    inner,
                );
            }
        }
        // Таблицы, массивы, null и незнакомые формы — терминальны и не
        // считаются ошибкой
        MBeanValue::Null | MBeanValue::Unsupported(_) => {
            trace!("атрибут неподдерживаемого типа: {}", value.type_label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jmx::{AttributeInfo, Primitive};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct FakeSession {
        objects: Vec<ObjectName>,
        attributes: Vec<AttributeInfo>,
        values: HashMap<String, MBeanValue>,
    }

    #[async_trait]
    impl JmxSession for FakeSession {
        async fn get_attribute(
            &self,
            _object: &ObjectName,
            attribute: &str,
        ) -> Result<MBeanValue> {
            self.values
                .get(attribute)
                .cloned()
                .ok_or_else(|| anyhow!("чтение '{}' не удалось", attribute))
        }

        async fn query_objects(&self, _filter: Option<&str>) -> Result<Vec<ObjectName>> {
            Ok(self.objects.clone())
        }

        async fn list_attributes(&self, _object: &ObjectName) -> Result<Vec<AttributeInfo>> {
            Ok(self.attributes.clone())
        }
    }

    fn attr(name: &str, description: &str) -> AttributeInfo {
        AttributeInfo {
            name: name.to_string(),
            description: description.to_string(),
            readable: true,
        }
    }

    fn object(raw: &str) -> ObjectName {
        ObjectName::parse(raw).unwrap()
    }

    fn int(v: i64) -> MBeanValue {
        MBeanValue::Primitive(Primitive::Int(v))
    }

    #[tokio::test]
    async fn composite_flattens_into_leaf_records() {
        let session = FakeSession {
            objects: vec![object("app:type=O")],
            attributes: vec![attr("attr", "attr")],
            values: HashMap::from([(
                "attr".to_string(),
                MBeanValue::Composite(vec![
                    ("a".to_string(), int(1)),
                    (
                        "b".to_string(),
                        MBeanValue::Composite(vec![("c".to_string(), int(2))]),
                    ),
                ]),
            )]),
        };

        let records = walk(&session).await.unwrap();
        let paths: Vec<&str> = records.iter().map(|r| r.attribute.as_str()).collect();
        assert_eq!(paths, vec!["attr.a", "attr.b.c"]);
        assert_eq!(records[0].value, "1");
        assert_eq!(records[1].value, "2");
        assert_eq!(records[0].value_type, "Integer");
        // Описание совпадало с именем — синтезируем "<объект>,<путь>"
        assert_eq!(records[0].description, "app:type=O,attr.a");
    }

    #[tokio::test]
    async fn real_description_is_kept() {
        let session = FakeSession {
            objects: vec![object("app:type=O")],
            attributes: vec![attr("attr", "Размер кучи")],
            values: HashMap::from([("attr".to_string(), int(9))]),
        };

        let records = walk(&session).await.unwrap();
        assert_eq!(records[0].description, "Размер кучи");
    }

    #[tokio::test]
    async fn unsupported_value_emits_nothing() {
        let session = FakeSession {
            objects: vec![object("app:type=O")],
            attributes: vec![attr("attr", "attr")],
            values: HashMap::from([("attr".to_string(), MBeanValue::Unsupported("tabular"))]),
        };

        assert_eq!(walk(&session).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn failing_attribute_does_not_suppress_siblings() {
        let session = FakeSession {
            objects: vec![object("app:type=O")],
            // у "broken" нет значения в values — чтение упадёт
            attributes: vec![attr("broken", "broken"), attr("ok", "ok")],
            values: HashMap::from([("ok".to_string(), int(3))]),
        };

        let records = walk(&session).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attribute, "ok");
    }

    #[tokio::test]
    async fn unreadable_attribute_is_skipped() {
        let mut unreadable = attr("secret", "secret");
        unreadable.readable = false;

        let session = FakeSession {
            objects: vec![object("app:type=O")],
            attributes: vec![unreadable],
            values: HashMap::from([("secret".to_string(), int(1))]),
        };

        assert_eq!(walk(&session).await.unwrap(), vec![]);
    }
}
