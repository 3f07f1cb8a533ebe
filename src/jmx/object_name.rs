use anyhow::Result;

/// Имя управляемого объекта вида `Domain:key=value,key2=value2`.
///
/// Держим исходную строку как есть (в ней может быть шаблонная `*`),
/// плюс разобранные key-properties для vendor запросов (process, node,
/// type, name). Сравнивается по значению.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    raw: String,
    domain: String,
    properties: Vec<(String, String)>,
}

impl ObjectName {
    /// Парсит строку имени объекта. Имя без двоеточия считаем доменом
    /// без свойств, токен `*` в списке свойств пропускаем (шаблон).
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            anyhow::bail!("Пустое имя объекта");
        }

        let mut properties = Vec::new();
        let domain = match raw.split_once(':') {
            Some((domain, rest)) => {
                for token in rest.split(',') {
                    let token = token.trim();
                    if token == "*" || token.is_empty() {
                        continue;
                    }
                    match token.split_once('=') {
                        Some((k, v)) => properties.push((k.to_string(), v.to_string())),
                        None => anyhow::bail!("Невалидное имя объекта: '{}'", raw),
                    }
                }
                domain.to_string()
            }
            None => raw.to_string(),
        };

        Ok(Self {
            raw: raw.to_string(),
            domain,
            properties,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Значение key-property по имени ключа.
    pub fn key_property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
