use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::trace;

use super::bracket_host;
use super::object_name::ObjectName;
use super::session::JmxSession;
use super::types::{AttributeInfo, MBeanValue};

/// Generic сессия к управляемой JVM через её HTTP management бридж.
///
/// Одна сессия обслуживает один батч ключей и закрывается безусловно.
pub struct GenericSession {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl GenericSession {
    /// Открывает сессию: собирает клиент и проверяет бридж пробным
    /// запросом, чтобы ошибка подключения всплыла до обработки ключей.
    pub async fn connect(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = format!("http://{}:{}/jolokia", bracket_host(host), port);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Не удалось собрать HTTP клиент")?;

        let session = Self {
            http,
            base_url,
            credentials,
        };

        session
            .execute(json!({ "type": "version" }))
            .await
            .context("Не удалось открыть JMX сессию")?;

        Ok(session)
    }

    /// Выполняет один запрос к бриджу и разворачивает его конверт.
    async fn execute(&self, body: serde_json::Value) -> Result<serde_json::Value> {
        let mut request = self.http.post(&self.base_url).json(&body);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .context("Запрос к JMX бриджу не удался")?
            .error_for_status()
            .context("JMX бридж ответил ошибкой")?;

        let envelope: serde_json::Value = response
            .json()
            .await
            .context("Невалидный JSON в ответе бриджа")?;

        let status = envelope.get("status").and_then(|s| s.as_i64()).unwrap_or(0);
        if status != 200 {
            let message = envelope
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("unknown bridge error");
            anyhow::bail!("Ошибка бриджа (status {}): {}", status, message);
        }

        Ok(envelope
            .get("value")
            .cloned()
            .unwrap_or(serde_json::Value::Null))
    }

    /// Закрывает сессию. Бридж не держит состояния, так что закрытие
    /// идемпотентно и никогда не падает.
    pub async fn close(&self) {
        trace!("закрываем JMX сессию {}", self.base_url);
    }
}

#[async_trait]
impl JmxSession for GenericSession {
    async fn get_attribute(&self, object: &ObjectName, attribute: &str) -> Result<MBeanValue> {
        let value = self
            .execute(json!({
                "type": "read",
                "mbean": object.to_string(),
                "attribute": attribute,
            }))
            .await?;

        Ok(MBeanValue::from_json(value))
    }

    async fn query_objects(&self, filter: Option<&str>) -> Result<Vec<ObjectName>> {
        let value = self
            .execute(json!({
                "type": "search",
                "mbean": filter.unwrap_or("*:*"),
            }))
            .await?;

        let names = value
            .as_array()
            .context("Ответ search не является списком")?;

        names
            .iter()
            .map(|n| {
                let raw = n.as_str().context("Имя объекта не строка")?;
                ObjectName::parse(raw)
            })
            .collect()
    }

    async fn list_attributes(&self, object: &ObjectName) -> Result<Vec<AttributeInfo>> {
        let value = self
            .execute(json!({
                "type": "list",
                "mbean": object.to_string(),
            }))
            .await?;

        let attrs = match value.get("attr").and_then(|a| a.as_object()) {
            Some(attrs) => attrs,
            // Объект без атрибутов — пустой список, не ошибка
            None => return Ok(Vec::new()),
        };

        let infos = attrs
            .iter()
            .map(|(name, info)| AttributeInfo {
                name: name.clone(),
                description: info
                    .get("desc")
                    .and_then(|d| d.as_str())
                    .unwrap_or(name)
                    .to_string(),
                readable: info
                    .get("readable")
                    .and_then(|r| r.as_bool())
                    .unwrap_or(true),
            })
            .collect();

        Ok(infos)
    }
}
