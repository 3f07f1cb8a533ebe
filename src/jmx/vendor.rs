use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::trace;

use super::bracket_host;
use super::object_name::ObjectName;
use super::session::VendorSession;
use super::types::StatsNode;
use crate::config::VendorSettings;

/// Имя модуля статистики пулов соединений в дереве PMI
const JDBC_POOL_MODULE: &str = "connectionPoolModule";

/// Vendor admin подключение к серверу приложений.
///
/// Инкапсулирует материал безопасности (trust/key store) и invoke-вызовы
/// admin сервиса, через которые достаётся дерево PMI статистики.
pub struct VendorClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl VendorClient {
    pub async fn connect(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        security: &VendorSettings,
        timeout: Duration,
    ) -> Result<Self> {
        let scheme = if security.security_enabled {
            "https"
        } else {
            "http"
        };

        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(path) = security.get_key_store() {
            if security.store_type != "PKCS12" {
                anyhow::bail!("Неподдерживаемый тип key store: {}", security.store_type);
            }
            let bytes = std::fs::read(&path)
                .context(format!("Не удалось прочитать key store: {}", path))?;
            let identity =
                reqwest::Identity::from_pkcs12_der(&bytes, &security.key_store_password)
                    .context("Не удалось загрузить key store")?;
            builder = builder.identity(identity);
        }

        if let Some(path) = security.get_trust_store() {
            let bytes = std::fs::read(&path)
                .context(format!("Не удалось прочитать trust store: {}", path))?;
            let certificate = reqwest::Certificate::from_pem(&bytes)
                .context("Не удалось загрузить trust store")?;
            builder = builder.add_root_certificate(certificate);
        }

        let http = builder.build().context("Не удалось собрать HTTP клиент")?;

        let client = Self {
            http,
            base_url: format!("{}://{}:{}/admin", scheme, bracket_host(host), port),
            credentials,
        };

        // Пробный запрос: ошибка admin подключения должна всплыть здесь
        client
            .post("ping", json!({}))
            .await
            .context("Admin сервис недоступен")?;

        Ok(client)
    }

    async fn post(&self, operation_path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.base_url, operation_path);

        let mut request = self.http.post(&url).json(&body);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .context("Запрос к admin сервису не удался")?
            .error_for_status()
            .context("Admin сервис ответил ошибкой")?;

        response
            .json()
            .await
            .context("Невалидный JSON в ответе admin сервиса")
    }

    /// Generic RPC вызов операции MBean через admin сервис.
    pub async fn invoke(
        &self,
        mbean: &ObjectName,
        operation: &str,
        params: serde_json::Value,
        signature: serde_json::Value,
    ) -> Result<serde_json::Value> {
        trace!("invoke {} на '{}'", operation, mbean);

        self.post(
            "invoke",
            json!({
                "mbean": mbean.to_string(),
                "operation": operation,
                "params": params,
                "signature": signature,
            }),
        )
        .await
    }
}

#[async_trait]
impl VendorSession for VendorClient {
    async fn query_names(&self, pattern: &str) -> Result<Vec<ObjectName>> {
        let value = self.post("queryNames", json!({ "pattern": pattern })).await?;

        let names = value
            .as_array()
            .context("Ответ queryNames не является списком")?;

        names
            .iter()
            .map(|n| {
                let raw = n.as_str().context("Имя объекта не строка")?;
                ObjectName::parse(raw)
            })
            .collect()
    }

    async fn stats_object(
        &self,
        perf: &ObjectName,
        target: &ObjectName,
    ) -> Result<Option<StatsNode>> {
        let value = self
            .invoke(
                perf,
                "getStatsObject",
                json!([target.to_string(), true]),
                json!(["javax.management.ObjectName", "java.lang.Boolean"]),
            )
            .await?;

        if value.is_null() {
            return Ok(None);
        }

        let stats: StatsNode =
            serde_json::from_value(value).context("Невалидное дерево статистики")?;
        Ok(Some(stats))
    }

    async fn stats_array(&self, perf: &ObjectName, driver: &str) -> Result<Vec<StatsNode>> {
        let value = self
            .invoke(
                perf,
                "getStatsArray",
                json!([[[JDBC_POOL_MODULE, driver]], true]),
                json!([
                    "[Lcom.ibm.websphere.pmi.stat.StatDescriptor;",
                    "java.lang.Boolean"
                ]),
            )
            .await?;

        if value.is_null() {
            return Ok(Vec::new());
        }

        serde_json::from_value(value).context("Невалидный массив статистики")
    }
}
