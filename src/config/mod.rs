use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub mod settings;

pub use settings::{ConnectionSettings, ServerSettings, Settings, VendorSettings};

/// Главная конфигурация приложения
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Настройки HTTP сервера
    #[serde(default)]
    pub server: ServerSettings,
    /// Настройки чекера
    #[serde(default)]
    pub settings: Settings,
}

impl AppConfig {
    /// Загружает конфигурацию из YAML файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Не удалось прочитать файл: {}", path.display()))?;

        let config: AppConfig =
            serde_yml::from_str(&content).context("Не удалось распарсить YAML")?;

        Ok(config)
    }

    /// Адрес из переменной окружения или из конфига
    pub fn get_listen(&self) -> String {
        env::var("JMX_GATEWAY_LISTEN").unwrap_or_else(|_| self.server.listen.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_profile_yaml() {
        let config: AppConfig = serde_yml::from_str(
            r#"
server:
  listen: "127.0.0.1:10052"
settings:
  connection:
    timeout: 5
  vendor:
    security_enabled: false
    store_type: "PKCS12"
    trust_store: null
    key_store: null
    trust_store_password: "WebAS"
    key_store_password: "WebAS"
"#,
        )
        .unwrap();

        assert_eq!(config.server.listen, "127.0.0.1:10052");
        assert_eq!(config.settings.connection.timeout, 5);
        assert!(!config.settings.vendor.security_enabled);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AppConfig = serde_yml::from_str("server:\n  listen: \"0.0.0.0:9999\"\n").unwrap();
        assert_eq!(config.settings.connection.timeout, 10);
        assert_eq!(config.settings.vendor.store_type, "PKCS12");
    }
}
