use serde::{Deserialize, Serialize};
use std::env;

/// Настройки HTTP сервера шлюза
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Адрес и порт, на которых слушаем монолит
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:10052".to_string(),
        }
    }
}

/// Базовые настройки приложения
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Настройки подключения к управляемым процессам
    #[serde(default)]
    pub connection: ConnectionSettings,
    /// Материал безопасности vendor admin подключения
    #[serde(default)]
    pub vendor: VendorSettings,
}

impl Settings {
    /// Таймаут из переменной окружения или из настроек
    pub fn get_timeout(&self) -> u64 {
        env::var("JMX_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(self.connection.timeout)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Таймаут для операций с управляемым процессом (секунды)
    pub timeout: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self { timeout: 10 }
    }
}

/// Trust/key store и прочие свойства admin подключения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSettings {
    /// Подключаться к admin сервису по TLS
    pub security_enabled: bool,
    /// Тип key store (поддерживаем только PKCS12)
    pub store_type: String,
    pub trust_store: Option<String>,
    pub key_store: Option<String>,
    pub trust_store_password: String,
    pub key_store_password: String,
}

impl Default for VendorSettings {
    fn default() -> Self {
        Self {
            security_enabled: true,
            store_type: "PKCS12".to_string(),
            trust_store: None,
            key_store: None,
            trust_store_password: "WebAS".to_string(),
            key_store_password: "WebAS".to_string(),
        }
    }
}

impl VendorSettings {
    /// Путь к trust store: переменная окружения важнее конфига
    pub fn get_trust_store(&self) -> Option<String> {
        env::var("TRUST_PATH").ok().or_else(|| self.trust_store.clone())
    }

    /// Путь к key store: переменная окружения важнее конфига
    pub fn get_key_store(&self) -> Option<String> {
        env::var("KEY_PATH").ok().or_else(|| self.key_store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_legacy_connector_properties() {
        let settings = Settings::default();
        assert_eq!(settings.connection.timeout, 10);
        assert!(settings.vendor.security_enabled);
        assert_eq!(settings.vendor.store_type, "PKCS12");
        assert_eq!(settings.vendor.key_store_password, "WebAS");
        assert_eq!(settings.vendor.trust_store, None);
    }
}
