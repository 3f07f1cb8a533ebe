use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{error, trace};

pub mod discovery;
pub mod drill;
pub mod error;
pub mod key;
pub mod vendor_stats;

pub use error::CheckError;

use crate::config::Settings;
use crate::jmx::{path, GenericSession, JmxSession, ObjectName, VendorClient, VendorSession};
use crate::models::poll::PollRequest;
use key::{ItemKey, DISCOVER_KEY_FORMAT, FETCH_KEY_FORMAT};

/// Маркер в ключах, по которому батч уходит на vendor бэкенд
pub const VENDOR_PERF_MARKER: &str = "WebSphere:*,type=Perf";

/// Результат одного ключа: текст значения или ошибка для пользователя
pub type KeyResult = Result<String, CheckError>;

/// Бэкенд выбирается один раз на весь батч и дальше передаётся явно —
/// все ключи батча идут одной дорогой.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Generic,
    Vendor,
}

/// Чекер одного батча ключей: подключение, разрешение, отключение.
#[derive(Debug)]
pub struct JmxChecker {
    host: String,
    port: u16,
    credentials: Option<(String, String)>,
    keys: Vec<String>,
    backend: Backend,
    settings: Settings,
}

impl JmxChecker {
    /// Валидирует запрос и выбирает бэкенд. Логин и пароль — либо оба,
    /// либо ни одного; проверяем до любых попыток подключения.
    pub fn new(request: &PollRequest, settings: &Settings) -> Result<Self, CheckError> {
        let credentials = match (&request.username, &request.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            (None, None) => None,
            _ => return Err(CheckError::CredentialPair),
        };

        let backend = if request.keys.iter().any(|k| k.contains(VENDOR_PERF_MARKER)) {
            Backend::Vendor
        } else {
            Backend::Generic
        };

        Ok(Self {
            host: request.conn.clone(),
            port: request.port,
            credentials,
            keys: request.keys.clone(),
            backend,
            settings: settings.clone(),
        })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Разрешает все ключи батча.
    pub async fn get_values(&self) -> Result<Vec<KeyResult>> {
        match self.backend {
            Backend::Generic => self.get_values_generic().await,
            Backend::Vendor => Ok(self.get_values_vendor().await),
        }
    }

    /// Generic бэкенд: одна сессия на батч, ошибка подключения валит весь
    /// батч, закрытие — безусловное.
    async fn get_values_generic(&self) -> Result<Vec<KeyResult>> {
        let timeout = Duration::from_secs(self.settings.get_timeout());

        let session =
            GenericSession::connect(&self.host, self.port, self.credentials.clone(), timeout)
                .await
                .context("Не удалось открыть JMX сессию")?;

        let mut values = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            values.push(check_generic(&session, key).await);
        }

        // Ошибки отключения не должны затирать собранный результат —
        // close ничего не возвращает
        session.close().await;

        Ok(values)
    }

    /// Vendor бэкенд: неудачное admin подключение деградирует до пустого
    /// списка значений, батч не падает. Асимметрия с generic намеренная.
    async fn get_values_vendor(&self) -> Vec<KeyResult> {
        let timeout = Duration::from_secs(self.settings.get_timeout());

        let client = match VendorClient::connect(
            &self.host,
            self.port,
            self.credentials.clone(),
            &self.settings.vendor,
            timeout,
        )
        .await
        {
            Ok(client) => client,
            Err(e) => {
                error!("Не удалось создать admin подключение: {:#}", e);
                return Vec::new();
            }
        };

        let mut values = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            values.push(check_vendor(&client, key).await);
        }

        values
    }
}

/// Разрешает один ключ через generic сессию.
pub async fn check_generic<S: JmxSession + ?Sized>(session: &S, key: &str) -> KeyResult {
    let item = ItemKey::parse(key)?;

    match item.id() {
        "fetch" => {
            let [object_arg, path_arg] = item.args() else {
                return Err(CheckError::ArgumentCount(FETCH_KEY_FORMAT));
            };

            let object = ObjectName::parse(object_arg).map_err(CheckError::resolution)?;

            // Голова пути — имя атрибута, хвост — поля composite данных
            let (head, fields) = path::split(path_arg);
            let attribute = path::unescape(head);
            trace!("имя атрибута '{}', поля '{}'", attribute, fields);

            let value = session
                .get_attribute(&object, &attribute)
                .await
                .map_err(CheckError::resolution)?;

            drill::drill(&value, fields)
        }
        "discover" => {
            if !item.args().is_empty() {
                return Err(CheckError::ArgumentCount(DISCOVER_KEY_FORMAT));
            }

            let records = discovery::walk(session).await.map_err(CheckError::resolution)?;
            let payload = discovery::DiscoveryPayload { data: records };
            serde_json::to_string(&payload).map_err(CheckError::resolution)
        }
        other => Err(CheckError::UnsupportedKey(other.to_string())),
    }
}

/// Разрешает один ключ через vendor admin клиент. Vendor бэкенд понимает
/// только fetch; остальные ключи дают пустое значение.
pub async fn check_vendor<S: VendorSession + ?Sized>(client: &S, key: &str) -> KeyResult {
    let item = ItemKey::parse(key)?;

    if item.id() != "fetch" {
        return Ok(String::new());
    }
    let [object_arg, path_arg] = item.args() else {
        return Err(CheckError::ArgumentCount(FETCH_KEY_FORMAT));
    };

    let segments: Vec<&str> = path_arg.split('.').collect();
    vendor_stats::resolve(client, object_arg, &segments).await
}
