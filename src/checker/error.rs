use thiserror::Error;

/// Ошибки разрешения ключа.
///
/// Две категории: ошибки формы запроса (кривой ключ, неверное число
/// аргументов, кривая пара логин/пароль) и ошибки разрешения (удалённый
/// сбой, null атрибут, отсутствующее поле, неподдерживаемый контейнер).
/// Sentinel значения vendor пути ("" и "-99999") ошибками НЕ являются —
/// они возвращаются как обычные значения.
#[derive(Debug, Error, PartialEq)]
pub enum CheckError {
    #[error("item key is invalid: {0}")]
    InvalidKey(String),

    #[error("key ID '{0}' is not supported")]
    UnsupportedKey(String),

    #[error("required key format: {0}")]
    ArgumentCount(&'static str),

    #[error("invalid username and password nullness combination")]
    CredentialPair,

    #[error("data object is null")]
    NullAttribute,

    #[error("data object type is not primitive: {0}")]
    NotPrimitive(&'static str),

    #[error("field '{0}' not found")]
    FieldNotFound(String),

    #[error("unsupported data object type along the path: {0}")]
    UnsupportedContainer(&'static str),

    #[error("{0}")]
    Resolution(String),
}

impl CheckError {
    /// Оборачивает произвольную ошибку транспорта/протокола.
    pub fn resolution(err: impl std::fmt::Display) -> Self {
        CheckError::Resolution(format!("{:#}", err))
    }

    /// Ошибка формы запроса (неправильно настроенный элемент данных),
    /// в отличие от ошибки разрешения на удалённой стороне.
    pub fn is_request_shape(&self) -> bool {
        matches!(
            self,
            CheckError::InvalidKey(_)
                | CheckError::UnsupportedKey(_)
                | CheckError::ArgumentCount(_)
                | CheckError::CredentialPair
        )
    }
}
