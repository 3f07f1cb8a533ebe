use serde::Deserialize;

/// Запрос опроса от монолита: куда подключаться и какие ключи разрешить.
///
/// Логин и пароль — опциональная пара: либо оба поля, либо ни одного.
#[derive(Debug, Clone, Deserialize)]
pub struct PollRequest {
    pub conn: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_request_without_credentials() {
        let request: PollRequest = serde_json::from_str(
            r#"{"conn": "10.0.0.5", "port": 9010, "keys": ["fetch[MyBean,stat.current]"]}"#,
        )
        .unwrap();

        assert_eq!(request.conn, "10.0.0.5");
        assert_eq!(request.port, 9010);
        assert_eq!(request.username, None);
        assert_eq!(request.keys.len(), 1);
    }
}
