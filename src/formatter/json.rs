use serde::Serialize;

use crate::checker::KeyResult;

/// JSON конверт ответа для монолита
#[derive(Debug, Clone, Serialize)]
pub struct PollResponseJson {
    pub response: String, // "success" | "failed"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<KeyValueJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Значение одного ключа: либо value, либо текст ошибки
#[derive(Debug, Clone, Serialize)]
pub struct KeyValueJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON форматтер для результатов опроса
pub struct JsonFormatter;

impl JsonFormatter {
    /// Успешный батч: по записи на каждый ключ, ошибки отдельных ключей
    /// не валят соседние.
    pub fn format_values(values: &[KeyResult]) -> PollResponseJson {
        let data = values
            .iter()
            .map(|result| match result {
                Ok(value) => KeyValueJson {
                    value: Some(value.clone()),
                    error: None,
                },
                Err(e) => KeyValueJson {
                    value: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        PollResponseJson {
            response: "success".to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Провал всего батча (форма запроса или подключение)
    pub fn format_failure(message: impl Into<String>) -> PollResponseJson {
        PollResponseJson {
            response: "failed".to_string(),
            data: None,
            error: Some(message.into()),
        }
    }

    /// Сериализует ответ в JSON строку
    pub fn to_json_string(response: &PollResponseJson) -> anyhow::Result<String> {
        serde_json::to_string(response)
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckError;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_envelope_mixes_values_and_errors() {
        let values = vec![
            Ok("42".to_string()),
            Err(CheckError::FieldNotFound("used".to_string())),
        ];

        let response = JsonFormatter::format_values(&values);
        let json = JsonFormatter::to_json_string(&response).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["response"], "success");
        assert_eq!(parsed["data"][0]["value"], "42");
        assert!(parsed["data"][0].get("error").is_none());
        assert_eq!(parsed["data"][1]["error"], "field 'used' not found");
        assert!(parsed["data"][1].get("value").is_none());
    }

    #[test]
    fn failure_envelope_has_no_data() {
        let response = JsonFormatter::format_failure("JMX request timeout");
        let json = JsonFormatter::to_json_string(&response).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["response"], "failed");
        assert_eq!(parsed["error"], "JMX request timeout");
        assert!(parsed.get("data").is_none());
    }
}
