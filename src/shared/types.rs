use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
        }
    }
}

/// Error body returned by the JSON endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

/// Deserializes an optional scalar field into a trimmed string.
///
/// Form posts send every value as text while JSON clients may send numbers;
/// both end up as `Some(String)`. Blank values become `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LenientValue>::deserialize(deserializer)?;
    let text = match value {
        None => return Ok(None),
        Some(LenientValue::Text(s)) => s,
        Some(LenientValue::Integer(n)) => n.to_string(),
        Some(LenientValue::Float(n)) => n.to_string(),
        Some(LenientValue::Bool(b)) => b.to_string(),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_string")]
        width: Option<String>,
    }

    #[test]
    fn test_lenient_string_accepts_numbers_and_text() {
        let probe: Probe = serde_json::from_str(r#"{"width": 150}"#).unwrap();
        assert_eq!(probe.width.as_deref(), Some("150"));

        let probe: Probe = serde_json::from_str(r#"{"width": " 200 "}"#).unwrap();
        assert_eq!(probe.width.as_deref(), Some("200"));
    }

    #[test]
    fn test_lenient_string_blank_is_none() {
        let probe: Probe = serde_json::from_str(r#"{"width": "  "}"#).unwrap();
        assert!(probe.width.is_none());

        let probe: Probe = serde_json::from_str(r#"{"width": null}"#).unwrap();
        assert!(probe.width.is_none());

        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert!(probe.width.is_none());
    }
}
