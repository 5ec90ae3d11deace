use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// A backend response body: the payload fields plus an optional `error`.
///
/// The backend reports validation failures by putting a string in `error`,
/// sometimes with a 2xx status, so the field is checked before the payload is
/// decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: DeserializeOwned> Envelope<T> {
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice::<Value>(body)
                .map_err(|e| ApiError::ParseError(format!("Invalid response body: {}", e)))?
        };

        let error = value
            .get("error")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string);

        if error.is_some() {
            return Ok(Self { data: None, error });
        }

        let data = serde_json::from_value(value)
            .map_err(|e| ApiError::ParseError(format!("Unexpected response shape: {}", e)))?;

        Ok(Self {
            data: Some(data),
            error: None,
        })
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.error, self.data) {
            (Some(message), _) => Err(ApiError::Rejected(message)),
            (None, Some(data)) => Ok(data),
            (None, None) => Err(ApiError::ParseError("Empty response envelope".to_string())),
        }
    }
}
