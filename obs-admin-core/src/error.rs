use std::fmt;

#[derive(Debug)]
pub enum AdminError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    /// Error envelope returned by the backend (`{ "code", "message" }`).
    Api { code: String, message: String },
    Unexpected(String),
    Conversion(String),
    Validation(String),
    NotFound(String),
    Io(std::io::Error),
}

impl AdminError {
    /// Text suitable for an error notification.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Api { message, .. } => message.clone(),
            AdminError::Unexpected(e)
            | AdminError::Validation(e)
            | AdminError::NotFound(e) => e.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Network(e) => write!(f, "Network error: {}", e),
            AdminError::Json(e) => write!(f, "JSON parsing error: {}", e),
            AdminError::Api { code, message } => write!(f, "API error {}: {}", code, message),
            AdminError::Unexpected(e) => write!(f, "Unexpected error: {}", e),
            AdminError::Conversion(e) => write!(f, "Conversion error: {}", e),
            AdminError::Validation(e) => write!(f, "Invalid input: {}", e),
            AdminError::NotFound(e) => write!(f, "Not found: {}", e),
            AdminError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AdminError {}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        AdminError::Network(err)
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Json(err)
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = AdminError::Api {
            code: "ITEM_NOT_FOUND".to_string(),
            message: "Item 7 does not exist".to_string(),
        };
        assert_eq!(err.user_message(), "Item 7 does not exist");
        assert_eq!(err.to_string(), "API error ITEM_NOT_FOUND: Item 7 does not exist");
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = AdminError::Conversion("price: invalid float literal".to_string());
        assert_eq!(err.user_message(), "Conversion error: price: invalid float literal");
    }
}
