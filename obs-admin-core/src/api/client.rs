use crate::config::AdminConfig;
use crate::error::AdminError;
use log::{debug, error, info};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = "obs-admin-core/0.1";
const ACCEPT: &str = "application/json";
pub const UNEXPECTED_ERROR: &str = "Unexpected error occurred";

/// Error envelope the backend sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default, deserialize_with = "super::models::lenient_string")]
    code: String,
    #[serde(default, deserialize_with = "super::models::lenient_string")]
    message: String,
}

/// Blocking JSON client rooted at one backend resource (e.g. `<base>/items`).
///
/// Every response passes through [`check_response`]: successes are logged
/// with their body, failures are turned into [`AdminError::Api`] when the
/// body is the standard error envelope.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &AdminConfig, resource: &str) -> Result<Self, AdminError> {
        let endpoint = config.endpoint(resource);
        let base = Url::parse(&endpoint).map_err(|e| {
            AdminError::Validation(format!("invalid backend url {}: {}", endpoint, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(AdminError::Validation(format!(
                "invalid backend url {}",
                endpoint
            )));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(ACCEPT),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(ApiClient { client, base })
    }

    /// Resource url with `segments` appended, each percent-encoded
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if !segments.is_empty() {
            // cannot_be_a_base was rejected in new()
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
        }
        url
    }

    pub fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, AdminError> {
        let request = self.client.get(self.url(segments)).query(query);
        let body = self.execute(request)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<(), AdminError> {
        let request = self.client.request(method, self.url(segments)).json(body);
        self.execute(request).map(|_| ())
    }

    pub fn delete(&self, segments: &[&str]) -> Result<(), AdminError> {
        let request = self.client.delete(self.url(segments));
        self.execute(request).map(|_| ())
    }

    fn execute(&self, request: RequestBuilder) -> Result<String, AdminError> {
        let request = request.build()?;
        debug!("calling backend: {} {}", request.method(), request.url());
        let response = self.client.execute(request)?;
        let status = response.status();
        let body = response.text()?;
        check_response(status, body)
    }
}

/// Log the response and map failures to errors; returns the body on success
pub fn check_response(status: StatusCode, body: String) -> Result<String, AdminError> {
    if status.is_success() {
        let shown = if body.is_empty() { "No body" } else { body.as_str() };
        info!("Success Response: HTTP {} - {}", status, shown);
        return Ok(body);
    }

    let shown = if body.is_empty() { "No body" } else { body.as_str() };
    match serde_json::from_str::<ApiErrorResponse>(shown) {
        Ok(err) => {
            error!("Error {}: {}", err.code, err.message);
            Err(AdminError::Api {
                code: err.code,
                message: err.message,
            })
        }
        Err(e) => {
            error!("Failed to parse error response body: {} ({})", shown, e);
            Err(AdminError::Unexpected(UNEXPECTED_ERROR.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, resource: &str) -> ApiClient {
        let config = AdminConfig::default().with_base_url(base_url);
        ApiClient::new(&config, resource).unwrap()
    }

    #[test]
    fn test_url_building() {
        let items = client("http://localhost:8878/v1/", "items");
        assert_eq!(items.url(&[]).as_str(), "http://localhost:8878/v1/items");
        assert_eq!(items.url(&["42"]).as_str(), "http://localhost:8878/v1/items/42");

        let inventories = client("http://localhost:8878/v1", "inventories");
        assert_eq!(
            inventories.url(&["items", "AB 12/x", "summary"]).as_str(),
            "http://localhost:8878/v1/inventories/items/AB%2012%2Fx/summary"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = AdminConfig::default().with_base_url("not a url");
        assert!(matches!(
            ApiClient::new(&config, "items"),
            Err(AdminError::Validation(_))
        ));
    }

    #[test]
    fn test_success_passes_body_through() {
        assert_eq!(check_response(StatusCode::OK, "{}".to_string()).unwrap(), "{}");
        assert_eq!(check_response(StatusCode::NO_CONTENT, String::new()).unwrap(), "");
    }

    #[test]
    fn test_error_envelope_becomes_api_error() {
        let body = r#"{"code": "ITEM_NOT_FOUND", "message": "Item 9 not found"}"#;
        match check_response(StatusCode::NOT_FOUND, body.to_string()) {
            Err(AdminError::Api { code, message }) => {
                assert_eq!(code, "ITEM_NOT_FOUND");
                assert_eq!(message, "Item 9 not found");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_error_code_is_accepted() {
        let body = r#"{"code": 409, "message": "Duplicate name"}"#;
        assert!(matches!(
            check_response(StatusCode::CONFLICT, body.to_string()),
            Err(AdminError::Api { code, .. }) if code == "409"
        ));
    }

    #[test]
    fn test_unparseable_error_body_is_unexpected() {
        for body in ["<html>Bad Gateway</html>", ""] {
            match check_response(StatusCode::BAD_GATEWAY, body.to_string()) {
                Err(AdminError::Unexpected(msg)) => assert_eq!(msg, UNEXPECTED_ERROR),
                other => panic!("Expected Unexpected error, got {:?}", other),
            }
        }
    }
}
