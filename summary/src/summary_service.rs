use crate::config::Config;
use crate::error::{ConfigError, SummaryError};
use crate::models::*;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// HTTP client for `POST {api_url}/api/summary`.
#[derive(Debug, Clone)]
pub struct SummaryService {
    client: Client,
    endpoint: String,
}

impl SummaryService {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.summary_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one request and returns the answer text.
    pub async fn submit(&self, request: &SummaryRequest) -> Result<String, SummaryError> {
        log::info!(
            "POST {} file_id={} lang={} query={:?}",
            self.endpoint,
            request.file_id,
            request.lang,
            request.query
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .inspect_err(|err| log::warn!("Summary request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Summary service answered {}", status);
            return Err(status_error(status));
        }

        let body = response.text().await?;
        interpret_body(&body)
    }
}

fn status_error(status: StatusCode) -> SummaryError {
    match status {
        StatusCode::NOT_FOUND => SummaryError::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => SummaryError::InvalidRequest,
        other => SummaryError::Server(other.as_u16()),
    }
}

/// Reduces a successful response body to the answer text.
///
/// A truthy `error` field wins; otherwise `answer`, then `summary`, then the
/// raw JSON text of the body.
pub fn interpret_body(body: &str) -> Result<String, SummaryError> {
    let data: Value = serde_json::from_str(body)?;
    let parsed = SummaryResponse::from_value(&data);

    if let Some(message) = parsed.error {
        log::warn!("Summary service returned error payload: {}", message);
        return Err(SummaryError::Api(message));
    }

    Ok(parsed
        .result()
        .map(str::to_string)
        .unwrap_or_else(|| data.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_codes() {
        assert!(matches!(status_error(StatusCode::NOT_FOUND), SummaryError::NotFound));
        assert!(matches!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY),
            SummaryError::InvalidRequest
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY),
            SummaryError::Server(502)
        ));
    }

    #[test]
    fn body_with_error_field_is_an_api_error() {
        let err = interpret_body(r#"{"error": "PDF too large", "summary": "ignored"}"#).unwrap_err();
        assert!(matches!(err, SummaryError::Api(ref m) if m == "PDF too large"));
    }

    #[test]
    fn body_falls_back_to_raw_json() {
        assert_eq!(interpret_body(r#"{"answer": "42"}"#).unwrap(), "42");
        assert_eq!(interpret_body(r#"{"summary": "short"}"#).unwrap(), "short");
        assert_eq!(interpret_body(r#"{"other":1}"#).unwrap(), r#"{"other":1}"#);
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        assert!(matches!(interpret_body("<html>"), Err(SummaryError::Decode(_))));
    }

    #[test]
    fn endpoint_follows_config() {
        let config = Config::default().with_api_url("http://127.0.0.1:9000/");
        let service = SummaryService::new(&config).unwrap();
        assert_eq!(service.endpoint(), "http://127.0.0.1:9000/api/summary");
    }
}
