use crate::models::Lang;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("failed to reach the summary service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("document not found (HTTP 404)")]
    NotFound,

    #[error("invalid request (HTTP 422)")]
    InvalidRequest,

    #[error("summary service error (HTTP {0})")]
    Server(u16),

    #[error("summary service reported an error: {0}")]
    Api(String),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("PDF URL is empty")]
    EmptyUrl,

    #[error("question is empty")]
    EmptyQuestion,

    #[error("no document has been summarized yet")]
    NoDocument,

    #[error("another request is still in flight")]
    Busy,
}

impl SummaryError {
    /// Text shown to the user, in the session language.
    pub fn user_message(&self, lang: Lang) -> String {
        let text = match (self, lang) {
            (SummaryError::Network(_) | SummaryError::Decode(_), Lang::Ko) => {
                "요청 실패: 네트워크 오류 또는 서버 미응답".to_string()
            }
            (SummaryError::Network(_) | SummaryError::Decode(_), Lang::En) => {
                "Request failed: network error or no response from server".to_string()
            }
            (SummaryError::NotFound, Lang::Ko) => "PDF를 찾을 수 없습니다.".to_string(),
            (SummaryError::NotFound, Lang::En) => "PDF not found.".to_string(),
            (SummaryError::InvalidRequest, Lang::Ko) => "요청 정보가 잘못되었습니다.".to_string(),
            (SummaryError::InvalidRequest, Lang::En) => "Invalid request.".to_string(),
            (SummaryError::Server(status), Lang::Ko) => format!("서버 오류 ({status})"),
            (SummaryError::Server(status), Lang::En) => format!("Server error ({status})"),
            (SummaryError::Api(message), _) => message.clone(),
            (SummaryError::EmptyUrl, Lang::Ko) => "PDF URL을 입력하세요.".to_string(),
            (SummaryError::EmptyUrl, Lang::En) => "Please enter a PDF URL.".to_string(),
            (SummaryError::EmptyQuestion, Lang::Ko) => "질문을 입력하세요.".to_string(),
            (SummaryError::EmptyQuestion, Lang::En) => "Please enter a question.".to_string(),
            (SummaryError::NoDocument, Lang::Ko) => "먼저 요약을 요청하세요.".to_string(),
            (SummaryError::NoDocument, Lang::En) => "Request a summary first.".to_string(),
            (SummaryError::Busy, Lang::Ko) => "이전 요청을 처리하는 중입니다.".to_string(),
            (SummaryError::Busy, Lang::En) => "A previous request is still running.".to_string(),
        };
        format!("❗ {text}")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported language `{0}` (expected KO or EN)")]
    UnsupportedLang(String),

    #[error("invalid {name} value `{value}`: expected a whole number of seconds")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
