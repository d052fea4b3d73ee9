use crate::error::ConfigError;
use crate::file_id::FileId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Language the summary service should answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    #[serde(rename = "KO")]
    Ko,
    #[serde(rename = "EN")]
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Ko => "KO",
            Lang::En => "EN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lang::Ko => "한국어",
            Lang::En => "English",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" | "한국어" => Ok(Lang::Ko),
            "en" | "english" => Ok(Lang::En),
            _ => Err(ConfigError::UnsupportedLang(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub file_id: FileId,
    pub pdf_url: String,
    pub query: String,
    pub lang: Lang,
}

impl SummaryRequest {
    pub fn new(file_id: &FileId, pdf_url: &str, query: &str, lang: Lang) -> Self {
        Self {
            file_id: file_id.clone(),
            pdf_url: pdf_url.to_string(),
            query: query.to_string(),
            lang,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResponse {
    /// Reads the known fields out of an arbitrary JSON body.
    ///
    /// Non-string values are kept as their JSON text; `null` counts as absent.
    /// `error` is only taken when it is truthy, so `""`, `false` and `0` are ignored.
    pub fn from_value(data: &Value) -> Self {
        Self {
            summary: data.get("summary").and_then(text_of),
            answer: data.get("answer").and_then(text_of),
            error: data.get("error").filter(|v| is_truthy(v)).and_then(text_of),
        }
    }

    /// `answer` wins over `summary`.
    pub fn result(&self) -> Option<&str> {
        self.answer.as_deref().or(self.summary.as_deref())
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One answered follow-up question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub question: String,
    pub answer: String,
}

impl fmt::Display for FollowUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q: {}\nA: {}", self.question, self.answer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Summarizing,
    AskingFollowUp,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Summarizing => "summarizing",
            RequestStatus::AskingFollowUp => "asking follow-up",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn request_serializes_with_wire_field_names() {
        let id = FileId::from_url("https://arxiv.org/pdf/1234.pdf");
        let request = SummaryRequest::new(&id, "https://arxiv.org/pdf/1234.pdf", "SUMMARY_ALL", Lang::En);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "file_id": id.as_str(),
                "pdf_url": "https://arxiv.org/pdf/1234.pdf",
                "query": "SUMMARY_ALL",
                "lang": "EN",
            })
        );
    }

    #[test]
    fn lang_parses_loosely() {
        assert_eq!("ko".parse::<Lang>().unwrap(), Lang::Ko);
        assert_eq!(" EN ".parse::<Lang>().unwrap(), Lang::En);
        assert_eq!("English".parse::<Lang>().unwrap(), Lang::En);
        assert!("fr".parse::<Lang>().is_err());
    }

    #[test]
    fn answer_is_preferred_over_summary() {
        let parsed = SummaryResponse::from_value(&json!({"summary": "s", "answer": "a"}));
        assert_eq!(parsed.result(), Some("a"));

        let parsed = SummaryResponse::from_value(&json!({"summary": "s", "answer": null}));
        assert_eq!(parsed.result(), Some("s"));
    }

    #[test]
    fn falsy_error_fields_are_ignored() {
        for body in [json!({"error": ""}), json!({"error": false}), json!({"error": null}), json!({"error": 0})] {
            assert_eq!(SummaryResponse::from_value(&body).error, None, "{body}");
        }
        let parsed = SummaryResponse::from_value(&json!({"error": {"code": 7}}));
        assert_eq!(parsed.error.as_deref(), Some(r#"{"code":7}"#));
    }

    #[test]
    fn non_object_body_has_no_fields() {
        assert_eq!(SummaryResponse::from_value(&json!(["a", "b"])), SummaryResponse::default());
        assert_eq!(SummaryResponse::from_value(&json!("text")), SummaryResponse::default());
    }

    #[test]
    fn follow_up_renders_as_qa_pair() {
        let entry = FollowUp {
            question: "결론은?".to_string(),
            answer: "요약입니다.".to_string(),
        };
        assert_eq!(entry.to_string(), "Q: 결론은?\nA: 요약입니다.");
    }
}
