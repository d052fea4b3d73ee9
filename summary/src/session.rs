use crate::error::SummaryError;
use crate::file_id::FileId;
use crate::models::*;
use crate::summary_service::SummaryService;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Query sent for the initial whole-document summary.
pub const SUMMARY_ALL: &str = "SUMMARY_ALL";

/// The document the current conversation is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_id: FileId,
    pub pdf_url: String,
}

#[derive(Debug, Default)]
struct SessionState {
    status: RequestStatus,
    lang: Lang,
    document: Option<Document>,
    summary: Option<String>,
    follow_ups: Vec<FollowUp>,
    last_error: Option<String>,
}

/// Tracks one summary conversation: the summarized document, the follow-up
/// log and whichever request is in flight.
///
/// Only one request runs at a time. The state lock is never held across the
/// network call, so `status()` can be read while a request is pending.
#[derive(Debug)]
pub struct Session {
    service: SummaryService,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(service: SummaryService, lang: Lang) -> Self {
        Self {
            service,
            state: Mutex::new(SessionState {
                lang,
                ..SessionState::default()
            }),
        }
    }

    /// Summarizes the PDF at `url`, starting a new conversation on success.
    pub async fn request_summary(&self, url: &str, lang: Lang) -> Result<String, SummaryError> {
        if url.trim().is_empty() {
            return Err(SummaryError::EmptyUrl);
        }

        let file_id = FileId::from_url(url);
        let (in_flight, ()) = self.begin(RequestStatus::Summarizing, |_| Ok(()))?;

        log::info!("Requesting summary for {} ({})", url, file_id);
        let request = SummaryRequest::new(&file_id, url, SUMMARY_ALL, lang);
        let outcome = self.service.submit(&request).await;

        let mut state = in_flight.finish();
        match outcome {
            Ok(summary) => {
                state.lang = lang;
                state.document = Some(Document {
                    file_id,
                    pdf_url: url.to_string(),
                });
                state.summary = Some(summary.clone());
                state.follow_ups.clear();
                Ok(summary)
            }
            Err(err) => {
                state.last_error = Some(err.user_message(lang));
                Err(err)
            }
        }
    }

    /// Asks a question about the summarized document. The answered pair is
    /// prepended to the follow-up log.
    pub async fn ask_follow_up(&self, question: &str) -> Result<String, SummaryError> {
        if question.trim().is_empty() {
            return Err(SummaryError::EmptyQuestion);
        }

        let (in_flight, (document, lang)) = self.begin(RequestStatus::AskingFollowUp, |state| {
            let document = state.document.clone().ok_or(SummaryError::NoDocument)?;
            Ok((document, state.lang))
        })?;

        log::info!("Asking follow-up on {}", document.file_id);
        let request = SummaryRequest::new(&document.file_id, &document.pdf_url, question, lang);
        let outcome = self.service.submit(&request).await;

        let mut state = in_flight.finish();
        match outcome {
            Ok(answer) => {
                state.follow_ups.insert(
                    0,
                    FollowUp {
                        question: question.to_string(),
                        answer: answer.clone(),
                    },
                );
                Ok(answer)
            }
            Err(err) => {
                state.last_error = Some(err.user_message(lang));
                Err(err)
            }
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.lock().status
    }

    pub fn lang(&self) -> Lang {
        self.lock().lang
    }

    /// Language for later follow-ups. The document and log are kept.
    pub fn set_lang(&self, lang: Lang) {
        self.lock().lang = lang;
    }

    pub fn document(&self) -> Option<Document> {
        self.lock().document.clone()
    }

    pub fn summary(&self) -> Option<String> {
        self.lock().summary.clone()
    }

    /// Newest first.
    pub fn follow_ups(&self) -> Vec<FollowUp> {
        self.lock().follow_ups.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the idle slot for `status` after `check` accepts the current
    /// state, handing back whatever `check` read from it.
    fn begin<F, T>(&self, status: RequestStatus, check: F) -> Result<(InFlight<'_>, T), SummaryError>
    where
        F: FnOnce(&SessionState) -> Result<T, SummaryError>,
    {
        let mut state = self.lock();
        if state.status != RequestStatus::Idle {
            log::warn!("Rejecting request: session is {}", state.status);
            return Err(SummaryError::Busy);
        }
        let checked = check(&*state)?;
        state.status = status;
        state.last_error = None;

        let in_flight = InFlight {
            session: self,
            armed: true,
        };
        Ok((in_flight, checked))
    }
}

/// Puts the session back to idle when the request settles or its future is dropped.
struct InFlight<'a> {
    session: &'a Session,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn finish(mut self) -> MutexGuard<'a, SessionState> {
        self.armed = false;
        let session: &'a Session = self.session;
        let mut state = session.lock();
        state.status = RequestStatus::Idle;
        state
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.lock().status = RequestStatus::Idle;
        }
    }
}
