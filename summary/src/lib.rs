pub mod config;
pub mod error;
pub mod file_id;
pub mod models;
pub mod session;
pub mod summary_service;

pub use config::Config;
pub use error::{ConfigError, SummaryError};
pub use file_id::FileId;
pub use models::*;
pub use session::{Document, Session, SUMMARY_ALL};
pub use summary_service::SummaryService;
