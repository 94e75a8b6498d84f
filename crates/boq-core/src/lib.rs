//! Import sessions for quote line-item spreadsheets.
//!
//! An [`ImportSession`] runs the whole pipeline for one file: read the first
//! sheet, detect the header row, normalize rows into a preview, and finally
//! merge the preview into an existing item list. Shared settings live in an
//! [`ImportContext`], optionally loaded from an [`ImportConfig`] TOML file.

mod config;
mod context;
mod error;
mod session;

pub use config::{ImportConfig, LimitsConfig, SynonymEntry};
pub use context::ImportContext;
pub use error::{ConfigError, Result, SessionError};
pub use session::ImportSession;
