//! # folio-cli
//!
//! The `folio` binary.
//!
//! - `folio serve`: run the portfolio API
//! - `folio backup [--out FILE]`: write a content backup
//! - `folio restore [FILE]`: restore content, keeping a pre-restore copy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Args, Command};
pub use config::FolioConfig;
pub use error::{Error, Result};
