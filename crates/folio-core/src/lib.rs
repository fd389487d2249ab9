//! Folio Core: the portfolio content model.
//!
//! This crate owns the fixed schema of the site's editable content and the
//! rules for turning untrusted editor input into that schema. It has no
//! internal Folio dependencies.
//!
//! # Modules
//!
//! - [`model`]: typed sections and the [`Normalize`](model::Normalize) trait
//! - [`patch`]: sanitizing partial updates and merging them into documents
//! - [`stored`]: reading stored documents back into [`PortfolioContent`]
//! - [`value`]: lenient JSON helpers
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```
//! use folio_core::{merge, normalize_stored, sanitize_patch, Document};
//! use serde_json::json;
//!
//! let patch = sanitize_patch(&json!({"heroRoles": "Data Scientist, AI Engineer"})).unwrap();
//! let stored = merge(Document::new(), patch);
//! let content = normalize_stored(&stored);
//! assert_eq!(content.hero_roles.unwrap().0.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod patch;
pub mod stored;
pub mod value;

mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use model::PortfolioContent;
pub use patch::{Section, merge, sanitize_patch};
pub use stored::{document_from_stored, normalize_stored};
pub use value::Document;
