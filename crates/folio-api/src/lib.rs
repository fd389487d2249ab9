//! # folio-api
//!
//! HTTP API for the Folio portfolio site.
//!
//! | route                | method | auth  |
//! |----------------------|--------|-------|
//! | `/api/admin/session` | any    | none  |
//! | `/api/admin/login`   | POST   | none  |
//! | `/api/admin/logout`  | POST   | none  |
//! | `/api/content`       | GET    | none  |
//! | `/api/content`       | POST   | admin |
//!
//! Every response carries `Cache-Control: no-store`. JSON responses use the
//! `{ "ok": bool, ... }` envelope.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, Error, Result};
pub use server::{MAX_BODY_BYTES, router, serve};
pub use state::AppState;
