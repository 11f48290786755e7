//! promql-lsp: minimal LSP server library that validates PromQL on hover
//!
//! This library provides the core functionality for the promql-lsp server:
//! - Full-text document synchronization keyed by URI
//! - Word lookup around a cursor position
//! - Hover responses that validate the word under the cursor as PromQL
//!
//! # Example
//!
//! ```
//! use promql_lsp::hover::hover_for_text;
//! use promql_lsp::validator::PromqlValidator;
//! use tower_lsp::lsp_types::Position;
//!
//! let text = "rate(http_requests_total[5m])\n";
//! let hover = hover_for_text(text, Position::new(0, 10), &PromqlValidator).unwrap();
//! assert!(hover.range.is_some());
//! ```

pub mod document;
pub mod error;
pub mod hover;
pub mod scanner;
pub mod validator;

mod backend;

pub use backend::Backend;
pub use error::{Error, Result};
