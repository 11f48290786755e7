//! Error types for document and hover handling

use tower_lsp::jsonrpc::{self, ErrorCode};

/// LSP `RequestFailed` error code.
const REQUEST_FAILED: i64 = -32803;

/// Errors produced while handling a single request or notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The URI was never opened, or was closed.
    #[error("document not found")]
    DocumentNotFound,

    /// The requested line is outside the document.
    #[error("invalid line number")]
    InvalidPosition {
        /// The requested line.
        line: u32,
        /// Number of lines in the document.
        line_count: usize,
    },

    /// The token under the cursor was rejected by the grammar.
    #[error("error parsing PromQL expression: {0}")]
    InvalidExpression(String),

    /// A notification could not be applied.
    #[error("malformed notification: {0}")]
    MalformedNotification(&'static str),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for jsonrpc::Error {
    fn from(err: Error) -> Self {
        let code = match err {
            Error::DocumentNotFound | Error::InvalidPosition { .. } => ErrorCode::InvalidParams,
            Error::InvalidExpression(_) => ErrorCode::ServerError(REQUEST_FAILED),
            Error::MalformedNotification(_) => ErrorCode::InvalidRequest,
        };

        jsonrpc::Error {
            code,
            message: err.to_string().into(),
            data: None,
        }
    }
}
