//! Hover resolution
//!
//! Maps a cursor position to the word under it and reports whether that word
//! is a valid expression:
//! - look up the document snapshot
//! - select the line and the word around the cursor
//! - validate the word once and build the hover markup

use std::sync::Arc;

use tower_lsp::lsp_types::{
    Hover, HoverContents, LanguageString, MarkedString, Position, Range, Url,
};

use crate::document::DocumentStore;
use crate::error::{Error, Result};
use crate::scanner;
use crate::validator::ExpressionValidator;

/// Resolves hover requests against the document store
#[derive(Debug)]
pub struct HoverResolver<V> {
    validator: Arc<V>,
}

impl<V: ExpressionValidator> HoverResolver<V> {
    pub fn new(validator: Arc<V>) -> Self {
        Self { validator }
    }

    /// Resolve a hover for `position` in the document at `uri`
    pub async fn resolve(
        &self,
        documents: &DocumentStore,
        uri: &Url,
        position: Position,
    ) -> Result<Hover> {
        let document = documents.get(uri).await?;
        hover_for_text(&document.text, position, self.validator.as_ref())
    }
}

/// Build the hover for `position` within `text`
pub fn hover_for_text<V>(text: &str, position: Position, validator: &V) -> Result<Hover>
where
    V: ExpressionValidator + ?Sized,
{
    let line_count = text.split('\n').count();
    let line = text
        .split('\n')
        .nth(position.line as usize)
        .ok_or(Error::InvalidPosition {
            line: position.line,
            line_count,
        })?;
    let line = line.strip_suffix('\r').unwrap_or(line);

    let span = scanner::word_span(line, position.character as usize);
    let word = if span.is_empty() {
        ""
    } else {
        &line[span.clone()]
    };

    validator.validate(word).map_err(Error::InvalidExpression)?;

    tracing::debug!("Hover resolved word {:?} at {:?}", word, position);

    Ok(Hover {
        contents: HoverContents::Scalar(MarkedString::LanguageString(LanguageString {
            language: validator.language_id().to_string(),
            value: format!("Valid PromQL expression: {}", word),
        })),
        range: Some(Range {
            start: Position {
                line: position.line,
                character: span.start as u32,
            },
            end: Position {
                line: position.line,
                character: span.end as u32,
            },
        }),
    })
}
