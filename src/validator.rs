//! Expression grammar validation
//!
//! The hover path only needs a yes/no answer (with a message) from the grammar,
//! so the parser sits behind [`ExpressionValidator`].

/// Validates expression text against a grammar
pub trait ExpressionValidator: Send + Sync + 'static {
    /// Language identifier used to tag hover markup (e.g. `promql`)
    fn language_id(&self) -> &str;

    /// Check `expr`, returning the parser's message on failure
    fn validate(&self, expr: &str) -> Result<(), String>;
}

/// PromQL validator backed by `promql-parser`
#[derive(Debug, Default, Clone, Copy)]
pub struct PromqlValidator;

impl PromqlValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionValidator for PromqlValidator {
    fn language_id(&self) -> &str {
        "promql"
    }

    fn validate(&self, expr: &str) -> Result<(), String> {
        if expr.trim().is_empty() {
            return Err("no expression found in input".to_string());
        }
        promql_parser::parser::parse(expr).map(|_| ())
    }
}
