//! Error types with rich diagnostics using miette
//!
//! Configuration errors carry source spans into the JSON document so the CLI
//! can point at the offending value.

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Span of the first occurrence of `needle`, or the start of the document.
    pub fn find(&self, needle: &str) -> SourceSpan {
        match self.source.find(needle) {
            Some(start) => SourceSpan::new(start.into(), needle.len()),
            None => SourceSpan::new(0.into(), 0),
        }
    }

    /// Span for a 1-based line/column position (as reported by serde_json).
    pub fn location(&self, line: usize, column: usize) -> SourceSpan {
        let offset = SourceOffset::from_location(&self.source, line, column);
        SourceSpan::new(offset, 0)
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while loading a weathermap configuration or metric values
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("invalid JSON: {message}")]
    #[diagnostic(code(weathermap::config::json))]
    Json {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number for `{field}`: {value:?}")]
    #[diagnostic(
        code(weathermap::config::invalid_number),
        help("geometric fields take a finite number or a numeric string")
    )]
    InvalidNumber {
        field: String,
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a finite number")]
        span: SourceSpan,
    },

    #[error("invalid {kind} in style `{style}`")]
    #[diagnostic(
        code(weathermap::config::invalid_width_list),
        help("use non-negative numbers separated by spaces or commas, e.g. \"2 1 2\"")
    )]
    InvalidWidthList {
        kind: &'static str,
        style: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot parse this")]
        span: SourceSpan,
    },

    #[error("metric `{name}` is not a finite number")]
    #[diagnostic(code(weathermap::config::invalid_metric_value))]
    InvalidMetricValue {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a number")]
        span: SourceSpan,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("degenerate edge geometry for {edge}")]
    #[diagnostic(
        code(weathermap::render::degenerate_edge_geometry),
        help("a multi-stroke edge needs distinct node centers to lay strokes side by side")
    )]
    DegenerateEdgeGeometry { edge: String },
}
