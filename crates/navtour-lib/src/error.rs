use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the navtour library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node name is inserted twice into the same registry.
    #[error("duplicate node name: {name}")]
    DuplicateNode { name: String },

    /// Raised when a node name could not be resolved against the registry.
    #[error("unknown node name: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a node carries a NaN or infinite coordinate.
    #[error("node {name} has a non-finite position ({x}, {y})")]
    InvalidPosition { name: String, x: f64, y: f64 },

    /// Raised when a tour solver is handed no nodes at all.
    #[error("cannot build a tour over an empty node set")]
    EmptyNodeSet,

    /// Raised when a solver configuration value is out of range.
    #[error("invalid solver configuration: {field} {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// Raised when an input file contains a malformed row.
    #[error("{}:{line}: {message}", path.display())]
    InputFormat {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
