//! Error types for resource generation.

use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a resource.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema provider does not know the requested resource type.
    #[error("unsupported type {0}")]
    UnknownResourceType(String),

    /// The resource type has no `vendor_` prefix.
    #[error("incorrect resource type {0}: expected `<vendor>_<name>`")]
    InvalidResourceName(String),

    /// A value type the resolver cannot express as a variable type.
    #[error("unsupported type {type_desc} for {field}")]
    UnsupportedType {
        /// Address of the offending field.
        field: String,
        /// Description of the type.
        type_desc: String,
    },

    /// Generated code did not parse back as HCL.
    #[error("error when generating code for {address}: {message}")]
    Synthesis {
        /// Address of the node being generated.
        address: String,
        /// Parser diagnostics.
        message: String,
    },

    /// Documentation could not be read or parsed.
    #[error("error on load and parse document: {0}")]
    DescriptionFetch(String),

    /// The variable prefix cannot name a variable in the selected mode.
    #[error("variable prefix {prefix:?} is not usable in {mode} mode")]
    InvalidVariablePrefix {
        /// Configured prefix.
        prefix: String,
        /// Generation mode.
        mode: String,
    },

    /// The heredoc delimiter is not an identifier.
    #[error("invalid heredoc delimiter {0:?}: expected an identifier")]
    InvalidDelimiter(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an unsupported type error for the given field.
    pub fn unsupported_type(field: impl Into<String>, type_desc: impl ToString) -> Self {
        Self::UnsupportedType {
            field: field.into(),
            type_desc: type_desc.to_string(),
        }
    }

    /// Creates a synthesis error for the node at `address`.
    pub fn synthesis(address: impl Into<String>, message: impl ToString) -> Self {
        Self::Synthesis {
            address: address.into(),
            message: message.to_string(),
        }
    }
}
