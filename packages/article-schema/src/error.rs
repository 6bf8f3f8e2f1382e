//! Error types for the article schema.
//!
//! Two recoverable errors (`DecodeMismatch`, `AttributeDecodeFailure`) are
//! handled locally while decoding markup. Everything in `SchemaError`
//! indicates a configuration or integrity defect and is surfaced to the
//! caller.

use thiserror::Error;

/// A markup element did not satisfy any candidate spec's matcher.
///
/// Callers recover by trying the next candidate or, in the reference
/// walker, by descending into the element's children.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No node type matches <{tag}>")]
pub struct DecodeMismatch {
    pub tag: String,
}

/// An individual attribute value could not be decoded.
///
/// Recovered by substituting the attribute's declared default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeDecodeFailure {
    /// The source attribute or style property is absent.
    #[error("Missing source for attribute")]
    Missing,

    /// The source value is present but unparseable.
    #[error("Unrecognized value '{0}'")]
    Unrecognized(String),

    /// The canonical value has the wrong shape for this attribute.
    #[error("Unexpected canonical value {0}")]
    WrongShape(String),
}

/// Main error type for the schema library.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two specs registered under the same name.
    #[error("Duplicate {kind} type '{name}'")]
    DuplicateType { kind: TypeKind, name: String },

    /// Encode requested for a type absent from the registry.
    #[error("Unknown {kind} type '{name}'")]
    UnknownType { kind: TypeKind, name: String },

    /// The type exists but has no element form (e.g. `doc`, `text`).
    #[error("Node type '{name}' has no markup form")]
    NoMarkupForm { name: String },

    /// A content model references a name that is neither a node nor a group.
    #[error("Content model of '{type_name}' references unknown name '{reference}'")]
    DanglingContentReference { type_name: String, reference: String },

    /// A content model expression could not be parsed.
    #[error("Invalid content expression '{expr}': {reason}")]
    InvalidContentExpression { expr: String, reason: String },

    /// A canonical attribute value could not be encoded.
    #[error("Invalid value for attribute '{attribute}' of '{type_name}': {source}")]
    InvalidAttribute {
        type_name: String,
        attribute: String,
        #[source]
        source: AttributeDecodeFailure,
    },

    /// A node's children do not satisfy its content model.
    #[error("Invalid content for '{type_name}': {detail}")]
    InvalidContent { type_name: String, detail: String },

    /// A mark appears inside a parent that does not admit it.
    #[error("Mark '{mark}' is not allowed inside '{parent}'")]
    MarkNotAllowed { mark: String, parent: String },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    /// JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which registry a type name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Node,
    Mark,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node => f.write_str("node"),
            Self::Mark => f.write_str("mark"),
        }
    }
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
