use serde_json::Value;
use thiserror::Error;

/// Everything that can go wrong while building or augmenting an LPF
/// document. Three families of failure: semantically invalid values,
/// structurally wrong shapes, and recognized-but-unsupported features.
#[derive(Error, Debug)]
pub enum LpfError {
    // ---- invalid values ----
    #[error("Feature:properties is missing required key: {0}")]
    MissingProperty(&'static str),
    #[error(
        "Feature:properties['fclasses'] contains invalid fclass '{value}' in position {position}; valid fclasses are A, H, L, P, R, S, T"
    )]
    InvalidFeatureClass { value: String, position: usize },
    #[error("invalid identifier type: '{0}'")]
    UnknownIdentifierKind(String),
    #[error("{kind} identifier value '{value}' {constraint}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        constraint: &'static str,
    },
    #[error("invalid citation URL '{url}': host must be one of {hosts}")]
    InvalidCitationUrl { url: String, hosts: String },
    #[error("invalid citation reason: '{0}'")]
    InvalidCitationReason(String),
    #[error("invalid {kind} geometry: {message}")]
    InvalidGeometry { kind: String, message: String },
    #[error("invalid geometry certainty: '{0}'; expected certain, less-certain, or uncertain")]
    InvalidCertainty(String),
    #[error("FeatureType requires a label or a source label")]
    MissingLabel,
    #[error("FeatureType:label_lang '{lang_tag}' does not match label language tag '{label_lang}'")]
    LabelLanguageMismatch { label_lang: String, lang_tag: String },
    #[error("FeatureType:id '{id}' does not match legacy identifier '{identifier}'")]
    IdentifierMismatch { id: String, identifier: String },
    #[error("ambiguous vocabulary match for '{label}': candidate term ids {candidates:?}")]
    AmbiguousMatch {
        label: String,
        candidates: Vec<String>,
    },

    // ---- wrong shapes ----
    #[error("{field} must be {expected}, found {found}")]
    Shape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("JSON parse error: {0}")]
    Json(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("vocabulary table error: {0}")]
    Vocabulary(String),

    // ---- recognized but unsupported ----
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, LpfError>;

// Helper conversions
impl From<serde_json::Error> for LpfError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<std::io::Error> for LpfError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Readable name for a JSON value's type, used in shape error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
