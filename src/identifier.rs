//! Typed, validated scalar identifiers.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::error::{LpfError, Result};
use crate::text::normalize_text;

lazy_static! {
    static ref RX_ALPHANUMERIC: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
    static ref RX_DELIMITED: Regex = Regex::new(r"^[A-Za-z0-9\-_,.:]+$").unwrap();
    static ref RX_DELIMITER: Regex = Regex::new(r"[-_,.:]").unwrap();
}

/// Syntactic URL check: the value must parse as an absolute URL and carry
/// a host. Requiring a host keeps scheme-only strings such as `a:b` out of
/// the `url` identifier kind.
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

// ------------- IdentifierKind -------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Alphanumeric,
    AlphanumericDelimited,
    Url,
}

impl IdentifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Alphanumeric => "alphanumeric",
            IdentifierKind::AlphanumericDelimited => "alphanumeric-delimited",
            IdentifierKind::Url => "url",
        }
    }
}

impl FromStr for IdentifierKind {
    type Err = LpfError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_text(s).as_str() {
            "alphanumeric" => Ok(IdentifierKind::Alphanumeric),
            "alphanumeric-delimited" => Ok(IdentifierKind::AlphanumericDelimited),
            "url" => Ok(IdentifierKind::Url),
            other => Err(LpfError::UnknownIdentifierKind(other.to_string())),
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ------------- Identifier -------------

/// A string identifier validated against the constraint of its kind.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: IdentifierKind,
    value: String,
}

impl Identifier {
    pub fn new(kind: IdentifierKind, value: &str) -> Result<Self> {
        let value = normalize_text(value);
        match kind {
            IdentifierKind::Alphanumeric => {
                if !RX_ALPHANUMERIC.is_match(&value) {
                    return Err(LpfError::InvalidIdentifier {
                        kind: kind.as_str(),
                        value,
                        constraint: "must contain only letters and numbers",
                    });
                }
            }
            IdentifierKind::AlphanumericDelimited => {
                if !RX_DELIMITED.is_match(&value) {
                    return Err(LpfError::InvalidIdentifier {
                        kind: kind.as_str(),
                        value,
                        constraint:
                            "may contain only letters, numbers, and the delimiters - _ , . :",
                    });
                }
            }
            IdentifierKind::Url => {
                if !is_valid_url(&value) {
                    return Err(LpfError::InvalidIdentifier {
                        kind: kind.as_str(),
                        value,
                        constraint: "must be a syntactically valid URL",
                    });
                }
            }
        }
        Ok(Self { kind, value })
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Build an identifier, inferring its kind when none is supplied.
///
/// Inference order is fixed and significant, most specific first:
/// a syntactically valid URL wins, then a value carrying at least one
/// delimiter character, then plain alphanumeric as the catch-all. Later
/// checks never run once an earlier one matches.
pub fn make_identifier(value: &str, kind: Option<IdentifierKind>) -> Result<Identifier> {
    let normalized = normalize_text(value);
    let kind = match kind {
        Some(kind) => kind,
        None => {
            if is_valid_url(&normalized) {
                IdentifierKind::Url
            } else if RX_DELIMITED.is_match(&normalized) && RX_DELIMITER.is_match(&normalized) {
                IdentifierKind::AlphanumericDelimited
            } else {
                IdentifierKind::Alphanumeric
            }
        }
    };
    Identifier::new(kind, &normalized)
}
