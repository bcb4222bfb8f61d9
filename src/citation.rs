//! Bibliographic citations attached to feature types.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use url::Url;

use crate::error::{json_kind, LpfError, Result};
use crate::identifier::{make_identifier, Identifier, IdentifierKind};
use crate::text::normalize_text;

/// Hosts accepted for `bibliographic_url`: the bibliographic services the
/// gazetteer links out to.
pub const BIBLIOGRAPHIC_HOSTS: [&str; 2] = ["www.zotero.org", "search.worldcat.org"];

// ------------- CitationReason -------------

/// The semantic relationship a citation expresses. Validated on
/// construction, exported as metadata; drives no other behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CitationReason {
    #[default]
    Cites,
    DataSource,
    Evidence,
    Related,
    CloseMatch,
}

impl CitationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationReason::Cites => "cites",
            CitationReason::DataSource => "dataSource",
            CitationReason::Evidence => "evidence",
            CitationReason::Related => "related",
            CitationReason::CloseMatch => "closeMatch",
        }
    }

    /// CiTO / SKOS property URI for the relationship.
    pub fn uri(&self) -> &'static str {
        match self {
            CitationReason::Cites => "http://purl.org/spar/cito/cites",
            CitationReason::DataSource => "http://purl.org/spar/cito/citesAsDataSource",
            CitationReason::Evidence => "http://purl.org/spar/cito/citesAsEvidence",
            CitationReason::Related => "http://purl.org/spar/cito/citesAsRelated",
            CitationReason::CloseMatch => "http://www.w3.org/2004/02/skos/core#closeMatch",
        }
    }
}

impl FromStr for CitationReason {
    type Err = LpfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cites" => Ok(CitationReason::Cites),
            "dataSource" => Ok(CitationReason::DataSource),
            "evidence" => Ok(CitationReason::Evidence),
            "related" => Ok(CitationReason::Related),
            "closeMatch" => Ok(CitationReason::CloseMatch),
            other => Err(LpfError::InvalidCitationReason(other.to_string())),
        }
    }
}

impl fmt::Display for CitationReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ------------- Citation -------------

/// Cites a single addressable component of a bibliographic work or other
/// reference. Owned by exactly one feature type. Every setter re-runs the
/// same validation as construction; text fields are normalized on the way
/// in.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    id: Identifier,
    short_title: String,
    formatted_citation: String,
    access_url: Option<Identifier>,
    bibliographic_url: Option<Identifier>,
    citation_detail: String,
    reason: CitationReason,
}

impl Citation {
    /// Minimal citation: an identifier (kind inferred) and the default
    /// `cites` reason.
    pub fn new(id: &str) -> Result<Self> {
        Ok(Self::with_identifier(make_identifier(id, None)?))
    }

    pub fn with_identifier(id: Identifier) -> Self {
        Self {
            id,
            short_title: String::new(),
            formatted_citation: String::new(),
            access_url: None,
            bibliographic_url: None,
            citation_detail: String::new(),
            reason: CitationReason::default(),
        }
    }

    /// Build from the mapping form found in LPF documents.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| LpfError::Shape {
            field: "FeatureType:citations".to_string(),
            expected: "a list of citation objects",
            found: json_kind(value),
        })?;
        let id = require_string(object, "id", "@id")?;
        let mut citation = Citation::new(id)?;
        if let Some(short_title) = optional_string(object, "short_title")? {
            citation.set_short_title(short_title);
        }
        if let Some(formatted) = optional_string(object, "formatted_citation")? {
            citation.set_formatted_citation(formatted);
        }
        if let Some(access_url) = optional_string(object, "access_url")? {
            citation.set_access_url(access_url)?;
        }
        if let Some(bibliographic_url) = optional_string(object, "bibliographic_url")? {
            citation.set_bibliographic_url(bibliographic_url)?;
        }
        if let Some(detail) = optional_string(object, "citation_detail")? {
            citation.set_citation_detail(detail);
        }
        if let Some(reason) = optional_string(object, "reason")? {
            citation.set_reason(reason.parse()?);
        }
        Ok(citation)
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn short_title(&self) -> &str {
        &self.short_title
    }

    pub fn set_short_title(&mut self, short_title: &str) {
        self.short_title = normalize_text(short_title);
    }

    pub fn formatted_citation(&self) -> &str {
        &self.formatted_citation
    }

    pub fn set_formatted_citation(&mut self, formatted_citation: &str) {
        self.formatted_citation = normalize_text(formatted_citation);
    }

    pub fn access_url(&self) -> Option<&str> {
        self.access_url.as_ref().map(Identifier::value)
    }

    pub fn set_access_url(&mut self, access_url: &str) -> Result<()> {
        self.access_url = Some(Identifier::new(IdentifierKind::Url, access_url)?);
        Ok(())
    }

    pub fn bibliographic_url(&self) -> Option<&str> {
        self.bibliographic_url.as_ref().map(Identifier::value)
    }

    /// The bibliographic URL must be a valid URL whose host belongs to
    /// [`BIBLIOGRAPHIC_HOSTS`].
    pub fn set_bibliographic_url(&mut self, bibliographic_url: &str) -> Result<()> {
        let id = Identifier::new(IdentifierKind::Url, bibliographic_url)?;
        let host = Url::parse(id.value())
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_default();
        if !BIBLIOGRAPHIC_HOSTS.contains(&host.as_str()) {
            return Err(LpfError::InvalidCitationUrl {
                url: id.value().to_string(),
                hosts: BIBLIOGRAPHIC_HOSTS.join(", "),
            });
        }
        self.bibliographic_url = Some(id);
        Ok(())
    }

    pub fn citation_detail(&self) -> &str {
        &self.citation_detail
    }

    pub fn set_citation_detail(&mut self, citation_detail: &str) {
        self.citation_detail = normalize_text(citation_detail);
    }

    pub fn reason(&self) -> CitationReason {
        self.reason
    }

    pub fn set_reason(&mut self, reason: CitationReason) {
        self.reason = reason;
    }

    /// Mapping representation. Sparse: `@id` and `reason` always appear,
    /// other fields only when non-empty.
    pub fn asdict(&self) -> Value {
        let mut result = Map::new();
        result.insert("@id".to_string(), Value::String(self.id.value().to_string()));
        result.insert(
            "reason".to_string(),
            Value::String(self.reason.as_str().to_string()),
        );
        if !self.short_title.is_empty() {
            result.insert(
                "short_title".to_string(),
                Value::String(self.short_title.clone()),
            );
        }
        if !self.formatted_citation.is_empty() {
            result.insert(
                "formatted_citation".to_string(),
                Value::String(self.formatted_citation.clone()),
            );
        }
        if let Some(access_url) = self.access_url() {
            result.insert(
                "access_url".to_string(),
                Value::String(access_url.to_string()),
            );
        }
        if let Some(bibliographic_url) = self.bibliographic_url() {
            result.insert(
                "bibliographic_url".to_string(),
                Value::String(bibliographic_url.to_string()),
            );
        }
        if !self.citation_detail.is_empty() {
            result.insert(
                "citation_detail".to_string(),
                Value::String(self.citation_detail.clone()),
            );
        }
        Value::Object(result)
    }
}

fn require_string<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
    alias: &'static str,
) -> Result<&'a str> {
    let value = object
        .get(key)
        .or_else(|| object.get(alias))
        .ok_or_else(|| LpfError::Shape {
            field: format!("Citation:{key}"),
            expected: "a string",
            found: "null",
        })?;
    value.as_str().ok_or_else(|| LpfError::Shape {
        field: format!("Citation:{key}"),
        expected: "a string",
        found: json_kind(value),
    })
}

fn optional_string<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a str>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(LpfError::Shape {
            field: format!("Citation:{key}"),
            expected: "a string",
            found: json_kind(other),
        }),
    }
}
