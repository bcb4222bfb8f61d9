//! The gazetteer object graph: feature collections, features, and feature
//! types, following the GeoJSON feature model (RFC 7946 §3.2–3.3) with the
//! Linked Places extensions.
//!
//! Everything validates eagerly at construction; no partially-valid object
//! is ever observable. A single malformed element deep in a document
//! aborts construction of the whole enclosing aggregate.

use serde_json::{Map, Value};
use tracing::warn;

use crate::citation::{Citation, CitationReason};
use crate::error::{json_kind, LpfError, Result};
use crate::geometry::{is_empty_member, Geometry};
use crate::identifier::{make_identifier, Identifier};
use crate::text::{normalize_text, slugify, LangString, MultiLangString};
use crate::vocab::{AatMatcher, AAT_PAGE_BASE, INHABITED_PLACES};

/// Published LPF v1.1 context document.
pub const DEFAULT_LPF_CONTEXT: &str =
    "https://raw.githubusercontent.com/LinkedPasts/linked-places/master/linkedplaces-context-v1.1.jsonld";

// Citation template for accepted AAT matches.
const AAT_SHORT_TITLE: &str = "Getty AAT";
const AAT_FORMATTED_CITATION: &str = "Getty Art & Architecture Thesaurus Online. \
     Getty Research Institute, 2017-. https://www.getty.edu/research/tools/vocabularies/aat/.";
const AAT_BIBLIOGRAPHIC_URL: &str = "https://www.zotero.org/groups/2533/pleiades/items/MI9KTADL";

/// Description of an LPF feature class, or None for an unknown code.
pub fn fclass_description(fclass: &str) -> Option<&'static str> {
    match fclass {
        "A" => Some("Administrative entities (e.g. countries, provinces, municipalities)"),
        "H" => Some("Water bodies (e.g. rivers, lakes, bays, seas)"),
        "L" => Some("Regions, landscape areas (cultural, geographic, historical)"),
        "P" => Some("Populated places (e.g. cities, towns, hamlets)"),
        "R" => Some("Roads, routes, rail"),
        "S" => Some("Sites (e.g. archaeological sites, buildings, complexes)"),
        "T" => Some("Terrestrial landforms (e.g. mountains, valleys, capes)"),
        _ => None,
    }
}

// ------------- shape-polymorphic inputs -------------

/// The three shapes a textual field arrives in across LPF dialects:
/// a plain string (optionally in compact `"text@lang"` form), a tagged
/// string, or a raw `{text, lang}` mapping. Inputs normalize to a
/// [`LangString`] before any validation runs.
#[derive(Debug, Clone)]
pub enum TextInput {
    Plain(String),
    Tagged(LangString),
    Mapping(Map<String, Value>),
}

impl TextInput {
    pub fn from_value(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::String(s) => Ok(TextInput::Plain(s.clone())),
            Value::Object(map) => Ok(TextInput::Mapping(map.clone())),
            other => Err(LpfError::Shape {
                field: field.to_string(),
                expected: "a string or a {text, lang} object",
                found: json_kind(other),
            }),
        }
    }

    /// Canonical internal representation: normalized text plus a tag.
    fn into_langstring(self) -> LangString {
        match self {
            TextInput::Plain(s) => {
                let parsed = LangString::parse(&s);
                LangString::new(&normalize_text(parsed.text()), parsed.lang())
            }
            TextInput::Tagged(ls) => LangString::new(&normalize_text(ls.text()), ls.lang()),
            TextInput::Mapping(map) => {
                let text = map.get("text").and_then(Value::as_str).unwrap_or("");
                let lang = map.get("lang").and_then(Value::as_str).unwrap_or("");
                LangString::new(&normalize_text(text), lang)
            }
        }
    }
}

impl From<&str> for TextInput {
    fn from(s: &str) -> Self {
        TextInput::Plain(s.to_string())
    }
}

impl From<String> for TextInput {
    fn from(s: String) -> Self {
        TextInput::Plain(s)
    }
}

impl From<LangString> for TextInput {
    fn from(ls: LangString) -> Self {
        TextInput::Tagged(ls)
    }
}

/// Accepted shapes for a feature type's alias set: a list of strings or
/// tagged strings, a mapping keyed by language tag, or a ready container.
#[derive(Debug, Clone)]
pub enum AliasesInput {
    List(Vec<TextInput>),
    ByLanguage(Map<String, Value>),
    Container(MultiLangString),
}

impl AliasesInput {
    pub fn from_value(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let inputs = items
                    .iter()
                    .map(|item| TextInput::from_value(item, field))
                    .collect::<Result<Vec<_>>>()?;
                Ok(AliasesInput::List(inputs))
            }
            Value::Object(map) => Ok(AliasesInput::ByLanguage(map.clone())),
            other => Err(LpfError::Shape {
                field: field.to_string(),
                expected: "a list of aliases or a mapping keyed by language",
                found: json_kind(other),
            }),
        }
    }
}

impl From<MultiLangString> for AliasesInput {
    fn from(container: MultiLangString) -> Self {
        AliasesInput::Container(container)
    }
}

// ------------- FeatureType -------------

/// Serialization modes for a feature type: the full record including
/// aliases and citations, or the compact legacy summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSerialization {
    Full,
    Summary,
}

/// One classification applied to a feature (e.g. "settlement"): a
/// lowercased, normalized label, an identifier (derived from the label
/// when absent), a deduplicated alias set, and supporting citations.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureType {
    id: Identifier,
    label: LangString,
    aliases: MultiLangString,
    citations: Vec<Citation>,
}

impl FeatureType {
    /// Feature type from a label alone; the identifier is derived by
    /// slugifying the label.
    pub fn new(label: impl Into<TextInput>) -> Result<Self> {
        Self::build(label.into(), None, None, None)
    }

    /// Feature type with an explicit identifier.
    pub fn with_id(id: &str, label: impl Into<TextInput>) -> Result<Self> {
        Self::build(label.into(), None, Some(id), None)
    }

    fn build(
        label: TextInput,
        lang_tag: Option<&str>,
        id: Option<&str>,
        legacy_identifier: Option<&str>,
    ) -> Result<Self> {
        let label = resolve_label(label, lang_tag)?;
        let id = resolve_identifier(id, legacy_identifier, &label)?;
        Ok(Self {
            id,
            label,
            aliases: MultiLangString::new(),
            citations: Vec::new(),
        })
    }

    /// Build from the mapping form found in LPF documents, unifying the
    /// legacy field variants: `label` with `sourceLabel` as fallback,
    /// `id` with legacy `identifier`, `aliases` merged with legacy
    /// `sourceLabels`. A legacy single source label that differs from the
    /// canonical label folds in as an additional alias.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| LpfError::Shape {
            field: "Feature:types".to_string(),
            expected: "a list of feature type objects",
            found: json_kind(value),
        })?;

        let source_label = match object.get("sourceLabel") {
            None | Some(Value::Null) => None,
            Some(v) => Some(TextInput::from_value(v, "FeatureType:sourceLabel")?),
        };
        let label = match object.get("label") {
            None | Some(Value::Null) => source_label.clone().ok_or(LpfError::MissingLabel)?,
            Some(v) => TextInput::from_value(v, "FeatureType:label")?,
        };

        let id = optional_str(object, "id", "FeatureType:id")?
            .or(optional_str(object, "@id", "FeatureType:@id")?);
        let legacy_identifier = optional_str(object, "identifier", "FeatureType:identifier")?;

        let mut feature_type = Self::build(label, None, id, legacy_identifier)?;

        if let Some(aliases) = object.get("aliases") {
            feature_type.set_aliases(AliasesInput::from_value(aliases, "FeatureType:aliases")?)?;
        }
        if let Some(source_labels) = object.get("sourceLabels") {
            let merged =
                AliasesInput::from_value(source_labels, "FeatureType:sourceLabels")?;
            feature_type.merge_aliases(merged)?;
        }
        // a divergent legacy source label survives as an alias
        if let Some(source_label) = source_label {
            let source_label = source_label.into_langstring();
            if !source_label.text().is_empty()
                && source_label.text().to_lowercase() != feature_type.label.text()
            {
                feature_type.aliases.add(source_label);
            }
        }

        if let Some(citations) = object.get("citations") {
            let items = citations.as_array().ok_or_else(|| LpfError::Shape {
                field: "FeatureType:citations".to_string(),
                expected: "a list of citation objects",
                found: json_kind(citations),
            })?;
            for item in items {
                feature_type.citations.push(Citation::from_value(item)?);
            }
        }

        if !is_empty_member(object.get("when")) {
            return Err(LpfError::NotImplemented(
                "temporal scoping (when) on feature types",
            ));
        }

        Ok(feature_type)
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn label(&self) -> &LangString {
        &self.label
    }

    /// Replace the label, re-running construction-time validation. An
    /// explicit `lang_tag` must agree with any tag the input carries,
    /// except that it fills in an undetermined one.
    pub fn set_label(&mut self, label: impl Into<TextInput>, lang_tag: Option<&str>) -> Result<()> {
        self.label = resolve_label(label.into(), lang_tag)?;
        Ok(())
    }

    pub fn aliases(&self) -> &MultiLangString {
        &self.aliases
    }

    pub fn add_alias(&mut self, alias: impl Into<TextInput>) -> bool {
        self.aliases.add(alias.into().into_langstring())
    }

    /// Replace the alias set.
    pub fn set_aliases(&mut self, aliases: AliasesInput) -> Result<()> {
        self.aliases = MultiLangString::new();
        self.merge_aliases(aliases)
    }

    fn merge_aliases(&mut self, aliases: AliasesInput) -> Result<()> {
        match aliases {
            AliasesInput::List(inputs) => {
                for input in inputs {
                    self.aliases.add(input.into_langstring());
                }
            }
            AliasesInput::ByLanguage(map) => {
                for (lang, texts) in &map {
                    let texts = texts.as_array().ok_or_else(|| LpfError::Shape {
                        field: format!("FeatureType:aliases[{lang}]"),
                        expected: "a list of strings",
                        found: json_kind(texts),
                    })?;
                    for text in texts {
                        let text = text.as_str().ok_or_else(|| LpfError::Shape {
                            field: format!("FeatureType:aliases[{lang}]"),
                            expected: "a list of strings",
                            found: json_kind(text),
                        })?;
                        self.aliases
                            .add(LangString::new(&normalize_text(text), lang));
                    }
                }
            }
            AliasesInput::Container(container) => {
                for alias in container.to_langstrings() {
                    self.aliases
                        .add(LangString::new(&normalize_text(alias.text()), alias.lang()));
                }
            }
        }
        Ok(())
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn add_citation(&mut self, citation: Citation) {
        self.citations.push(citation);
    }

    /// Match the label and aliases against the AAT table and attach a
    /// citation for a confirmed match.
    ///
    /// Zero hits is a no-op. A unique hit is accepted. Several hits are
    /// accepted only when one of them is [`INHABITED_PLACES`], which then
    /// wins; otherwise the match is ambiguous and fails, naming all
    /// candidates. A term this type already cites is not cited again, so
    /// repeated augmentation is a no-op. Returns true when a citation was
    /// appended.
    pub fn augment(&mut self, matcher: &AatMatcher) -> Result<bool> {
        let hits = matcher.match_label(&self.label, Some(&self.aliases))?;
        let (term_id, term_label) = match hits.as_slice() {
            [] => return Ok(false),
            [only] => only.clone(),
            several => match several.iter().find(|(id, _)| id == INHABITED_PLACES) {
                Some(preferred) => preferred.clone(),
                None => {
                    return Err(LpfError::AmbiguousMatch {
                        label: self.label.text().to_string(),
                        candidates: several.iter().map(|(id, _)| id.clone()).collect(),
                    })
                }
            },
        };

        let access_url = format!("{AAT_PAGE_BASE}{term_id}");
        if self
            .citations
            .iter()
            .any(|citation| citation.access_url() == Some(access_url.as_str()))
        {
            return Ok(false);
        }

        let mut citation = Citation::new(&access_url)?;
        citation.set_short_title(AAT_SHORT_TITLE);
        citation.set_formatted_citation(AAT_FORMATTED_CITATION);
        citation.set_access_url(&access_url)?;
        citation.set_bibliographic_url(AAT_BIBLIOGRAPHIC_URL)?;
        citation.set_citation_detail(&format!("{term_id}: {term_label}"));
        citation.set_reason(CitationReason::CloseMatch);
        self.citations.push(citation);
        Ok(true)
    }

    pub fn asdict(&self, mode: TypeSerialization) -> Value {
        let mut result = Map::new();
        match mode {
            TypeSerialization::Full => {
                result.insert(
                    "@id".to_string(),
                    Value::String(self.id.value().to_string()),
                );
                result.insert("label".to_string(), langstring_value(&self.label));
                if !self.aliases.is_empty() {
                    result.insert(
                        "aliases".to_string(),
                        Value::Array(
                            self.aliases
                                .to_langstrings()
                                .iter()
                                .map(langstring_value)
                                .collect(),
                        ),
                    );
                }
                if !self.citations.is_empty() {
                    result.insert(
                        "citations".to_string(),
                        Value::Array(self.citations.iter().map(Citation::asdict).collect()),
                    );
                }
            }
            TypeSerialization::Summary => {
                result.insert(
                    "identifier".to_string(),
                    Value::String(self.id.value().to_string()),
                );
                result.insert(
                    "label".to_string(),
                    Value::String(self.label.text().to_string()),
                );
                // label plus aliases, label first, no duplicates
                let mut source_labels = vec![langstring_value(&self.label)];
                for alias in self.aliases.to_langstrings() {
                    if alias.text() != self.label.text() {
                        source_labels.push(langstring_value(&alias));
                    }
                }
                result.insert("sourceLabels".to_string(), Value::Array(source_labels));
                result.insert("when".to_string(), Value::Object(Map::new()));
            }
        }
        Value::Object(result)
    }
}

fn langstring_value(ls: &LangString) -> Value {
    let mut map = Map::new();
    map.insert("text".to_string(), Value::String(ls.text().to_string()));
    map.insert("lang".to_string(), Value::String(ls.lang().to_string()));
    Value::Object(map)
}

fn resolve_label(label: TextInput, lang_tag: Option<&str>) -> Result<LangString> {
    let label = match (label, lang_tag) {
        (TextInput::Tagged(ls), Some(tag)) => {
            let tag = tag.trim().to_lowercase();
            if tag != "und" && ls.lang() == "und" {
                ls.retagged(&tag)
            } else if tag != ls.lang() {
                return Err(LpfError::LabelLanguageMismatch {
                    label_lang: ls.lang().to_string(),
                    lang_tag: tag,
                });
            } else {
                ls
            }
        }
        // an explicit tag suppresses compact-form parsing
        (TextInput::Plain(s), Some(tag)) => LangString::new(&s, tag),
        (label, _) => label.into_langstring(),
    };
    let text = normalize_text(label.text()).to_lowercase();
    if text.is_empty() {
        return Err(LpfError::MissingLabel);
    }
    Ok(LangString::new(&text, label.lang()))
}

fn resolve_identifier(
    id: Option<&str>,
    legacy_identifier: Option<&str>,
    label: &LangString,
) -> Result<Identifier> {
    match (id, legacy_identifier) {
        (Some(id), Some(identifier)) => {
            let id = normalize_text(id);
            let identifier = normalize_text(identifier);
            if id != identifier {
                return Err(LpfError::IdentifierMismatch { id, identifier });
            }
            make_identifier(&id, None)
        }
        (Some(value), None) | (None, Some(value)) => make_identifier(value, None),
        (None, None) => {
            let slug = slugify(label.text());
            warn!(
                label = %label.text(),
                slug = %slug,
                "no identifier supplied for feature type; deriving one from the label"
            );
            make_identifier(&slug, None)
        }
    }
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<Option<&'a str>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(LpfError::Shape {
            field: field.to_string(),
            expected: "a string",
            found: json_kind(other),
        }),
    }
}

// ------------- Feature -------------

/// A single place record: optional geometry, the required LPF properties,
/// an optional document identifier, and its feature types.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: Option<Geometry>,
    properties: Map<String, Value>,
    id: Option<Value>,
    types: Vec<FeatureType>,
}

impl Feature {
    pub fn new(properties: Map<String, Value>) -> Result<Self> {
        Self::with_parts(None, properties, None, Vec::new())
    }

    pub fn with_parts(
        geometry: Option<Geometry>,
        properties: Map<String, Value>,
        id: Option<Value>,
        types: Vec<FeatureType>,
    ) -> Result<Self> {
        validate_properties(&properties)?;
        if let Some(id) = &id {
            validate_feature_id(id)?;
        }
        Ok(Self {
            geometry,
            properties,
            id,
            types,
        })
    }

    /// Build from a GeoJSON feature object. Geometry and types are
    /// accepted in their raw mapping forms; unrecognized members (names,
    /// links, relations, descriptions, depictions, ...) are ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| LpfError::Shape {
            field: "FeatureCollection:features".to_string(),
            expected: "a list of feature objects",
            found: json_kind(value),
        })?;
        if let Some(discriminator) = object.get("type") {
            if discriminator.as_str() != Some("Feature") {
                return Err(LpfError::Shape {
                    field: "Feature:type".to_string(),
                    expected: "the string \"Feature\"",
                    found: json_kind(discriminator),
                });
            }
        }

        let geometry = match object.get("geometry") {
            None | Some(Value::Null) => None,
            Some(v) => Some(Geometry::from_value(v)?),
        };

        let properties = match object.get("properties") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                return Err(LpfError::Shape {
                    field: "Feature:properties".to_string(),
                    expected: "an object",
                    found: json_kind(other),
                })
            }
        };

        let id = object.get("@id").or_else(|| object.get("id")).cloned();

        let types = match object.get("types") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(FeatureType::from_value)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(LpfError::Shape {
                    field: "Feature:types".to_string(),
                    expected: "an array",
                    found: json_kind(other),
                })
            }
        };

        Self::with_parts(geometry, properties, id, types)
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    pub fn types(&self) -> &[FeatureType] {
        &self.types
    }

    pub fn add_type(&mut self, feature_type: FeatureType) {
        self.types.push(feature_type);
    }

    /// Augment every feature type in list order. Returns the number of
    /// citations appended.
    pub fn augment(&mut self, matcher: &AatMatcher) -> Result<usize> {
        let mut appended = 0;
        for feature_type in &mut self.types {
            if feature_type.augment(matcher)? {
                appended += 1;
            }
        }
        Ok(appended)
    }

    /// Mapping representation. Geometry and the other LPF extension
    /// fields are not yet emitted.
    pub fn asdict(&self) -> Value {
        let mut result = Map::new();
        result.insert("type".to_string(), Value::String("Feature".to_string()));
        result.insert(
            "properties".to_string(),
            Value::Object(self.properties.clone()),
        );
        result.insert(
            "types".to_string(),
            Value::Array(
                self.types
                    .iter()
                    .map(|t| t.asdict(TypeSerialization::Full))
                    .collect(),
            ),
        );
        if let Some(id) = &self.id {
            result.insert("@id".to_string(), id.clone());
        }
        Value::Object(result)
    }
}

fn validate_feature_id(id: &Value) -> Result<()> {
    match id {
        Value::String(_) | Value::Number(_) => Ok(()),
        other => Err(LpfError::Shape {
            field: "Feature:id".to_string(),
            expected: "a string or a number",
            found: json_kind(other),
        }),
    }
}

/// Validate a properties mapping against the LPF schema:
/// `title` a string, `ccodes` a list of strings, `fclasses` a list of
/// strings drawn from the seven LPF feature classes.
fn validate_properties(properties: &Map<String, Value>) -> Result<()> {
    let title = properties
        .get("title")
        .ok_or(LpfError::MissingProperty("title"))?;
    if !title.is_string() {
        return Err(LpfError::Shape {
            field: "Feature:properties[title]".to_string(),
            expected: "a string",
            found: json_kind(title),
        });
    }
    for key in ["ccodes", "fclasses"] {
        let list = properties.get(key).ok_or(match key {
            "ccodes" => LpfError::MissingProperty("ccodes"),
            _ => LpfError::MissingProperty("fclasses"),
        })?;
        let items = list.as_array().ok_or_else(|| LpfError::Shape {
            field: format!("Feature:properties[{key}]"),
            expected: "a list",
            found: json_kind(list),
        })?;
        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                return Err(LpfError::Shape {
                    field: format!("Feature:properties[{key}][{i}]"),
                    expected: "a string",
                    found: json_kind(item),
                });
            }
        }
    }
    // accepted as-is; ISO validation is an acknowledged gap
    warn!("country codes in Feature:properties['ccodes'] are not validated");
    if let Some(fclasses) = properties.get("fclasses").and_then(Value::as_array) {
        for (i, fclass) in fclasses.iter().enumerate() {
            let fclass = fclass.as_str().unwrap_or_default();
            if fclass_description(fclass).is_none() {
                return Err(LpfError::InvalidFeatureClass {
                    value: fclass.to_string(),
                    position: i,
                });
            }
        }
    }
    Ok(())
}

// ------------- FeatureCollection -------------

/// Top-level LPF aggregate: a context URI and an ordered list of
/// features. Root of the object graph; mutated only through
/// [`FeatureCollection::augment`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    context: String,
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            context: DEFAULT_LPF_CONTEXT.to_string(),
            features,
        }
    }

    pub fn with_context(context: &str, features: Vec<Feature>) -> Self {
        Self {
            context: context.to_string(),
            features,
        }
    }

    /// Build from a top-level LPF document object. `@context` is accepted
    /// under its legacy unprefixed name as well and defaults to the
    /// published LPF v1.1 context.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| LpfError::Shape {
            field: "FeatureCollection".to_string(),
            expected: "an object",
            found: json_kind(value),
        })?;
        if let Some(discriminator) = object.get("type") {
            if discriminator.as_str() != Some("FeatureCollection") {
                return Err(LpfError::Shape {
                    field: "FeatureCollection:type".to_string(),
                    expected: "the string \"FeatureCollection\"",
                    found: json_kind(discriminator),
                });
            }
        }
        let context = match object.get("@context").or_else(|| object.get("context")) {
            None | Some(Value::Null) => DEFAULT_LPF_CONTEXT.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(LpfError::Shape {
                    field: "FeatureCollection:@context".to_string(),
                    expected: "a string",
                    found: json_kind(other),
                })
            }
        };
        let features = match object.get("features") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(Feature::from_value)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(LpfError::Shape {
                    field: "FeatureCollection:features".to_string(),
                    expected: "an array",
                    found: json_kind(other),
                })
            }
        };
        Ok(Self { context, features })
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Augment every feature in list order, entirely sequentially; the
    /// first failure aborts the whole pass. Returns the number of
    /// citations appended across the collection.
    pub fn augment(&mut self, matcher: &AatMatcher) -> Result<usize> {
        let mut appended = 0;
        for feature in &mut self.features {
            appended += feature.augment(matcher)?;
        }
        Ok(appended)
    }

    pub fn asdict(&self) -> Value {
        let mut result = Map::new();
        result.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );
        result.insert(
            "features".to_string(),
            Value::Array(self.features.iter().map(Feature::asdict).collect()),
        );
        result.insert(
            "@context".to_string(),
            Value::String(self.context.clone()),
        );
        Value::Object(result)
    }
}
