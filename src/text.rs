//! Text handling: normalization, slugs, and language-tagged strings.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Language tag used when no tag is known (BCP 47 "undetermined").
pub const UNDETERMINED_LANG: &str = "und";

lazy_static! {
    // compact "text@lang" form used by several LPF dialects
    static ref RX_LANG_STRING: Regex =
        Regex::new(r"^(?P<text>[^@]+?)(@(?P<lang>[a-zA-Z\-]+))?$").unwrap();
}

/// Apply Unicode NFC normalization and collapse all interior whitespace
/// runs to single spaces, trimming the ends. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase, hyphenated, ASCII-safe rendering of a string.
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}

// ------------- LangString -------------

/// A text value paired with a BCP 47-style language tag.
///
/// The tag is stored lowercased; an empty tag becomes [`UNDETERMINED_LANG`].
/// The text is stored as given. Callers that need normalized text apply
/// [`normalize_text`] before construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LangString {
    text: String,
    lang: String,
}

impl LangString {
    pub fn new(text: &str, lang: &str) -> Self {
        let lang = lang.trim().to_lowercase();
        Self {
            text: text.to_string(),
            lang: if lang.is_empty() {
                UNDETERMINED_LANG.to_string()
            } else {
                lang
            },
        }
    }

    /// Parse the compact `"text@lang"` form. A string without an `@lang`
    /// suffix yields the whole string tagged [`UNDETERMINED_LANG`].
    pub fn parse(compact: &str) -> Self {
        if let Some(captures) = RX_LANG_STRING.captures(compact) {
            let text = captures.name("text").map(|m| m.as_str()).unwrap_or(compact);
            let lang = captures.name("lang").map(|m| m.as_str()).unwrap_or("");
            Self::new(text, lang)
        } else {
            Self::new(compact, "")
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Same text under a different language tag.
    pub fn retagged(&self, lang: &str) -> Self {
        Self::new(&self.text, lang)
    }
}

impl fmt::Display for LangString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.text, self.lang)
    }
}

// ------------- MultiLangString -------------

/// A deduplicated set of texts grouped by language tag.
///
/// Iteration order is deterministic: language tags sort lexically and
/// texts keep insertion order within a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiLangString {
    entries: BTreeMap<String, Vec<String>>,
}

impl MultiLangString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tagged text. Returns false when the (lang, text) pair is
    /// already present.
    pub fn add(&mut self, value: LangString) -> bool {
        let texts = self.entries.entry(value.lang).or_default();
        if texts.contains(&value.text) {
            false
        } else {
            texts.push(value.text);
            true
        }
    }

    /// Texts recorded under one language tag.
    pub fn get(&self, lang: &str) -> &[String] {
        self.entries
            .get(&lang.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when any language carries this exact text.
    pub fn contains_text(&self, text: &str) -> bool {
        self.entries.values().any(|texts| texts.iter().any(|t| t == text))
    }

    pub fn langs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Flatten back into individual tagged strings.
    pub fn to_langstrings(&self) -> Vec<LangString> {
        self.entries
            .iter()
            .flat_map(|(lang, texts)| texts.iter().map(|t| LangString::new(t, lang)))
            .collect()
    }

    /// Total number of (lang, text) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
