//! Getty Art & Architecture Thesaurus (AAT) term matching.
//!
//! The matcher consumes a precomputed lookup table, a JSON object mapping
//! AAT term id to an array of `{text, lang}` label objects (see the
//! `aat-terms` binary), and inverts it into `lowercased label -> term ids`
//! plus `term id -> representative label`. Loading happens once, on the
//! first match request, and is memoized for the matcher's lifetime.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::debug;

use crate::error::{LpfError, Result};
use crate::text::{LangString, MultiLangString};

/// AAT 300008347, "inhabited places". When a label matches several terms
/// this one wins; the preference is deliberately a single hard-coded id,
/// not a general disambiguation mechanism.
pub const INHABITED_PLACES: &str = "300008347";

/// Base URL for human-readable AAT term pages.
pub const AAT_PAGE_BASE: &str = "http://vocab.getty.edu/page/aat/";

#[derive(Debug, Default)]
struct TermTable {
    // lowercased label text -> term ids (sorted, so unions are deterministic)
    terms: HashMap<String, BTreeSet<String>>,
    // term id -> representative label: the first en-tagged label in table
    // order, else the id's first label in table order
    names: HashMap<String, String>,
}

impl TermTable {
    fn from_value(raw: &Value) -> Result<Self> {
        let object = raw.as_object().ok_or_else(|| {
            LpfError::Vocabulary("term table must be a JSON object keyed by term id".to_string())
        })?;
        let mut table = TermTable::default();
        for (term_id, labels) in object {
            let labels = labels.as_array().ok_or_else(|| {
                LpfError::Vocabulary(format!(
                    "labels for term '{term_id}' must be an array of {{text, lang}} objects"
                ))
            })?;
            let mut first_label = None;
            for label in labels {
                let text = label
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .trim()
                    .to_lowercase();
                if text.is_empty() {
                    continue;
                }
                if first_label.is_none() {
                    first_label = Some(text.clone());
                }
                table
                    .terms
                    .entry(text.clone())
                    .or_default()
                    .insert(term_id.clone());
                if label.get("lang").and_then(Value::as_str) == Some("en")
                    && !table.names.contains_key(term_id)
                {
                    table.names.insert(term_id.clone(), text);
                }
            }
            if let Some(fallback) = first_label {
                table.names.entry(term_id.clone()).or_insert(fallback);
            }
        }
        Ok(table)
    }
}

/// Matches feature-type labels against the AAT lookup table.
///
/// An explicit, injectable component: construct one and pass it to
/// whatever augments. Tests substitute a small fixed table via
/// [`AatMatcher::from_table`] without touching process state.
#[derive(Debug)]
pub struct AatMatcher {
    path: Option<PathBuf>,
    table: OnceCell<TermTable>,
}

impl AatMatcher {
    /// Lazy matcher over a table file; nothing is read until the first
    /// match request.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            table: OnceCell::new(),
        }
    }

    /// Immediate matcher over an in-memory table value.
    pub fn from_table(raw: &Value) -> Result<Self> {
        let table = OnceCell::new();
        let _ = table.set(TermTable::from_value(raw)?);
        Ok(Self { path: None, table })
    }

    fn table(&self) -> Result<&TermTable> {
        self.table.get_or_try_init(|| {
            let path = self.path.as_ref().ok_or_else(|| {
                LpfError::Vocabulary("matcher has no table and no path to load one from".to_string())
            })?;
            debug!(path = %path.display(), "loading AAT term table");
            let raw = fs::read_to_string(path).map_err(|e| {
                LpfError::Vocabulary(format!("cannot read term table {}: {e}", path.display()))
            })?;
            let raw: Value = serde_json::from_str(&raw).map_err(|e| {
                LpfError::Vocabulary(format!("cannot parse term table {}: {e}", path.display()))
            })?;
            TermTable::from_value(&raw)
        })
    }

    /// Match a label (plus optional aliases) against the table.
    ///
    /// Candidates are the lowercased, trimmed label text and all alias
    /// texts; hits across candidates are unioned. Returns `(term id,
    /// representative label)` pairs, sorted by term id.
    pub fn match_label(
        &self,
        label: &LangString,
        aliases: Option<&MultiLangString>,
    ) -> Result<Vec<(String, String)>> {
        let table = self.table()?;
        let mut candidates = vec![label.text().trim().to_lowercase()];
        if let Some(aliases) = aliases {
            candidates.extend(
                aliases
                    .to_langstrings()
                    .iter()
                    .map(|alias| alias.text().trim().to_lowercase()),
            );
        }
        let mut hits: BTreeSet<&str> = BTreeSet::new();
        for candidate in &candidates {
            if let Some(term_ids) = table.terms.get(candidate) {
                hits.extend(term_ids.iter().map(String::as_str));
            }
        }
        Ok(hits
            .into_iter()
            .map(|id| {
                (
                    id.to_string(),
                    table.names.get(id).cloned().unwrap_or_default(),
                )
            })
            .collect())
    }
}
