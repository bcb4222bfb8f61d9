//! linked-places – a typed in-memory model for the Linked Places Format.
//!
//! LPF is a JSON-based gazetteer exchange format layered on GeoJSON,
//! defined by <https://github.com/LinkedPasts/linked-places-format>. This
//! crate parses LPF JSON into a validated object graph
//! ([`gazetteer::FeatureCollection`] → [`gazetteer::Feature`] →
//! [`geometry::Geometry`] / [`gazetteer::FeatureType`] →
//! [`citation::Citation`]), enforces the format's structural and semantic
//! constraints at construction time, and serializes the validated model
//! back to JSON. A separate augmentation pass matches feature-type labels
//! against the Getty Art & Architecture Thesaurus and attaches citations
//! for confirmed matches.
//!
//! ## Modules
//! * [`gazetteer`] – Feature collections, features, and feature types.
//! * [`geometry`] – GeoJSON geometry validation plus the LPF certainty
//!   annotation.
//! * [`citation`] – Bibliographic citation records and their reasons.
//! * [`identifier`] – Typed scalar identifiers with kind inference.
//! * [`vocab`] – The AAT term matcher driving augmentation.
//! * [`text`] – Normalization, slugs, and language-tagged strings.
//! * [`error`] – The crate-wide error type.
//!
//! ## Quick Start
//! ```no_run
//! use linked_places::{loads, dumps};
//! use linked_places::vocab::AatMatcher;
//!
//! let document = std::fs::read_to_string("places.json").unwrap();
//! let mut collection = loads(&document).unwrap();
//! let matcher = AatMatcher::from_path("data/aat/aat_terms.json");
//! let appended = collection.augment(&matcher).unwrap();
//! println!("{} citations added", appended);
//! println!("{}", dumps(&collection).unwrap());
//! ```
//!
//! All validation is fail-fast: no partially-valid object is observable,
//! and a malformed element anywhere in a document aborts construction of
//! the whole enclosing aggregate.

pub mod citation;
pub mod error;
pub mod gazetteer;
pub mod geometry;
pub mod identifier;
pub mod text;
pub mod vocab;

use std::io::{Read, Write};

use serde_json::Value;

use crate::error::Result;
use crate::gazetteer::FeatureCollection;

pub use crate::error::LpfError;

/// Deserialize an LPF feature collection from a JSON string.
pub fn loads(s: &str) -> Result<FeatureCollection> {
    let value: Value = serde_json::from_str(s)?;
    FeatureCollection::from_value(&value)
}

/// Deserialize an LPF feature collection from a reader.
pub fn load<R: Read>(mut reader: R) -> Result<FeatureCollection> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    loads(&buffer)
}

/// Serialize a feature collection to a JSON string.
pub fn dumps(collection: &FeatureCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(&collection.asdict())?)
}

/// Serialize a feature collection to a writer.
pub fn dump<W: Write>(collection: &FeatureCollection, writer: W) -> Result<()> {
    Ok(serde_json::to_writer_pretty(writer, &collection.asdict())?)
}
