//! aat-terms – convert a Getty AAT TERM.out dump into the JSON lookup
//! table consumed by [`linked_places::vocab::AatMatcher`].
//!
//! TERM.out is a tab-delimited export of the AAT term list; the subject
//! id sits in column 10 and the term text in column 11. Output is a JSON
//! object mapping term id to an array of `{text, lang}` label objects, in
//! first-seen order. Unlike the engine, this tool skips malformed rows
//! with a logged warning instead of failing.
//!
//! Usage: `aat-terms [TERM.out [OUTPUT.json]]` (stdout when no output
//! path is given).

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use serde_json::{json, Map, Value};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use linked_places::text::normalize_text;

const DEFAULT_INPUT: &str = "data/aat/TERM.out";
const ID_COLUMN: usize = 9;
const TERM_COLUMN: usize = 10;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let input = args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUT);
    let output = args.get(2).map(String::as_str);

    match run(input, output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("aat-terms: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &str, output: Option<&str>) -> Result<usize, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(input)?;

    let mut terms: Map<String, Value> = Map::new();
    for (row_number, record) in reader.records().enumerate() {
        let record = record?;
        let id = match record.get(ID_COLUMN) {
            Some(id) if !normalize_text(id).is_empty() => normalize_text(id),
            _ => {
                warn!(row = row_number, "skipping row with no id");
                continue;
            }
        };
        let term = swap_comma_parts(&normalize_text(record.get(TERM_COLUMN).unwrap_or("")));
        if term.is_empty() {
            warn!(row = row_number, id, "skipping row with no term");
            continue;
        }
        let labels = terms
            .entry(id)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(labels) = labels {
            let label = json!({ "text": term, "lang": "en" });
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }

    let count = terms.len();
    let rendered = serde_json::to_string_pretty(&Value::Object(terms))?;
    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(rendered.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(count)
}

/// AAT inverts multiword terms ("places, inhabited"); restore natural
/// order for two-part terms.
fn swap_comma_parts(term: &str) -> String {
    let parts: Vec<&str> = term
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() == 2 {
        format!("{} {}", parts[1], parts[0])
    } else {
        term.to_string()
    }
}
