//! Remote object metadata derived from manifest rows
//!
//! Every manifest column other than `file` and `identifier` becomes a
//! metadata field on the uploaded object. Values are sanitized so that
//! malformed or binary CSV cells never reach the remote metadata API.

use crate::manifest::{Row, FILE_COLUMN, IDENTIFIER_COLUMN};
use std::collections::BTreeMap;

/// Metadata field naming the object's classification when one is configured
pub const MEDIATYPE_FIELD: &str = "mediatype";

/// Derive the metadata mapping for a row
///
/// Drops the control columns, sanitizes every remaining value, and inserts
/// the classification field only when the operator configured one.
pub fn normalize(row: &Row, mediatype: Option<&str>) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    if let Some(mediatype) = mediatype {
        metadata.insert(MEDIATYPE_FIELD.to_string(), mediatype.to_string());
    }

    for (column, value) in row.columns() {
        if column == FILE_COLUMN || column == IDENTIFIER_COLUMN {
            continue;
        }
        metadata.insert(column.to_string(), sanitize(value));
    }

    metadata
}

/// Replace each run of non-printable control characters with a single space
///
/// Strips `\x00`-`\x08`, `\x0B`, `\x0C`, and `\x0E`-`\x1F`; tab, newline,
/// and carriage return are permitted whitespace and pass through.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if is_stripped_control(ch) {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

fn is_stripped_control(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}
