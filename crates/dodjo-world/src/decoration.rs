//! Decoration files — the `.dodjo` record format.
//!
//! A file is a sequence of records, each four comma-separated integers:
//!
//! ```text
//! x,y,type,glyph
//! ```
//!
//! `x`/`y` are logical chunk coordinates, `type` is the item kind code and
//! `glyph` the Unicode code point to draw. Whitespace (including newlines)
//! may precede each number. Reading stops at the first record that does not
//! match; everything before it is kept.
//!
//! A missing or unreadable file is not fatal to the game: the chunk simply
//! has no objects. [`load_or_empty`] logs the failure and returns nothing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::item::Item;

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\s*([+-]?\d+),\s*([+-]?\d+),\s*([+-]?\d+),\s*([+-]?\d+)")
        .expect("record pattern is valid")
});

/// Failure to read a decoration file.
#[derive(Debug, Error)]
pub enum DecorationError {
    #[error("cannot open decoration file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse every leading well-formed record in `text`.
#[must_use]
pub fn parse(text: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut rest = text;

    while let Some(caps) = RECORD.captures(rest) {
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i32>().ok());
        let (Some(x), Some(y), Some(kind), Some(code)) = (field(1), field(2), field(3), field(4))
        else {
            tracing::debug!(record = items.len(), "decoration value out of range, stopping");
            break;
        };

        items.push(Item::from_record(x, y, kind, code));
        rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
    }

    if !rest.trim().is_empty() {
        tracing::debug!(parsed = items.len(), "trailing text in decoration file ignored");
    }

    items
}

/// Read and parse a decoration file.
///
/// # Errors
///
/// Returns [`DecorationError::Open`] if the file cannot be read as UTF-8.
pub fn load(path: &Path) -> Result<Vec<Item>, DecorationError> {
    let text = fs::read_to_string(path).map_err(|source| DecorationError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse(&text);
    tracing::debug!(path = %path.display(), items = items.len(), "decorations loaded");
    Ok(items)
}

/// [`load`], treating any failure as an empty file.
#[must_use]
pub fn load_or_empty(path: &Path) -> Vec<Item> {
    load(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "chunk left undecorated");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use dodjo_term::glyph::Glyph;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn parses_records_across_lines() {
        let items = parse("1,2,0,34\n-3,-4,1,9827\n");
        assert_eq!(
            items,
            vec![
                Item::new(1, 2, ItemKind::Decoration, Glyph::new('"')),
                Item::new(-3, -4, ItemKind::Solid, Glyph::new('♣')),
            ]
        );
    }

    #[test]
    fn records_may_share_a_line() {
        assert_eq!(parse("1,1,0,126 2,2,0,126").len(), 2);
    }

    #[test]
    fn empty_text_has_no_records() {
        assert!(parse("").is_empty());
        assert!(parse("  \n").is_empty());
    }

    #[test]
    fn three_field_record_yields_nothing() {
        assert!(parse("1,2,3").is_empty());
    }

    #[test]
    fn stops_at_first_malformed_record() {
        let items = parse("1,1,0,126\n2,x,0,126\n3,3,0,126\n");
        assert_eq!(items.len(), 1);
        assert!(items[0].is_at(1, 1));
    }

    #[test]
    fn overflowing_value_stops_parsing() {
        let items = parse("1,1,0,126\n99999999999,0,0,126\n");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0,5,1,126").unwrap();
        let items = load(file.path()).unwrap();
        assert_eq!(items, vec![Item::new(0, 5, ItemKind::Solid, Glyph::new('~'))]);
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.dodjo")).unwrap_err();
        assert!(err.to_string().contains("nope.dodjo"));
    }

    #[test]
    fn load_or_empty_swallows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_or_empty(&dir.path().join("nope.dodjo")).is_empty());
    }
}
