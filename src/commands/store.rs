//! Save file of `name value` lines.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::diagnostics::print_warning;
use crate::core::evaluator::format_number;
use crate::io::atomic_write;

pub type SavedEntries = Vec<(String, f64)>;

/// Parses the file body. Blank lines are ignored; malformed lines are returned
/// separately as (line number, text).
pub fn parse_saved(text: &str) -> (SavedEntries, Vec<(usize, String)>) {
    let mut entries = SavedEntries::new();
    let mut malformed = Vec::new();

    for (n, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let (name, value, rest) = (parts.next(), parts.next(), parts.next());
        match (name, value.map(str::parse::<f64>), rest) {
            (None, _, _) => continue,
            (Some(name), Some(Ok(value)), None) => entries.push((name.to_string(), value)),
            _ => malformed.push((n + 1, line.to_string())),
        }
    }
    (entries, malformed)
}

pub fn read_saved(path: &Path) -> Result<SavedEntries> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Read save file {}", path.display()))?;
    let (entries, malformed) = parse_saved(&text);
    for (line, content) in malformed {
        crate::debug_log!("store: skipping {}:{} {:?}", path.display(), line, content);
        print_warning(&format!(
            "{}:{}: malformed entry skipped: {}",
            path.display(),
            line,
            content.trim()
        ));
    }
    Ok(entries)
}

pub fn format_saved(entries: &[(String, f64)]) -> String {
    entries
        .iter()
        .map(|(name, value)| format!("{} {}\n", name, format_number(*value)))
        .collect()
}

pub fn write_saved(path: &Path, entries: &[(String, f64)]) -> Result<()> {
    atomic_write(path, format_saved(entries))
        .with_context(|| format!("Write save file {}", path.display()))
}

/// Updates existing entries in place and appends the new ones.
pub fn merge_entries(existing: &mut SavedEntries, updates: impl IntoIterator<Item = (String, f64)>) {
    for (name, value) in updates {
        match existing.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => existing.push((name, value)),
        }
    }
}
