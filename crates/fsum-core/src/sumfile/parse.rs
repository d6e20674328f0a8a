//! Line grammar for checksum lists.
//!
//! Accepted line shapes (coreutils-compatible):
//!   `<hex>`                 : record with no filename
//!   `<hex>  <filename>`     : text mode
//!   `<hex> *<filename>`     : binary mode marker
//! Blank lines and `#` comments are skipped. Any other line aborts the
//! whole parse: strictness keeps single-input self-detection from
//! mistaking ordinary text files for checksum lists.

use super::SumFileEntry;

// Shortest digest we accept, in hex chars (CRC32-sized). Filters out
// ordinary words that happen to be valid hex.
const MIN_HEX_LEN: usize = 8;

/// Parse checksum-list text. Returns no entries if any line is malformed.
pub fn parse_sum_text(text: &str) -> Vec<SumFileEntry> {
    let mut entries = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => return Vec::new(),
        }
    }
    entries
}

fn parse_line(line: &str) -> Option<SumFileEntry> {
    let (hex_part, rest) = match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim_start()),
        None => (line, ""),
    };
    if hex_part.len() < MIN_HEX_LEN || hex_part.len() % 2 != 0 {
        return None;
    }
    let hash = hex::decode(hex_part).ok()?;
    let filename = rest.strip_prefix('*').unwrap_or(rest);
    Some(SumFileEntry {
        filename: filename.to_string(),
        hash,
    })
}
