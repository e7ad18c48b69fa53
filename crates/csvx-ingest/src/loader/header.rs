//! CSV header normalization.

use std::collections::HashSet;

/// Byte order mark some editors prepend to UTF-8 files.
const BOM: char = '\u{feff}';

/// Normalized header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Unique column names in file order.
    pub columns: Vec<String>,
    /// Number of names that were rewritten (blank or duplicate).
    pub renamed: usize,
}

impl CsvHeaders {
    /// Builds unique column names from the raw header fields.
    ///
    /// - a leading BOM on the first field is removed
    /// - blank names become `Unnamed: {index}`
    /// - repeated names get a `.1`, `.2`, ... suffix
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        let mut renamed = 0usize;

        for (idx, raw) in fields.into_iter().enumerate() {
            let raw = if idx == 0 {
                raw.trim_start_matches(BOM)
            } else {
                raw
            };
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                raw.to_string()
            };
            let name = dedupe(&base, &seen);
            if name != raw {
                renamed += 1;
            }
            seen.insert(name.clone());
            columns.push(name);
        }

        Self { columns, renamed }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn dedupe(base: &str, seen: &HashSet<String>) -> String {
    if !seen.contains(base) {
        return base.to_string();
    }
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}.{suffix}");
        if !seen.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
