//! Header row handling.

use std::collections::BTreeSet;

/// Removes a leading UTF-8 byte-order marker.
pub fn strip_bom(value: &str) -> &str {
    value.strip_prefix('\u{feff}').unwrap_or(value)
}

/// Makes raw header names unique.
///
/// Later repeats of a name get `.1`, `.2`, ... appended so the columns can
/// live in one `DataFrame`. Names are otherwise left untouched.
pub fn disambiguate_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let mut candidate = header.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{header}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
