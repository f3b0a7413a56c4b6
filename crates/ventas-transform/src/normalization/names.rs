//! Column-name canonicalization.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]").expect("Invalid column name regex"));

/// Canonical form of one raw header.
///
/// Lowercase, surrounding whitespace trimmed, spaces turned into underscores
/// and anything outside `[a-z0-9_]` removed. Accented letters are dropped
/// rather than transliterated (`Transacción` becomes `transaccin`).
pub fn normalize_column_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let underscored = lowered.trim().replace(' ', "_");
    NON_CANONICAL.replace_all(&underscored, "").into_owned()
}

/// Canonical form of a whole header row.
///
/// Names that collide after normalization get `_2`, `_3`, ... suffixes in
/// order of appearance, so the result is unique and already canonical.
pub fn normalize_column_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let base = normalize_column_name(name.as_ref());
        let mut candidate = base.clone();
        let mut suffix = 2;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
