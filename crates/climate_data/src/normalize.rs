//! Lookup key normalization.

/// Canonical form of a lookup key: first character uppercased, the rest
/// lowercased. Only applied to incoming keys, never to stored data.
///
/// Multi-word names keep their inner words lowercased
/// (`"united kingdom"` becomes `"United kingdom"`). The remainder is
/// lowercased as a whole string so a word-final `Σ` becomes `ς`.
///
/// The first character is uppercased, not titlecased: a leading `ß` becomes
/// `"SS"` rather than `"Ss"`.
pub fn normalize_key(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => {
            let mut key: String = first.to_uppercase().collect();
            key.push_str(&chars.as_str().to_lowercase());
            key
        }
        None => String::new(),
    }
}
