//! BLAKE3 keys for the judge verdict cache.
//!
//! A judge verdict is a pure function of the feature text and the user input
//! it was judged against, so the full 256-bit hash of that pair is the cache
//! key. Entries are never invalidated within a process lifetime.

use blake3::Hasher;

/// Separator hashed between the two fields so `("ab", "c")` and `("a", "bc")`
/// produce different keys.
const FIELD_SEPARATOR: &[u8] = &[0x1f];

/// Cache key for one judge verdict.
#[inline]
pub fn verdict_key(feature_text: &str, user_input_text: &str) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(feature_text.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(user_input_text.as_bytes());
    *hasher.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_verdict_key_determinism() {
        let key1 = verdict_key("users can export reports", "an app for reporting");
        let key2 = verdict_key("users can export reports", "an app for reporting");

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_verdict_key_sensitive_to_both_fields() {
        let base = verdict_key("feature a", "input x");

        assert_ne!(base, verdict_key("feature b", "input x"));
        assert_ne!(base, verdict_key("feature a", "input y"));
    }

    #[test]
    fn test_verdict_key_separator_prevents_boundary_ambiguity() {
        let key1 = verdict_key("ab", "c");
        let key2 = verdict_key("a", "bc");
        let key3 = verdict_key("abc", "");

        assert_ne!(key1, key2);
        assert_ne!(key1, key3);
        assert_ne!(key2, key3);
    }

    #[test]
    fn test_verdict_key_unicode_inputs() {
        let keys: HashSet<[u8; 32]> = [
            verdict_key("exportação de relatórios", "um app"),
            verdict_key("exportacao de relatorios", "um app"),
            verdict_key("export reports", "an app"),
        ]
        .into_iter()
        .collect();

        assert_eq!(keys.len(), 3, "raw text is hashed without normalization");
    }

    #[test]
    fn test_verdict_key_empty_inputs() {
        let key = verdict_key("", "");
        assert_eq!(key.len(), 32);
        assert!(!key.iter().all(|&b| b == 0));
    }
}
