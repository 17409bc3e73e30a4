//! Cache key derivation — deterministic digest over a request triple.
//!
//! The key doubles as a correctness guarantee, not just a hash bucket: two
//! distinct `(model, text, rate)` triples must map to distinct keys with
//! overwhelming probability, so a collision-resistant digest (SHA-256) is
//! required rather than a fast non-cryptographic hash.
//!
//! Each field is length-prefixed before hashing so that field boundaries are
//! unambiguous — `("a", "b:c")` and `("a:b", "c")` produce different digests
//! no matter what bytes the fields contain. Text is hashed verbatim: no
//! trimming and no case folding. Normalizing here would silently change hit
//! rates for every deployed cache.

use sha2::{Digest, Sha256};

use crate::domain::{CacheKey, VoiceModelId};

/// Namespace prefix for all synthesis keys in the store.
const KEY_PREFIX: &str = "tts:";

/// Derive the cache key for a `(model, text, target sample rate)` triple.
///
/// Pure and infallible. Identical triples always yield the identical key,
/// across calls and across processes (no per-process salt).
#[must_use]
pub fn derive(model: &VoiceModelId, text: &str, target_sample_rate: u32) -> CacheKey {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, model.as_str().as_bytes());
    update_field(&mut hasher, text.as_bytes());
    update_field(&mut hasher, &target_sample_rate.to_le_bytes());

    let digest = hasher.finalize();
    let mut key = String::with_capacity(KEY_PREFIX.len() + digest.len() * 2);
    key.push_str(KEY_PREFIX);
    for byte in digest {
        use std::fmt::Write as _;
        // Infallible for String targets.
        let _ = write!(key, "{byte:02x}");
    }
    CacheKey(key)
}

/// Hash one field as `u64-LE length || bytes`.
fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn id(s: &str) -> VoiceModelId {
        VoiceModelId::from(s)
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive(&id("en_US-kathleen-low"), "Hello, world!", 16_000);
        let b = derive(&id("en_US-kathleen-low"), "Hello, world!", 16_000);
        assert_eq!(a, b);
    }

    #[test]
    fn key_has_namespace_prefix_and_digest_length() {
        let key = derive(&id("en_US-ryan-medium"), "Hello!", 22_050);
        assert!(key.as_str().starts_with("tts:"));
        // "tts:" + 64 hex chars of SHA-256
        assert_eq!(key.as_str().len(), 4 + 64);
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        // A delimiter-joined encoding would collide on these.
        assert_ne!(derive(&id("a"), "b:c", 16_000), derive(&id("a:b"), "c", 16_000));
        assert_ne!(derive(&id("ab"), "c", 16_000), derive(&id("a"), "bc", 16_000));
        assert_ne!(derive(&id(""), "ab", 16_000), derive(&id("ab"), "", 16_000));
    }

    #[test]
    fn each_field_participates_in_the_key() {
        let base = derive(&id("voice"), "text", 16_000);
        assert_ne!(base, derive(&id("other"), "text", 16_000));
        assert_ne!(base, derive(&id("voice"), "other", 16_000));
        assert_ne!(base, derive(&id("voice"), "text", 22_050));
    }

    #[test]
    fn text_is_case_and_whitespace_sensitive() {
        // Pinned behavior: text goes into the digest verbatim. Upstream
        // normalization is not part of the contract.
        let base = derive(&id("voice"), "Hello world", 16_000);
        assert_ne!(base, derive(&id("voice"), "hello world", 16_000));
        assert_ne!(base, derive(&id("voice"), "Hello world ", 16_000));
        assert_ne!(base, derive(&id("voice"), " Hello world", 16_000));
        assert_ne!(base, derive(&id("voice"), "Hello  world", 16_000));
    }

    #[test]
    fn no_collisions_across_many_distinct_triples() {
        let models = ["en_US-kathleen-low", "en_US-ryan-medium", "de_DE-thorsten", "a", "a:b"];
        let rates = [8_000_u32, 16_000, 22_050, 44_100, 48_000];
        let texts: Vec<String> = (0..50)
            .map(|i| format!("sentence number {i}, with punctuation!"))
            .collect();

        let mut seen = HashSet::new();
        let mut triples = 0_usize;
        for model in models {
            for text in &texts {
                for rate in rates {
                    seen.insert(derive(&id(model), text, rate));
                    triples += 1;
                }
            }
        }
        assert_eq!(seen.len(), triples, "observed a cache key collision");
    }
}
