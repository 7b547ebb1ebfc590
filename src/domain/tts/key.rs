use std::fmt;
use xxhash_rust::xxh3::xxh3_128;

/// Width of the rendered key, in hex characters
pub const CACHE_KEY_LEN: usize = 32;

/// Content address of a synthesized clip.
///
/// Derived from the trimmed text and the language code with a seedless
/// 128-bit xxh3, so the same input maps to the same file name across
/// process restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(text: &str, language: &str) -> Self {
        // Length-prefixing the language keeps ("en", "x:y") and ("en:x", "y") apart
        let material = format!("{}:{}:{}", language.len(), language, text.trim());
        let hash = xxh3_128(material.as_bytes());
        Self(format!("{:032x}", hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
