//! Secret verification for the configured admin credential.
//!
//! The stored secret is either plaintext (low-friction development setups)
//! or a SHA-256 digest carrying the `sha256:` marker (production). The
//! encoding is decided once when configuration is loaded, never re-sniffed
//! per verification.

use sha2::{Digest, Sha256};

/// Marker prefix identifying a SHA-256 hashed stored secret.
const SHA256_PREFIX: &str = "sha256:";

/// A stored secret with its encoding tagged at configuration-load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSecret {
    /// Raw secret text, compared by equality.
    Plain(String),
    /// Lowercase hex SHA-256 digest of the secret.
    Sha256(String),
}

impl StoredSecret {
    /// Classify a configured secret value.
    ///
    /// A value of the form `sha256:<64 hex digits>` is treated as a digest;
    /// anything else, including a malformed digest, is plaintext.
    pub fn parse(raw: &str) -> Self {
        if let Some(digest) = raw.strip_prefix(SHA256_PREFIX) {
            if digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return StoredSecret::Sha256(digest.to_ascii_lowercase());
            }
        }
        StoredSecret::Plain(raw.to_string())
    }

    /// Whether the underlying secret value is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            StoredSecret::Plain(s) => s.is_empty(),
            StoredSecret::Sha256(d) => d.is_empty(),
        }
    }

    /// Compare a supplied secret against the stored one.
    ///
    /// Never panics. An empty supplied secret always compares false.
    pub fn matches(&self, supplied: &str) -> bool {
        if supplied.is_empty() {
            return false;
        }
        match self {
            StoredSecret::Plain(expected) => supplied == expected.as_str(),
            StoredSecret::Sha256(expected) => {
                let mut hasher = Sha256::new();
                hasher.update(supplied.as_bytes());
                let digest = hex::encode(hasher.finalize());
                constant_time_eq(digest.as_bytes(), expected.as_bytes())
            }
        }
    }
}

/// Byte comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha256_hex(input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hex::encode(hasher.finalize())
    }

    #[test]
    fn test_parse_recognizes_hash_marker() {
        let stored = StoredSecret::parse(&format!("sha256:{}", sha256_hex("admin123")));
        assert!(matches!(stored, StoredSecret::Sha256(_)));

        // Uppercase digests are normalized
        let upper = format!("sha256:{}", sha256_hex("admin123").to_uppercase());
        assert_eq!(
            StoredSecret::parse(&upper),
            StoredSecret::Sha256(sha256_hex("admin123"))
        );
    }

    #[test]
    fn test_parse_falls_back_to_plaintext() {
        assert_eq!(
            StoredSecret::parse("admin123"),
            StoredSecret::Plain("admin123".to_string())
        );
        // Marker with a malformed digest is not a digest
        assert!(matches!(
            StoredSecret::parse("sha256:nothex"),
            StoredSecret::Plain(_)
        ));
        assert!(matches!(
            StoredSecret::parse("sha256:abc123"),
            StoredSecret::Plain(_)
        ));
    }

    #[test]
    fn test_plaintext_comparison() {
        let stored = StoredSecret::parse("admin123");
        assert!(stored.matches("admin123"));
        assert!(!stored.matches("admin124"));
        assert!(!stored.matches(""));
    }

    #[test]
    fn test_hashed_comparison() {
        let stored = StoredSecret::parse(&format!("sha256:{}", sha256_hex("admin123")));
        assert!(stored.matches("admin123"));
        assert!(!stored.matches("admin124"));
        assert!(!stored.matches(""));
        // The digest itself is not the secret
        assert!(!stored.matches(&sha256_hex("admin123")));
    }
}
