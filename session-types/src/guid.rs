use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of identity tokens for newly constructed values.
///
/// Tokens are 36-character lowercase hyphenated hex strings in 8-4-4-4-12
/// grouping with a version nibble of `4`.
pub trait TokenGenerator {
    fn generate(&self) -> String;
}

/// Random version-4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl TokenGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

/// Deterministic tokens counting up from a starting value.
///
/// Output keeps the version-4 shape so it passes the same format checks as
/// random tokens: `00000000-0000-4000-8000-000000000001`, then `...002`, ...
#[derive(Debug)]
pub struct SequenceGenerator {
    next: AtomicU64,
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl TokenGenerator for SequenceGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) & 0xffff_ffff_ffff;
        format!("00000000-0000-4000-8000-{n:012x}")
    }
}

/// A fresh random identity token.
pub fn guid() -> String {
    UuidGenerator.generate()
}

/// Whether `token` has the canonical identifier shape.
pub fn is_guid(token: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let groups: Vec<&str> = token.split('-').collect();
    groups.len() == GROUPS.len()
        && groups.iter().zip(GROUPS).all(|(group, len)| {
            group.len() == len
                && group
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        })
        && token.as_bytes()[14] == b'4'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_tokens_have_canonical_shape() {
        let token = guid();
        assert_eq!(token.len(), 36);
        assert!(is_guid(&token), "{token}");
    }

    #[test]
    fn uuid_tokens_differ() {
        assert_ne!(guid(), guid());
    }

    #[test]
    fn sequence_is_deterministic() {
        let ids = SequenceGenerator::new();
        assert_eq!(ids.generate(), "00000000-0000-4000-8000-000000000001");
        assert_eq!(ids.generate(), "00000000-0000-4000-8000-000000000002");

        let ids = SequenceGenerator::starting_at(0xabc);
        let token = ids.generate();
        assert_eq!(token, "00000000-0000-4000-8000-000000000abc");
        assert!(is_guid(&token));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(!is_guid(""));
        assert!(!is_guid("not-a-guid"));
        assert!(!is_guid("00000000-0000-1000-8000-000000000001"));
        assert!(!is_guid("00000000-0000-4000-8000-00000000000G"));
        assert!(!is_guid("00000000-0000-4000-8000-0000000000001"));
        assert!(!is_guid("00000000-0000-4000-8000-00000000000A"));
    }
}
