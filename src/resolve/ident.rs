//! Local identifier shape checks.
//!
//! Two shapes matter: the canonical API id (8-4-4-4-12 hex groups) and the
//! human issue reference `TEAM-123`. Both checks are pure and run before any
//! network use.

use super::ResolveError;

/// Lengths of the hyphen-separated hex groups in a canonical id.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Total length of a canonical id, including the four hyphens.
const CANONICAL_LEN: usize = 36;

/// Returns true when `token` already is a canonical API id.
///
/// Only the exact hex-grouped shape qualifies; near-misses (wrong group
/// lengths, braces, missing hyphens) are treated as human identifiers and go
/// through resolution. Every resolver calls this first and returns a
/// canonical token unchanged, so resolution of an already-resolved id is
/// a no-op.
pub fn is_canonical(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() != CANONICAL_LEN {
        return false;
    }

    let mut pos = 0;
    for (i, group_len) in GROUPS.iter().enumerate() {
        if i > 0 {
            if bytes[pos] != b'-' {
                return false;
            }
            pos += 1;
        }
        for _ in 0..*group_len {
            if !bytes[pos].is_ascii_hexdigit() {
                return false;
            }
            pos += 1;
        }
    }
    true
}

/// A parsed human issue reference of the exact form `TEAM-123`.
///
/// Issues are the only entity addressed by a compound code; everything else
/// resolves from a plain name, so this is the only structured parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    /// Owning team's short key, as typed.
    pub team_key: String,
    /// Issue sequence number within the team.
    pub number: u64,
}

impl IssueRef {
    /// Parse an issue reference, failing with `MalformedIdentifier` when the
    /// token does not contain exactly one hyphen or the suffix is not an
    /// integer.
    pub fn parse(token: &str) -> Result<Self, ResolveError> {
        Self::try_parse(token).ok_or_else(|| ResolveError::MalformedIdentifier {
            token: token.to_string(),
        })
    }

    /// Non-failing variant for attempt-and-fallback call sites.
    pub fn try_parse(token: &str) -> Option<Self> {
        let mut parts = token.split('-');
        let key = parts.next()?;
        let number = parts.next()?;
        if parts.next().is_some() || key.is_empty() {
            return None;
        }
        let number: u64 = number.parse().ok()?;
        Some(Self {
            team_key: key.to_string(),
            number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_shape_is_recognized() {
        assert!(is_canonical("a0b1c2d3-4e5f-6071-8293-a4b5c6d7e8f9"));
        assert!(is_canonical("A0B1C2D3-4E5F-6071-8293-A4B5C6D7E8F9"));
        assert!(is_canonical("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn near_misses_are_rejected() {
        // wrong length
        assert!(!is_canonical("a0b1c2d3-4e5f-6071-8293-a4b5c6d7e8f"));
        // missing hyphens
        assert!(!is_canonical("a0b1c2d34e5f60718293a4b5c6d7e8f9aaaa"));
        // non-hex digit
        assert!(!is_canonical("g0b1c2d3-4e5f-6071-8293-a4b5c6d7e8f9"));
        // wrong group lengths, same total length
        assert!(!is_canonical("a0b1c2d3f-4e5-6071-8293-a4b5c6d7e8f9"));
        // braced form
        assert!(!is_canonical("{a0b1c2d3-4e5f-6071-8293-a4b5c6d7e8}"));
        assert!(!is_canonical(""));
        assert!(!is_canonical("ENG-42"));
    }

    #[test]
    fn issue_ref_parses_code_and_number() {
        let parsed = IssueRef::parse("ENG-42").unwrap();
        assert_eq!(parsed.team_key, "ENG");
        assert_eq!(parsed.number, 42);
    }

    #[test]
    fn issue_ref_accepts_padded_numbers() {
        let parsed = IssueRef::parse("OPS-007").unwrap();
        assert_eq!(parsed.team_key, "OPS");
        assert_eq!(parsed.number, 7);
    }

    #[test]
    fn issue_ref_rejects_malformed_tokens() {
        for token in ["ENG", "ENG-", "ENG-abc", "ENG-4-2", "-42", "", "ENG 42"] {
            let err = IssueRef::parse(token).unwrap_err();
            assert!(
                matches!(err, ResolveError::MalformedIdentifier { .. }),
                "expected MalformedIdentifier for {token:?}"
            );
            assert!(IssueRef::try_parse(token).is_none());
        }
    }
}
