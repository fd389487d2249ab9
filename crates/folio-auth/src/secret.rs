//! Constant-time secret comparison.

use subtle::ConstantTimeEq;

/// Compare a submitted secret against the expected one.
///
/// Empty values never match, so an unset passcode cannot be "guessed" with an
/// empty submission. Length is not hidden; contents are compared in constant
/// time.
pub fn compare_secret(input: &str, expected: &str) -> bool {
    if input.is_empty() || expected.is_empty() {
        return false;
    }
    let (a, b) = (input.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_secret_match() {
        assert!(compare_secret("2468", "2468"));
    }

    #[test]
    fn test_compare_secret_mismatch() {
        assert!(!compare_secret("2469", "2468"));
        assert!(!compare_secret("246", "2468"));
    }

    #[test]
    fn test_compare_secret_empty_never_matches() {
        assert!(!compare_secret("", ""));
        assert!(!compare_secret("", "2468"));
        assert!(!compare_secret("2468", ""));
    }

    #[test]
    fn test_compare_secret_unicode() {
        assert!(compare_secret("pässcode", "pässcode"));
        assert!(!compare_secret("passcode", "pässcod"));
    }
}
