//! Whitespace-insensitive equivalence check
//!
//! Coarser than the diff engine: answers "do these differ at all, ignoring
//! formatting" and never "where do they differ".

/// Trim and collapse every whitespace run (newlines included) to one space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when both texts are equal after whitespace normalization
pub fn is_equivalent(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_diff;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_whitespace("  SELECT\n\t1  "), "SELECT 1");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_equivalent_ignores_layout() {
        assert!(is_equivalent("SELECT 1\n", "SELECT   1"));
        assert!(is_equivalent("SELECT\n  a,\n  b\nFROM t", "SELECT a, b FROM t"));
        assert!(is_equivalent("", "   \n"));
    }

    #[test]
    fn test_not_equivalent() {
        assert!(!is_equivalent("SELECT 1", "SELECT 2"));
        assert!(!is_equivalent("SELECT a,b", "SELECT a, b"));
    }

    #[test]
    fn test_equivalence_is_not_a_diff() {
        let (a, b) = ("SELECT 1\n", "SELECT   1");
        assert!(is_equivalent(a, b));
        assert!(!compute_diff(a, b).is_empty());
        assert!(compute_diff(a, b).iter().any(|s| s.kind.is_change()));
    }

    #[test]
    fn test_matches_normalized_comparison() {
        let a = "x  y\n z";
        let b = "x y z ";
        assert_eq!(
            is_equivalent(a, b),
            normalize_whitespace(a) == normalize_whitespace(b)
        );
    }
}
