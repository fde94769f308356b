//! URL slug normalization for tenants and templates.

use crate::error::CoreError;

const MIN_SLUG_LEN: usize = 3;
const MAX_SLUG_LEN: usize = 63;

/// Turn arbitrary user input into a URL-safe slug.
///
/// Letters and digits are kept (lowercased), runs of whitespace, `_` and `-`
/// collapse into a single `-`, everything else is dropped. The result must
/// be 3 to 63 bytes long after trimming dashes from both ends.
pub fn normalize_slug(input: &str) -> Result<String, CoreError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(invalid());
    }

    let mut out = String::with_capacity(input.len());
    let mut last_was_dash = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_was_dash = false;
        } else if (c.is_whitespace() || c == '_' || c == '-') && !last_was_dash && !out.is_empty() {
            out.push('-');
            last_was_dash = true;
        }
    }

    let out = out.trim_matches('-');
    if !(MIN_SLUG_LEN..=MAX_SLUG_LEN).contains(&out.len()) {
        return Err(invalid());
    }
    Ok(out.to_string())
}

fn invalid() -> CoreError {
    CoreError::Validation("invalid slug".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn lowercases_and_dashes_words() {
        assert_eq!(normalize_slug("  Acme Law Firm!! ").unwrap(), "acme-law-firm");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(normalize_slug("Acme---Law___Firm").unwrap(), "acme-law-firm");
        assert_eq!(normalize_slug("acme \t _- law").unwrap(), "acme-law");
    }

    #[test]
    fn trims_dashes_at_both_ends() {
        assert_eq!(normalize_slug(" --- Acme --- ").unwrap(), "acme");
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(normalize_slug("A.C.M.E.!!!").unwrap(), "acme");
    }

    #[test]
    fn keeps_non_ascii_letters() {
        assert_eq!(normalize_slug("Café Zürich").unwrap(), "café-zürich");
    }

    #[test]
    fn rejects_too_short() {
        assert_matches!(normalize_slug("a"), Err(CoreError::Validation(_)));
        assert_matches!(normalize_slug("a!b"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_blank() {
        assert_matches!(normalize_slug("   "), Err(CoreError::Validation(_)));
        assert_matches!(normalize_slug("?!*"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(normalize_slug(&"a".repeat(3)).is_ok());
        assert!(normalize_slug(&"a".repeat(63)).is_ok());
        assert_matches!(normalize_slug(&"a".repeat(64)), Err(CoreError::Validation(_)));
    }
}
