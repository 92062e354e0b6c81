//! Slug validation and suggestion engine.
//!
//! A slug is the short URL path segment under which a card is shared
//! (e.g. `cardfolio.app/c/jane-doe`). Validation rules are applied in a
//! fixed order so the first failure reported is always the same for a
//! given input. Suggestion generation is fully deterministic; the
//! caller supplies the availability predicate so this module stays free
//! of database access.

/// Minimum slug length (after normalization).
pub const MIN_SLUG_LEN: usize = 3;

/// Maximum slug length (after normalization).
pub const MAX_SLUG_LEN: usize = 100;

/// Maximum number of suggestions returned by [`suggest_slugs`].
pub const MAX_SUGGESTIONS: usize = 8;

/// Characters treated as separators for the boundary/run rules.
const SEPARATORS: [char; 3] = ['.', '_', '-'];

/// Words that may never be claimed as slugs because they collide with
/// routes, marketing pages, or confuse link previews.
pub const RESERVED_SLUGS: &[&str] = &[
    "api", "admin", "login", "logout", "register", "signup", "dashboard",
    "settings", "profile", "help", "support", "about", "terms", "privacy",
    "card", "cards", "wallet", "qr", "share", "static", "assets", "www",
    "mail", "root", "system", "null", "undefined", "true", "false",
];

/// Why a candidate slug was rejected.
///
/// Variants are ordered the way the rules are applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("Slug must be between {MIN_SLUG_LEN} and {MAX_SLUG_LEN} characters")]
    Length,

    #[error("'{0}' is a reserved word")]
    Reserved(String),

    #[error("Slug may only contain lowercase letters, digits, '.', '_' and '-'")]
    Charset,

    #[error("Slug may not start or end with a separator")]
    BoundarySeparator,

    #[error("Slug may not contain consecutive separators")]
    ConsecutiveSeparators,

    #[error("Slug may not consist of digits only")]
    AllDigits,
}

/// Normalize user input into canonical slug form: trimmed + lowercased.
///
/// [`validate_slug`] expects its input to already be normalized, so the
/// two are used together: `validate_slug(&normalize_slug(input))`.
pub fn normalize_slug(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Validate a normalized slug against the rule set, in order:
///
/// 1. length 3–100;
/// 2. not a reserved word;
/// 3. charset `[a-z0-9._-]`;
/// 4. no leading/trailing separator;
/// 5. no consecutive separators;
/// 6. not all-digits.
///
/// Accepted strings are by construction unchanged by lowercasing.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    let len = slug.chars().count();
    if !(MIN_SLUG_LEN..=MAX_SLUG_LEN).contains(&len) {
        return Err(SlugError::Length);
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(SlugError::Reserved(slug.to_string()));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || SEPARATORS.contains(&c))
    {
        return Err(SlugError::Charset);
    }

    let starts_sep = slug.chars().next().is_some_and(|c| SEPARATORS.contains(&c));
    let ends_sep = slug.chars().next_back().is_some_and(|c| SEPARATORS.contains(&c));
    if starts_sep || ends_sep {
        return Err(SlugError::BoundarySeparator);
    }

    let mut prev_is_sep = false;
    for c in slug.chars() {
        let is_sep = SEPARATORS.contains(&c);
        if is_sep && prev_is_sep {
            return Err(SlugError::ConsecutiveSeparators);
        }
        prev_is_sep = is_sep;
    }

    if slug.chars().all(|c| c.is_ascii_digit()) {
        return Err(SlugError::AllDigits);
    }

    Ok(())
}

/// Generate the deterministic candidate list for a base slug.
///
/// Candidate order: `{base}-card`, `{base}-biz`, `my-{base}`,
/// `{base}1`..`{base}5`, `{base}-1`..`{base}-5`, `{base}-{year}`.
/// Invalid candidates (e.g. pushed over the length cap by a suffix)
/// are dropped; the remainder is deduplicated preserving order.
pub fn candidate_slugs(base: &str, year: i32) -> Vec<String> {
    let base = normalize_slug(base);

    let mut candidates = vec![
        format!("{base}-card"),
        format!("{base}-biz"),
        format!("my-{base}"),
    ];
    for n in 1..=5 {
        candidates.push(format!("{base}{n}"));
    }
    for n in 1..=5 {
        candidates.push(format!("{base}-{n}"));
    }
    candidates.push(format!("{base}-{year}"));

    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|c| validate_slug(c).is_ok())
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

/// Produce up to [`MAX_SUGGESTIONS`] available alternatives for `base`.
///
/// `is_taken` reports whether a candidate already has an active owner;
/// callers resolve it against the `custom_slugs` table in one query.
pub fn suggest_slugs<F>(base: &str, year: i32, mut is_taken: F) -> Vec<String>
where
    F: FnMut(&str) -> bool,
{
    candidate_slugs(base, year)
        .into_iter()
        .filter(|c| !is_taken(c))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_plain_slug() {
        assert_eq!(validate_slug("jane-doe"), Ok(()));
        assert_eq!(validate_slug("jane.doe_42"), Ok(()));
    }

    #[test]
    fn rejects_too_short_and_too_long() {
        assert_matches!(validate_slug("ab"), Err(SlugError::Length));
        let long = "a".repeat(MAX_SLUG_LEN + 1);
        assert_matches!(validate_slug(&long), Err(SlugError::Length));
    }

    #[test]
    fn accepts_boundary_lengths() {
        assert_eq!(validate_slug("abc"), Ok(()));
        let max = "a".repeat(MAX_SLUG_LEN);
        assert_eq!(validate_slug(&max), Ok(()));
    }

    #[test]
    fn rejects_reserved_words() {
        for word in ["admin", "api", "wallet", "login"] {
            assert_matches!(validate_slug(word), Err(SlugError::Reserved(_)));
        }
    }

    #[test]
    fn rejects_bad_charset() {
        assert_matches!(validate_slug("jane doe"), Err(SlugError::Charset));
        assert_matches!(validate_slug("jane/doe"), Err(SlugError::Charset));
        // Uppercase is rejected here; normalize_slug folds it first.
        assert_matches!(validate_slug("JaneDoe"), Err(SlugError::Charset));
    }

    #[test]
    fn rejects_boundary_separators() {
        assert_matches!(validate_slug("-jane"), Err(SlugError::BoundarySeparator));
        assert_matches!(validate_slug("jane-"), Err(SlugError::BoundarySeparator));
        assert_matches!(validate_slug(".jane"), Err(SlugError::BoundarySeparator));
        assert_matches!(validate_slug("jane_"), Err(SlugError::BoundarySeparator));
    }

    #[test]
    fn rejects_consecutive_separators() {
        assert_matches!(
            validate_slug("jane--doe"),
            Err(SlugError::ConsecutiveSeparators)
        );
        assert_matches!(
            validate_slug("jane-.doe"),
            Err(SlugError::ConsecutiveSeparators)
        );
    }

    #[test]
    fn rejects_all_digits() {
        assert_matches!(validate_slug("12345"), Err(SlugError::AllDigits));
    }

    #[test]
    fn digits_with_letters_are_fine() {
        assert_eq!(validate_slug("agent007"), Ok(()));
    }

    #[test]
    fn accepted_slugs_are_lowercase_stable() {
        for slug in ["jane-doe", "acme.sales_2", "agent007"] {
            assert_eq!(validate_slug(slug), Ok(()));
            assert_eq!(slug.to_lowercase(), slug);
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_slug("  Jane-Doe "), "jane-doe");
    }

    #[test]
    fn candidates_are_valid_and_deduplicated() {
        let cands = candidate_slugs("jane", 2026);
        let unique: std::collections::HashSet<_> = cands.iter().collect();
        assert_eq!(unique.len(), cands.len());
        for c in &cands {
            assert_eq!(validate_slug(c), Ok(()), "candidate {c} must validate");
        }
    }

    #[test]
    fn candidate_order_is_deterministic() {
        let cands = candidate_slugs("jane", 2026);
        assert_eq!(cands[0], "jane-card");
        assert_eq!(cands[1], "jane-biz");
        assert_eq!(cands[2], "my-jane");
        assert_eq!(cands[3], "jane1");
        assert_eq!(*cands.last().unwrap(), "jane-2026");
    }

    #[test]
    fn suggestions_capped_at_eight() {
        let suggestions = suggest_slugs("jane", 2026, |_| false);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn suggestions_skip_taken_candidates() {
        let suggestions = suggest_slugs("jane", 2026, |c| c == "jane-card");
        assert!(!suggestions.contains(&"jane-card".to_string()));
        assert_eq!(suggestions[0], "jane-biz");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn suggestions_can_run_dry() {
        // Everything taken: nothing to offer.
        let suggestions = suggest_slugs("jane", 2026, |_| true);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn near_limit_base_drops_oversized_candidates() {
        // 98 chars: "{base}-card" exceeds the cap and must be dropped,
        // "{base}1" (99) still fits.
        let base = "a".repeat(98);
        let cands = candidate_slugs(&base, 2026);
        assert!(!cands.contains(&format!("{base}-card")));
        assert!(cands.contains(&format!("{base}1")));
    }
}
