//! Email normalization.
//!
//! Emails are the logical key linking legacy customer records and order snapshots to a stable
//! identity. Older records were written without normalization, so lookups probe both the
//! normalized form and the variant with a capitalized first character, which covers the
//! common case of mobile keyboards auto-capitalizing the first letter.

/// Trim surrounding whitespace and lower-case the email.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The normalized email with its first character upper-cased.
///
/// Returns `None` when capitalizing doesn't change the string (empty input or a leading
/// digit or symbol).
pub fn capitalized_variant(normalized: &str) -> Option<String> {
    let mut chars = normalized.chars();
    let first = chars.next()?;
    let variant: String = first.to_uppercase().chain(chars).collect();

    (variant != normalized).then_some(variant)
}

/// Every stored form an email may have been persisted under, normalized form first.
pub fn lookup_variants(email: &str) -> Vec<String> {
    let normalized = normalize_email(email);
    let capitalized = capitalized_variant(&normalized);

    std::iter::once(normalized).chain(capitalized).collect()
}

/// Local part of the email, used as a display name fallback.
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_mixed_case_email() {
        assert_eq!(normalize_email("  Abbi5@gmail.com "), "abbi5@gmail.com");
    }

    #[test]
    fn capitalizes_first_character() {
        assert_eq!(
            capitalized_variant("abbi5@gmail.com").as_deref(),
            Some("Abbi5@gmail.com")
        );
    }

    #[test]
    fn no_variant_for_leading_digit() {
        assert_eq!(capitalized_variant("5abbi@gmail.com"), None);
        assert_eq!(capitalized_variant(""), None);
    }

    #[test]
    fn lookup_variants_start_with_normalized_form() {
        assert_eq!(
            lookup_variants("Abbi5@gmail.com"),
            vec!["abbi5@gmail.com".to_string(), "Abbi5@gmail.com".to_string()]
        );
    }

    #[test]
    fn local_part_of_email() {
        assert_eq!(local_part("maria.lopez@example.com"), "maria.lopez");
        assert_eq!(local_part("no-at-sign"), "no-at-sign");
    }
}
