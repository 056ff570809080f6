use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Normalize a product or course name for matching.
///
/// Lower-cases, strips diacritics (via canonical decomposition), trims and collapses runs of
/// whitespace into a single space.
pub fn normalize_title(value: &str) -> String {
    let stripped: String = value.nfd().filter(|c| !is_combining_mark(*c)).collect();

    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
