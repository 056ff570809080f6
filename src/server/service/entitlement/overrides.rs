use std::collections::HashMap;

use crate::server::util::text::normalize_title;

/// Item names sold under a title that no name rule can map to its course.
///
/// Keys are matched after normalization, so accents and casing don't matter here.
const CURATED_OVERRIDES: &[(&str, &str)] = &[
    ("Intensivo Indumentaria Nivel I", "intensivo-indumentaria-nivel-1"),
    ("Intensivo Indumentaria Nivel II", "intensivo-indumentaria-nivel-2"),
    ("Intensivo Indumentaria Nivel III", "intensivo-indumentaria-nivel-3"),
    ("Moldería Nivel Inicial", "molderia-basica"),
    ("Taller de Corsetería Online", "corseteria"),
];

/// Curated mapping from normalized item name to course slug
#[derive(Clone, Debug)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, slug)| (normalize_title(name.as_ref()), slug.into()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Course slug for an already normalized item name
    pub fn slug_for(&self, normalized_name: &str) -> Option<&str> {
        self.entries.get(normalized_name).map(String::as_str)
    }
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::new(CURATED_OVERRIDES.iter().copied())
    }
}
