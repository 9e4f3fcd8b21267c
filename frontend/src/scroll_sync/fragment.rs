//! URL fragment handling: `#distribution?ref=x` → `distribution`.

use super::registry::SectionRegistry;

/// Extracts the section id from a raw `location.hash` value. Returns `None`
/// for an empty fragment or one that does not percent-decode.
pub fn section_id_from_hash(hash: &str) -> Option<String> {
    let raw = hash.strip_prefix('#').unwrap_or(hash);
    let raw = raw.split('?').next().unwrap_or_default().trim();
    if raw.is_empty() {
        return None;
    }
    urlencoding::decode(raw).ok().map(|id| id.into_owned())
}

/// Resolves the initial active section for a page load. Unknown or malformed
/// fragments fall back to the first registered section; the rejected value is
/// returned alongside so the caller can log it.
pub fn resolve_initial_section<'a>(
    registry: &'a SectionRegistry,
    hash: Option<&str>,
) -> (&'a str, Option<String>) {
    let first = registry.first().id.as_str();
    match hash.and_then(section_id_from_hash) {
        None => (first, None),
        Some(id) => match registry.get(&id) {
            Some(section) => (section.id.as_str(), None),
            None => (first, Some(id)),
        },
    }
}

pub fn hash_for(id: &str) -> String {
    format!("#{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> SectionRegistry {
        SectionRegistry::new([
            ("home", "Home", None),
            ("public-good", "Public Good", None),
            ("distribution", "Distribution", None),
            ("progress", "Progress", None),
        ])
        .unwrap()
    }

    #[test]
    fn strips_hash_and_query() {
        assert_eq!(section_id_from_hash("#distribution"), Some("distribution".to_string()));
        assert_eq!(
            section_id_from_hash("#progress?utm_source=x"),
            Some("progress".to_string())
        );
        assert_eq!(section_id_from_hash("public-good"), Some("public-good".to_string()));
    }

    #[test]
    fn empty_fragments_yield_none() {
        assert_eq!(section_id_from_hash(""), None);
        assert_eq!(section_id_from_hash("#"), None);
        assert_eq!(section_id_from_hash("#?a=b"), None);
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(section_id_from_hash("#public%2Dgood"), Some("public-good".to_string()));
    }

    #[test]
    fn initial_section_falls_back_to_first() {
        let registry = registry();
        assert_eq!(
            resolve_initial_section(&registry, Some("#distribution")),
            ("distribution", None)
        );
        assert_eq!(
            resolve_initial_section(&registry, Some("#not-a-real-section")),
            ("home", Some("not-a-real-section".to_string()))
        );
        assert_eq!(resolve_initial_section(&registry, None), ("home", None));
    }

    #[test]
    fn hash_for_prefixes_id() {
        assert_eq!(hash_for("progress"), "#progress");
    }
}
