use crate::scroll_sync::registry::SectionRegistry;

/// `"<base> | <suffix>"` for sections with a title suffix, `base` otherwise.
pub fn title_for(base: &str, registry: &SectionRegistry, id: &str) -> String {
    match registry.get(id).and_then(|s| s.title_suffix.as_deref()) {
        Some(suffix) if !suffix.is_empty() => format!("{} | {}", base, suffix),
        _ => base.to_string(),
    }
}

pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_sync::testing::bald_registry;

    const BASE: &str = "$BALD - A Memecoin Revolution";

    #[test]
    fn sections_with_suffix_extend_the_base_title() {
        let registry = bald_registry();
        assert_eq!(
            title_for(BASE, &registry, "progress"),
            "$BALD - A Memecoin Revolution | Progress Tracker"
        );
    }

    #[test]
    fn home_and_unknown_sections_use_the_base_title() {
        let registry = bald_registry();
        assert_eq!(title_for(BASE, &registry, "home"), BASE);
        assert_eq!(title_for(BASE, &registry, "roadmap"), BASE);
    }
}
