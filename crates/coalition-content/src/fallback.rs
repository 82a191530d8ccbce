//! Default site metadata used when the live homepage cannot be fetched.

use crate::types::SiteMetadata;

pub const ORGANIZATION_NAME_VAR: &str = "ORGANIZATION_NAME";
pub const ORGANIZATION_TAGLINE_VAR: &str = "ORGANIZATION_TAGLINE";
pub const CONTACT_EMAIL_VAR: &str = "CONTACT_EMAIL";

pub const DEFAULT_ORGANIZATION_NAME: &str = "Coalition Builder";
pub const DEFAULT_TAGLINE: &str = "Building strong advocacy partnerships";
pub const DEFAULT_CONTACT_EMAIL: &str = "info@example.org";

/// Fallback metadata built from the process environment.
pub fn fallback_site_metadata() -> SiteMetadata {
    fallback_site_metadata_with(|key| std::env::var(key).ok())
}

/// Fallback metadata built from an arbitrary variable lookup.
///
/// Blank values count as unset.
pub fn fallback_site_metadata_with<L>(lookup: L) -> SiteMetadata
where
    L: Fn(&str) -> Option<String>,
{
    let var = |key: &str, default: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let organization_name = var(ORGANIZATION_NAME_VAR, DEFAULT_ORGANIZATION_NAME);
    let tagline = var(ORGANIZATION_TAGLINE_VAR, DEFAULT_TAGLINE);
    let contact_email = var(CONTACT_EMAIL_VAR, DEFAULT_CONTACT_EMAIL);
    let now = chrono::Utc::now().to_rfc3339();

    SiteMetadata {
        id: 0,
        hero_title: format!("Welcome to {organization_name}"),
        hero_subtitle: "Advancing policy change through strategic coalition building".to_string(),
        hero_background_image_url: String::new(),
        about_section_title: "About Our Mission".to_string(),
        about_section_content: format!(
            "{organization_name} brings together advocates, organizations, and community \
             leaders to drive meaningful policy change."
        ),
        cta_title: "Get Involved".to_string(),
        cta_content: "Join our coalition and help make a difference in policy advocacy."
            .to_string(),
        cta_button_text: "Learn More".to_string(),
        cta_button_url: "/campaigns".to_string(),
        contact_email,
        contact_phone: String::new(),
        facebook_url: String::new(),
        twitter_url: String::new(),
        instagram_url: String::new(),
        linkedin_url: String::new(),
        campaigns_section_title: "Policy Campaigns".to_string(),
        campaigns_section_subtitle: "Support the issues that matter".to_string(),
        show_campaigns_section: true,
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
        theme: None,
        organization_name,
        tagline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn without_timestamps(mut site: SiteMetadata) -> SiteMetadata {
        site.created_at.clear();
        site.updated_at.clear();
        site
    }

    #[test]
    fn test_defaults_without_environment() {
        let site = fallback_site_metadata_with(|_| None);
        assert_eq!(site.organization_name, "Coalition Builder");
        assert_eq!(site.tagline, "Building strong advocacy partnerships");
        assert_eq!(site.hero_title, "Welcome to Coalition Builder");
        assert_eq!(site.cta_button_url, "/campaigns");
        assert!(site.show_campaigns_section);
        assert!(site.theme.is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(&site.created_at).is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let site = fallback_site_metadata_with(lookup_from(&[
            (ORGANIZATION_NAME_VAR, "River Alliance"),
            (ORGANIZATION_TAGLINE_VAR, "Clean rivers for all"),
        ]));
        assert_eq!(site.organization_name, "River Alliance");
        assert_eq!(site.tagline, "Clean rivers for all");
        assert_eq!(site.hero_title, "Welcome to River Alliance");
        assert_eq!(site.contact_email, DEFAULT_CONTACT_EMAIL);
    }

    #[test]
    fn test_blank_values_ignored() {
        let site = fallback_site_metadata_with(lookup_from(&[(ORGANIZATION_NAME_VAR, "   ")]));
        assert_eq!(site.organization_name, DEFAULT_ORGANIZATION_NAME);
    }

    #[test]
    fn test_repeated_calls_match_except_timestamps() {
        let env = [(ORGANIZATION_NAME_VAR, "River Alliance")];
        let first = fallback_site_metadata_with(lookup_from(&env));
        let second = fallback_site_metadata_with(lookup_from(&env));
        assert_eq!(without_timestamps(first), without_timestamps(second));
    }
}
