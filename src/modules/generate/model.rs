use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSiteRequest {
    #[validate(length(min = 1, message = "اسم النشاط مطلوب"))]
    pub business_name: String,
    #[validate(length(min = 1, message = "نوع النشاط مطلوب"))]
    pub business_type: String,
    #[validate(length(min = 10, message = "الوصف يجب ألا يقل عن 10 أحرف"))]
    pub description: String,
    /// BCP-47 tag for the generated copy, e.g. `ar` or `en`.
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "ar".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSection {
    /// Section role: hero, about, services, contact, ...
    pub kind: String,
    pub title: String,
    pub body: String,
}

/// A draft site produced by the provider. Not persisted here; the wizard
/// saves the draft through `POST /api/sites` once the owner approves it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSiteResponse {
    pub name: String,
    pub slug: String,
    pub sections: Vec<SiteSection>,
    /// Hex colors chosen for the site, primary first.
    pub palette: Vec<String>,
}

/// URL-safe slug from a business name. Falls back to `"site"` for names
/// with no ASCII-alphanumeric characters (common for Arabic names).
pub fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() { "site".to_string() } else { slug }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_joins() {
        assert_eq!(slugify("Nour Bakery"), "nour-bakery");
        assert_eq!(slugify("  Cafe -- 21  "), "cafe-21");
    }

    #[test]
    fn slugify_falls_back_for_non_ascii_names() {
        assert_eq!(slugify("مخبز نور"), "site");
    }
}
