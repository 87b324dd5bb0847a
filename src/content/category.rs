//! Category inference from post titles
//!
//! Categories are not stored by the API. They are guessed from the title on
//! every render by walking an ordered keyword ladder; the first rule whose
//! keywords appear in the lower-cased title wins.

use serde::{Serialize, Serializer};
use std::fmt;

/// Display category of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Java,
    Architecture,
    Cloud,
    UiUx,
    Leadership,
    Technology,
}

/// Ordered `(keywords, category)` rules. Order is significant: a title
/// mentioning both "java" and "cloud" is `Java`.
pub const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["java", "spring"], Category::Java),
    (&["architecture", "enterprise"], Category::Architecture),
    (&["cloud", "microservices"], Category::Cloud),
    (&["ui", "ux", "design"], Category::UiUx),
    (&["leadership", "team"], Category::Leadership),
];

/// Badge class used when a label is not a known category
pub const FALLBACK_BADGE_CLASS: &str = "bg-secondary";

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Java,
        Category::Architecture,
        Category::Cloud,
        Category::UiUx,
        Category::Leadership,
        Category::Technology,
    ];

    /// Infer a category from a title; blank or missing titles are `Technology`
    pub fn infer(title: Option<&str>) -> Self {
        let title = match title {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return Category::Technology,
        };

        CATEGORY_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Technology)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Java => "Java",
            Category::Architecture => "Architecture",
            Category::Cloud => "Cloud",
            Category::UiUx => "UI/UX",
            Category::Leadership => "Leadership",
            Category::Technology => "Technology",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Category::Java => "bg-secondary",
            Category::Architecture => "bg-success",
            Category::Cloud => "bg-warning",
            Category::UiUx => "bg-info",
            Category::Leadership => "bg-primary",
            Category::Technology => "bg-dark",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Java => "fab fa-java text-primary",
            Category::Architecture => "fas fa-sitemap text-success",
            Category::Cloud => "fas fa-cloud text-info",
            Category::UiUx => "fas fa-palette text-warning",
            Category::Leadership => "fas fa-users-cog text-primary",
            Category::Technology => "fas fa-laptop-code text-dark",
        }
    }

    /// Search query used when filtering the listing by this category
    pub fn search_terms(&self) -> &'static str {
        match self {
            Category::Java => "java spring",
            Category::Architecture => "architecture enterprise",
            Category::Cloud => "cloud microservices",
            Category::UiUx => "ui ux design",
            Category::Leadership => "leadership team",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Infer the category label of a title
pub fn infer_category(title: Option<&str>) -> &'static str {
    Category::infer(title).label()
}

/// Badge class of a category label; unknown labels get the fallback
pub fn category_badge_class(label: &str) -> &'static str {
    Category::from_label(label)
        .map(|c| c.badge_class())
        .unwrap_or(FALLBACK_BADGE_CLASS)
}

/// Icon class of a category label
pub fn category_icon(label: &str) -> &'static str {
    Category::from_label(label)
        .map(|c| c.icon())
        .unwrap_or("fas fa-tag text-secondary")
}

/// Search terms of a category label; unknown labels search for themselves
pub fn category_search_terms(label: &str) -> String {
    Category::from_label(label)
        .map(|c| c.search_terms().to_string())
        .unwrap_or_else(|| label.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule() {
        assert_eq!(infer_category(Some("Intro to Spring Boot")), "Java");
        assert_eq!(infer_category(Some("Enterprise Patterns")), "Architecture");
        assert_eq!(infer_category(Some("Going Microservices")), "Cloud");
        assert_eq!(infer_category(Some("Design Systems")), "UI/UX");
        assert_eq!(infer_category(Some("Growing a Team")), "Leadership");
        assert_eq!(infer_category(Some("Rust Ownership")), "Technology");
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(infer_category(Some("Java on the Cloud")), "Java");
        assert_eq!(
            infer_category(Some("Cloud Architecture Review")),
            "Architecture"
        );
        assert_eq!(infer_category(Some("Team design sessions")), "UI/UX");
    }

    #[test]
    fn test_substring_matching() {
        // "build" contains "ui"
        assert_eq!(infer_category(Some("How we Build")), "UI/UX");
        // "JavaScript" contains "java"
        assert_eq!(infer_category(Some("JavaScript Tricks")), "Java");
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(infer_category(None), "Technology");
        assert_eq!(infer_category(Some("")), "Technology");
    }

    #[test]
    fn test_badge_class() {
        assert_eq!(category_badge_class("Java"), "bg-secondary");
        assert_eq!(category_badge_class("Architecture"), "bg-success");
        assert_eq!(category_badge_class("Cloud"), "bg-warning");
        assert_eq!(category_badge_class("UI/UX"), "bg-info");
        assert_eq!(category_badge_class("Leadership"), "bg-primary");
        assert_eq!(category_badge_class("Technology"), "bg-dark");
        assert_eq!(category_badge_class("Cooking"), FALLBACK_BADGE_CLASS);
    }

    #[test]
    fn test_icons_and_search_terms() {
        assert_eq!(category_icon("Cloud"), "fas fa-cloud text-info");
        assert_eq!(category_icon("Nope"), "fas fa-tag text-secondary");
        assert_eq!(category_search_terms("UI/UX"), "ui ux design");
        assert_eq!(category_search_terms("Rust"), "rust");
    }

    #[test]
    fn test_label_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }
}
