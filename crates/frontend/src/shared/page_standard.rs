//! Page categories for tab pages.
//!
//! Every page rendered inside a tab carries an HTML `id` of the form
//! `{entity}--{category}` (e.g. `"a003_baku--detail"`) and a
//! `data-page-category` attribute with one of the constants below.

/// Table of records with its own actions
pub const PAGE_CAT_LIST: &str = "list";

/// Entry form, optionally with the tables it feeds
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Analytical view: dashboard, monitoring, chart, comparison
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Account and other system pages
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_SYSTEM,
];

/// `{entity}--{category}` with both halves non-empty
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a003_baku--detail"));
        assert!(!is_valid_page_id("a003_baku"));
        assert!(!is_valid_page_id("--list"));
        assert!(is_known_category(PAGE_CAT_DASHBOARD));
        assert!(!is_known_category("legacy"));
    }
}
