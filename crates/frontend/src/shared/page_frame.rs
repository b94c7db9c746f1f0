//! PageFrame: root wrapper for every page rendered inside a tab.
//!
//! ```rust,ignore
//! view! {
//!     <PageFrame page_id="a001_mandor--list" category=PAGE_CAT_LIST>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a001_mandor--list"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) || !is_known_category(category) {
        log::warn!("PageFrame: bad page metadata {} / {}", page_id, category);
    }
    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };
    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}

/// Standard page header: title plus optional action buttons
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                <h1 class="page__title">{title}</h1>
                {(!subtitle.is_empty()).then(|| view! { <div class="page__subtitle">{subtitle}</div> })}
            </div>
            <div class="page__actions">{children.map(|c| c())}</div>
        </div>
    }
}
