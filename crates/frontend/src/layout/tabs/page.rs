//! One open tab. Inactive tabs stay mounted and are only hidden, so their
//! polling and bus subscriptions keep running while another tab is shown.

use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab};
use leptos::prelude::*;

#[component]
pub fn TabPage(tab: Tab, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| {
        tabs_store
            .active
            .with(|active| key.with_value(|k| active.as_deref() == Some(k.as_str())))
    });

    log::debug!("tab mounted: {}", tab.key);
    on_cleanup(move || {
        key.try_with_value(|k| log::debug!("tab unmounted: {}", k));
    });

    view! {
        <div class="tabs__item" class:tabs__item--hidden=move || !is_active.get() data-tab-key=tab.key.clone()>
            {render_tab_content(&tab.key, tabs_store)}
        </div>
    }
}
