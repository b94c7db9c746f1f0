//! Root components: `AppShell` gates on login, `Workspace` is the tabbed
//! area shown after it.

use crate::layout::global_context::{AppGlobalContext, Tab};
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

/// Opens the startup tabs and keeps `?active=` in sync with the active tab
#[component]
fn Workspace() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    tabs_store.init_router_integration();

    view! {
        <Shell>
            <For
                each=move || tabs_store.opened.get()
                key=|tab| tab.key.clone()
                children=move |tab: Tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
            />
        </Shell>
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let logged_in = move || auth_state.with(|s| s.is_logged_in());

    view! {
        <Show when=logged_in fallback=|| view! { <LoginPage /> }>
            <Workspace />
        </Show>
    }
}
