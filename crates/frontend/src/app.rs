use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::TipeProduksiOptions;
use crate::shared::event_bus::AppBus;
use crate::shared::handshake::MapState;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(AppBus::new());
    provide_context(MapState::new());
    provide_context(TipeProduksiOptions::load());

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
    }
}
