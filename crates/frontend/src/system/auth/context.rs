use leptos::prelude::*;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub username: Option<String>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState {
        username: storage::get_username(),
    });

    provide_context((auth_state, set_auth_state));

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    use_context::<(ReadSignal<AuthState>, WriteSignal<AuthState>)>()
        .expect("AuthProvider not found in context")
}

/// Stores the name and switches the shell to the main layout
pub fn complete_login(set_auth_state: WriteSignal<AuthState>, username: String) {
    storage::save_username(&username);
    set_auth_state.set(AuthState {
        username: Some(username),
    });
}

pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::logout().await {
        log::warn!("logout request failed: {}", e);
    }
    storage::clear_username();
    set_auth_state.set(AuthState::default());
}
