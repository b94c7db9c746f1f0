//! Top bar: panel toggles, application title, user name and logout

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();
    let is_right_panel_visible = move || ctx.right_open.get();

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Sembunyikan menu" } else { "Tampilkan menu" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Produksi Baku"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_right()
                    title=move || if is_right_panel_visible() { "Sembunyikan panel debug" } else { "Tampilkan panel debug" }
                >
                    {icon("panel-right")}
                </button>

                <button
                    class="top-header__icon-btn"
                    title="Manajemen Akun"
                    on:click=move |_| ctx.open_tab("sys_account", "Manajemen Akun")
                >
                    {icon("settings")}
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.get().username.unwrap_or_else(|| "Tamu".to_string())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Keluar">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
