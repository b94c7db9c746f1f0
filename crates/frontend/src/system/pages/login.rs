use contracts::system::auth::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::dialogs::alert;
use crate::system::auth::api;
use crate::system::auth::context::{complete_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = match LoginRequest::from_form(&username.get(), &password.get()) {
            Ok(request) => request,
            Err(e) => {
                alert(&format!("{}!", e));
                return;
            }
        };

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(request).await {
                Ok(name) => {
                    log::info!("login ok: {}", name);
                    complete_login(set_auth_state, name);
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    set_error_message.set(Some(e.alert_text()));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Produksi Baku"</h1>
                <h2>"Masuk ke sistem"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <div class="password-field">
                            <input
                                type=move || if show_password.get() { "text" } else { "password" }
                                id="password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                            <button
                                type="button"
                                class="password-field__toggle"
                                on:click=move |_| set_show_password.update(|v| *v = !*v)
                            >
                                {move || if show_password.get() { "Sembunyikan" } else { "Lihat" }}
                            </button>
                        </div>
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Memproses..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
