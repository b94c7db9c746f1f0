use contracts::shared::api::ApiError;
use contracts::system::account::{
    failure_text, success_text, ChangePasswordForm, ChangeUsernameForm, RELOGIN_NOTICE,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::dialogs::alert;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::api;
use crate::system::auth::context::{complete_login, do_logout, use_auth};

#[derive(Clone, Copy, PartialEq, Eq)]
enum AccountAction {
    Username,
    Password,
}

fn report_failure(context: &str, error: &ApiError) {
    log::warn!("{}: {}", context, error);
    let text = match error {
        ApiError::Validation(e) => e.to_string(),
        ApiError::Application(msg) => msg.clone(),
        other => other.to_string(),
    };
    alert(&failure_text(&text));
}

#[component]
pub fn AccountPage() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let action = RwSignal::new(None::<AccountAction>);
    let busy = RwSignal::new(false);

    let username_form = RwSignal::new(ChangeUsernameForm::default());
    let password_form = RwSignal::new(ChangePasswordForm::default());

    let submit_username = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = match username_form.get_untracked().validate() {
            Ok(r) => r,
            Err(e) => return report_failure("change-username", &ApiError::from(e)),
        };
        busy.set(true);
        spawn_local(async move {
            match api::change_username(&request).await {
                Ok(message) => {
                    alert(&success_text(
                        &message,
                        &[
                            ("Username Lama", request.old_username.as_str()),
                            ("Username Baru", request.new_username.as_str()),
                        ],
                    ));
                    username_form.set(ChangeUsernameForm::default());
                    action.set(None);
                    let logged_in_as_old = auth_state
                        .get_untracked()
                        .username
                        .is_some_and(|u| u == request.old_username);
                    if logged_in_as_old {
                        complete_login(set_auth_state, request.new_username.clone());
                    }
                }
                Err(e) => report_failure("change-username", &e),
            }
            busy.set(false);
        });
    };

    let submit_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = match password_form.get_untracked().validate() {
            Ok(r) => r,
            Err(e) => return report_failure("change-password", &ApiError::from(e)),
        };
        busy.set(true);
        spawn_local(async move {
            match api::change_password(&request).await {
                Ok(message) => {
                    alert(&success_text(&message, &[("Username", request.username.as_str())]));
                    password_form.set(ChangePasswordForm::default());
                    alert(RELOGIN_NOTICE);
                    do_logout(set_auth_state).await;
                }
                Err(e) => report_failure("change-password", &e),
            }
            busy.set(false);
        });
    };

    let username_panel = move || {
        view! {
            <form class="form account__form" on:submit=submit_username>
                <h3>"Ubah Username"</h3>
                <div class="form__group">
                    <label>"Username Lama"</label>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || username_form.get().old_username
                        on:input=move |ev| username_form.update(|f| f.old_username = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label>"Username Baru"</label>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || username_form.get().new_username
                        on:input=move |ev| username_form.update(|f| f.new_username = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label>"Password"</label>
                    <input
                        type="password"
                        class="form__input"
                        prop:value=move || username_form.get().password
                        on:input=move |ev| username_form.update(|f| f.password = event_target_value(&ev))
                    />
                </div>
                <div class="form__actions">
                    <button type="submit" class="button button--primary" disabled=move || busy.get()>
                        "Simpan"
                    </button>
                    <button type="button" class="button button--secondary" on:click=move |_| action.set(None)>
                        "Kembali"
                    </button>
                </div>
            </form>
        }
    };

    let password_panel = move || {
        view! {
            <form class="form account__form" on:submit=submit_password>
                <h3>"Ubah Password"</h3>
                <div class="form__group">
                    <label>"Username"</label>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || password_form.get().username
                        on:input=move |ev| password_form.update(|f| f.username = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label>"Password Lama"</label>
                    <input
                        type="password"
                        class="form__input"
                        prop:value=move || password_form.get().old_password
                        on:input=move |ev| password_form.update(|f| f.old_password = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label>"Password Baru"</label>
                    <input
                        type="password"
                        class="form__input"
                        prop:value=move || password_form.get().new_password
                        on:input=move |ev| password_form.update(|f| f.new_password = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label>"Konfirmasi Password Baru"</label>
                    <input
                        type="password"
                        class="form__input"
                        prop:value=move || password_form.get().confirm_password
                        on:input=move |ev| password_form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                </div>
                <div class="form__actions">
                    <button type="submit" class="button button--primary" disabled=move || busy.get()>
                        "Simpan"
                    </button>
                    <button type="button" class="button button--secondary" on:click=move |_| action.set(None)>
                        "Kembali"
                    </button>
                </div>
            </form>
        }
    };

    view! {
        <PageFrame page_id="sys_account--system" category=PAGE_CAT_SYSTEM>
            <PageHeader
                title="Manajemen Akun"
                subtitle=auth_state.get_untracked().username.map(|u| format!("Login sebagai {}", u)).unwrap_or_default()
            />
            <div class="page__content">
                {move || match action.get() {
                    None => view! {
                        <div class="account__choices">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| action.set(Some(AccountAction::Username))
                            >
                                "Ubah Username"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| action.set(Some(AccountAction::Password))
                            >
                                "Ubah Password"
                            </Button>
                        </div>
                    }.into_any(),
                    Some(AccountAction::Username) => username_panel().into_any(),
                    Some(AccountAction::Password) => password_panel().into_any(),
                }}
            </div>
        </PageFrame>
    }
}
