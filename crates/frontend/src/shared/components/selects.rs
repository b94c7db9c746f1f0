use contracts::enums::tipe_produksi::TIPE_PRODUKSI_PATH;
use contracts::enums::{AfdelingKey, TipeProduksi};
use contracts::shared::api::{ApiError, ListResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::get_json;

/// Production types offered by every type select, loaded once per session
#[derive(Clone, Copy)]
pub struct TipeProduksiOptions(pub RwSignal<Vec<TipeProduksi>>);

async fn fetch_tipe_produksi() -> Result<Vec<TipeProduksi>, ApiError> {
    get_json::<ListResponse<TipeProduksi>>(TIPE_PRODUKSI_PATH)
        .await?
        .into_result()
}

impl TipeProduksiOptions {
    /// Starts with the built-in list and replaces it with the backend's when available
    pub fn load() -> Self {
        let options = RwSignal::new(TipeProduksi::all());
        spawn_local(async move {
            match fetch_tipe_produksi().await {
                Ok(list) if !list.is_empty() => options.set(list),
                Ok(_) => log::warn!("tipe-produksi: empty list, keeping built-in types"),
                Err(e) => log::warn!("tipe-produksi: {}, keeping built-in types", e),
            }
        });
        Self(options)
    }
}

pub fn use_tipe_produksi() -> RwSignal<Vec<TipeProduksi>> {
    use_context::<TipeProduksiOptions>()
        .map(|o| o.0)
        .unwrap_or_else(|| RwSignal::new(TipeProduksi::all()))
}

/// `value` holds the type code; with `allow_all` an empty code means "all types"
#[component]
pub fn TipeProduksiSelect(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)] allow_all: bool,
) -> impl IntoView {
    let options = use_tipe_produksi();
    view! {
        <select
            class="form__select"
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            {allow_all.then(|| view! { <option value="">"Semua Tipe"</option> })}
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|tipe| {
                        let code = tipe.code().to_string();
                        let selected = value.get_untracked() == code;
                        view! {
                            <option value=code selected=selected>{tipe.display_name()}</option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}

/// `value` holds the afdeling label ("Setro"); with `allow_all` empty means "all"
#[component]
pub fn AfdelingSelect(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)] allow_all: bool,
) -> impl IntoView {
    view! {
        <select
            class="form__select"
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            {if allow_all {
                view! { <option value="">"Semua Afdeling"</option> }.into_any()
            } else {
                view! { <option value="">"Pilih Afdeling"</option> }.into_any()
            }}
            {AfdelingKey::all()
                .into_iter()
                .map(|key| view! { <option value=key.label()>{key.label()}</option> })
                .collect_view()}
        </select>
    }
}
