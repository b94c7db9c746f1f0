use contracts::domain::a004_peta::aggregate::{Peta, PetaForm};
use contracts::shared::api::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_peta::api;
use crate::shared::dialogs::{alert, alert_error};
use crate::shared::icons::icon;

/// Edit state of one block; blocks are only ever updated from this page
#[derive(Clone, Copy)]
pub struct PetaDetailsViewModel {
    pub form: RwSignal<PetaForm>,
    pub editing_id: RwSignal<Option<u64>>,
    pub saving: RwSignal<bool>,
}

impl PetaDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(PetaForm::default()),
            editing_id: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn edit(&self, peta: &Peta) {
        self.form.set(PetaForm::from_peta(peta));
        self.editing_id.set(Some(peta.id));
    }

    pub fn reset(&self) {
        self.form.set(PetaForm::default());
        self.editing_id.set(None);
    }

    /// PUTs the form; `on_saved` gets the block as the server stored it
    pub fn save_command(&self, on_saved: Callback<Peta>) {
        let Some(id) = self.editing_id.get_untracked() else {
            return;
        };
        let dto = match self.form.with_untracked(|f| f.validate()) {
            Ok(dto) => dto,
            Err(e) => return alert_error("peta", &ApiError::from(e)),
        };
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::update(id, &dto).await {
                Ok((peta, message)) => {
                    alert(&message);
                    this.reset();
                    on_saved.run(peta);
                }
                Err(e) => alert_error("peta update", &e),
            }
            this.saving.set(false);
        });
    }
}

impl Default for PetaDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

fn text_field(
    form: RwSignal<PetaForm>,
    label: &'static str,
    input_type: &'static str,
    get: fn(&PetaForm) -> String,
    set: fn(&mut PetaForm, String),
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label>{label}</label>
            <input
                type=input_type
                class="form__input"
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}

#[component]
pub fn PetaDetails(vm: PetaDetailsViewModel, on_saved: Callback<Peta>) -> impl IntoView {
    let form = vm.form;
    view! {
        <Show when=move || vm.editing_id.get().is_some()>
            <form
                class="form details-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    vm.save_command(on_saved);
                }
            >
                <h3>"Edit Blok"</h3>
                <div class="form__row">
                    {text_field(form, "Kode", "text", |f| f.code.clone(), |f, v| f.code = v)}
                    {text_field(form, "Blok", "text", |f| f.blok.clone(), |f, v| f.blok = v)}
                    {text_field(form, "Afdeling", "text", |f| f.afdeling.clone(), |f, v| f.afdeling = v)}
                    {text_field(form, "Luas (ha)", "number", |f| f.luas.clone(), |f, v| f.luas = v)}
                </div>
                <div class="form__row">
                    {text_field(form, "Jumlah Pohon", "number", |f| f.jumlah_pohon.clone(), |f, v| f.jumlah_pohon = v)}
                    {text_field(form, "Jenis Kebun", "text", |f| f.jenis_kebun.clone(), |f, v| f.jenis_kebun = v)}
                    {text_field(form, "Tahun Tanam", "number", |f| f.tahun_tanam.clone(), |f, v| f.tahun_tanam = v)}
                    {text_field(form, "Kloon", "text", |f| f.kloon.clone(), |f, v| f.kloon = v)}
                </div>
                <div class="form__actions">
                    <button type="submit" class="button button--primary" disabled=move || vm.saving.get()>
                        {icon("save")}
                        "Perbarui"
                    </button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.reset()>
                        "Batal"
                    </Button>
                </div>
            </form>
        </Show>
    }
}
