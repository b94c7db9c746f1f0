use super::view_model::BakuDetailsViewModel;
use crate::shared::components::{AutocompleteInput, TipeProduksiSelect};
use crate::shared::icons::icon;
use contracts::domain::a003_baku::aggregate::BakuForm;
use contracts::shared::autocomplete::CandidateKind;
use leptos::prelude::*;
use thaw::*;

/// Numeric yield input bound to one field of the form
fn yield_input(
    vm: BakuDetailsViewModel,
    id: &'static str,
    label: &'static str,
    get: fn(&BakuForm) -> String,
    set: fn(&mut BakuForm, String),
) -> impl IntoView {
    let form = vm.form;
    view! {
        <div class="form__group">
            <label for=id>{label}</label>
            <input
                type="number"
                step="0.1"
                min="0"
                id=id
                class="form__input"
                placeholder="0"
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}

#[component]
pub fn BakuDetails(vm: BakuDetailsViewModel, on_saved: Callback<()>) -> impl IntoView {
    let form = vm.form;
    vm.load_mandors();
    vm.load_penyadap();

    view! {
        <form
            class="form details-form baku-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                vm.save_command(on_saved);
            }
        >
            <h3>{move || if vm.target().is_update() { "Edit Produksi Baku" } else { "Input Produksi Baku" }}</h3>
            <div class="form__row">
                <div class="form__group">
                    <label for="baku-mandor">"Mandor"</label>
                    <select
                        id="baku-mandor"
                        class="form__select"
                        prop:value=move || form.get().mandor_id
                        on:change=move |ev| form.update(|f| f.mandor_id = event_target_value(&ev))
                    >
                        <option value="">"-- Pilih Mandor --"</option>
                        {move || {
                            vm.mandors
                                .get()
                                .into_iter()
                                .map(|m| {
                                    let id = m.id.to_string();
                                    let selected = form.with_untracked(|f| f.mandor_id == id);
                                    view! { <option value=id selected=selected>{m.option_label()}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>
                <div class="form__group">
                    <label for="baku-penyadap">"Penyadap"</label>
                    <AutocompleteInput
                        kind=CandidateKind::Penyadap
                        candidates=vm.penyadap_candidates
                        selected_id=vm.penyadap_id
                        input_id="baku-penyadap"
                        placeholder="Ketik nama atau NIK penyadap"
                        on_query=Callback::new(move |q: String| vm.search_penyadap(q))
                    />
                </div>
                <div class="form__group">
                    <label>"Jenis"</label>
                    <TipeProduksiSelect
                        value=Signal::derive(move || form.get().tipe)
                        on_change=Callback::new(move |v| form.update(|f| f.tipe = v))
                    />
                </div>
            </div>
            <div class="form__row">
                {yield_input(vm, "baku-latek", "Basah Latek", |f| f.basah_latex.clone(), |f, v| f.basah_latex = v)}
                {yield_input(vm, "baku-lump", "Basah Lump", |f| f.basah_lump.clone(), |f, v| f.basah_lump = v)}
                {yield_input(vm, "baku-sheet", "Sheet", |f| f.sheet.clone(), |f, v| f.sheet = v)}
                {yield_input(vm, "baku-brcr", "Br.Cr", |f| f.br_cr.clone(), |f, v| f.br_cr = v)}
            </div>
            <div class="form__actions">
                <button type="submit" class="button button--primary" disabled=move || vm.saving.get()>
                    {icon("save")}
                    {move || vm.target().submit_label()}
                </button>
                <Show when=move || vm.target().is_update()>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.reset()>
                        "Batal"
                    </Button>
                </Show>
            </div>
        </form>
    }
}
