use super::view_model::MandorDetailsViewModel;
use crate::shared::components::{AfdelingSelect, TipeProduksiSelect};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn MandorDetails(vm: MandorDetailsViewModel, on_saved: Callback<()>) -> impl IntoView {
    let form = vm.form;

    view! {
        <form
            class="form details-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                vm.save_command(on_saved);
            }
        >
            <h3>{move || if vm.target().is_update() { "Edit Mandor" } else { "Tambah Mandor" }}</h3>
            <div class="form__row">
                <div class="form__group">
                    <label for="mandor-nama">"Nama Mandor"</label>
                    <input
                        type="text"
                        id="mandor-nama"
                        class="form__input"
                        prop:value=move || form.get().mandor
                        on:input=move |ev| form.update(|f| f.mandor = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label for="mandor-nik">"NIK"</label>
                    <input
                        type="text"
                        id="mandor-nik"
                        class="form__input"
                        prop:value=move || form.get().nik
                        on:input=move |ev| form.update(|f| f.nik = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label for="mandor-tahun">"Tahun Tanam"</label>
                    <input
                        type="number"
                        id="mandor-tahun"
                        class="form__input"
                        prop:value=move || form.get().tahun_tanam
                        on:input=move |ev| form.update(|f| f.tahun_tanam = event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="form__row">
                <div class="form__group">
                    <label>"Afdeling"</label>
                    <AfdelingSelect
                        value=Signal::derive(move || form.get().afdeling)
                        on_change=Callback::new(move |v| form.update(|f| f.afdeling = v))
                    />
                </div>
                <div class="form__group">
                    <label>"Tipe Produksi"</label>
                    <TipeProduksiSelect
                        value=Signal::derive(move || form.get().tipe)
                        on_change=Callback::new(move |v| form.update(|f| f.tipe = v))
                    />
                </div>
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
