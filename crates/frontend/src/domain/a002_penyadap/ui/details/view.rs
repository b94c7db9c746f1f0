use super::view_model::PenyadapDetailsViewModel;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn PenyadapDetails(vm: PenyadapDetailsViewModel, on_saved: Callback<()>) -> impl IntoView {
    let form = vm.form;

    view! {
        <form
            class="form details-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                vm.save_command(on_saved);
            }
        >
            <h3>{move || if vm.target().is_update() { "Edit Penyadap" } else { "Tambah Penyadap" }}</h3>
            <div class="form__row">
                <div class="form__group">
                    <label for="penyadap-nama">"Nama Penyadap"</label>
                    <input
                        type="text"
                        id="penyadap-nama"
                        class="form__input"
                        prop:value=move || form.get().nama_penyadap
                        on:input=move |ev| form.update(|f| f.nama_penyadap = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label for="penyadap-nik">"NIK"</label>
                    <input
                        type="text"
                        id="penyadap-nik"
                        class="form__input"
                        prop:value=move || form.get().nik
                        on:input=move |ev| form.update(|f| f.nik = event_target_value(&ev))
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
