use contracts::projections::p901_visualisasi::dto::{
    parse_manual_values, threshold_or_default, Satuan, TipeData, VisualisasiForm, DEFAULT_THRESHOLD,
    DEFAULT_TITLE, SAMPLE_VALUES,
};
use contracts::shared::api::ApiError;
use contracts::shared::autocomplete::{Candidate, CandidateKind};
use contracts::shared::series::{Granularity, SeriesPoint};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_mandor::api as mandor_api;
use crate::projections::p901_visualisasi::api;
use crate::shared::components::bar_chart::export_png;
use crate::shared::components::{AfdelingSelect, AutocompleteInput, BarChart, TipeProduksiSelect};
use crate::shared::date_utils::today_str;
use crate::shared::dialogs::{alert, alert_error};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::polling::RequestGeneration;

fn blank_form() -> VisualisasiForm {
    VisualisasiForm {
        tanggal_akhir: today_str(),
        threshold: DEFAULT_THRESHOLD.to_string(),
        ..VisualisasiForm::default()
    }
}

/// Chart heading for a backend series
fn series_title(form: &VisualisasiForm) -> String {
    format!(
        "{} - {} ({} s/d {})",
        form.satuan.display_name(),
        form.tipe_data.display_name(),
        form.tanggal_awal,
        form.tanggal_akhir
    )
}

/// Bar chart of a recap measure over time, or of hand-typed values
#[component]
pub fn VisualisasiPage() -> impl IntoView {
    let form = RwSignal::new(blank_form());
    let mandor_id = RwSignal::new(String::new());
    let mandor_candidates = RwSignal::new(Vec::<Candidate>::new());
    let points = RwSignal::new(Vec::<SeriesPoint>::new());
    let threshold = RwSignal::new(DEFAULT_THRESHOLD);
    let title = RwSignal::new(DEFAULT_TITLE.to_string());
    let manual_values = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let generation = StoredValue::new(RequestGeneration::new());
    let canvas = NodeRef::<html::Canvas>::new();

    spawn_local(async move {
        match mandor_api::fetch_candidates().await {
            Ok(list) => mandor_candidates.set(list),
            Err(e) => log::warn!("visualisasi mandor list: {}", e),
        }
    });

    let tipe_data = move || form.with(|f| f.tipe_data);

    let show = move || {
        let mut snapshot = form.get_untracked();
        snapshot.mandor_id = mandor_id.get_untracked();
        let request = match snapshot.validate() {
            Ok(r) => r,
            Err(e) => return alert_error("visualisasi", &ApiError::from(e)),
        };
        let Some(ticket) = generation.try_with_value(|g| g.next()) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_series(&request.query).await;
            if !generation
                .try_with_value(|g| g.accept(ticket, "visualisasi"))
                .unwrap_or(false)
            {
                return;
            }
            match result {
                Ok(resp) => {
                    let series = resp.series(&request.range, request.granularity);
                    if series.iter().all(|p| p.value == 0.0) {
                        log::info!("visualisasi: no production in range");
                    }
                    threshold.set(request.threshold);
                    title.set(series_title(&snapshot));
                    points.set(series);
                }
                Err(e) => alert_error("visualisasi", &e),
            }
            loading.set(false);
        });
    };

    let load_default = move |_| {
        let Some(ticket) = generation.try_with_value(|g| g.next()) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_default().await;
            if !generation
                .try_with_value(|g| g.accept(ticket, "visualisasi default"))
                .unwrap_or(false)
            {
                return;
            }
            match result {
                Ok(resp) => match resp.inferred_range() {
                    Some(range) => {
                        let granularity = form.with_untracked(|f| f.granularity);
                        form.update(|f| {
                            f.tanggal_awal = range.start_str();
                            f.tanggal_akhir = range.end_str();
                        });
                        threshold.set(form.with_untracked(|f| threshold_or_default(&f.threshold)));
                        title.set(form.with_untracked(series_title));
                        points.set(resp.series(&range, granularity));
                    }
                    None => alert("Belum ada data produksi untuk ditampilkan"),
                },
                Err(e) => alert_error("visualisasi default", &e),
            }
            loading.set(false);
        });
    };

    let draw_manual = move || {
        let series = parse_manual_values(&manual_values.get_untracked());
        if series.is_empty() {
            alert("Masukkan data angka dipisahkan koma");
            return;
        }
        generation.with_value(|g| g.invalidate());
        threshold.set(form.with_untracked(|f| threshold_or_default(&f.threshold)));
        title.set(DEFAULT_TITLE.to_string());
        points.set(series);
    };

    let clear = move |_| {
        generation.with_value(|g| g.invalidate());
        manual_values.set(String::new());
        form.update(|f| f.threshold = DEFAULT_THRESHOLD.to_string());
        threshold.set(DEFAULT_THRESHOLD);
        title.set(DEFAULT_TITLE.to_string());
        points.set(Vec::new());
        loading.set(false);
    };

    let export = move |_| match canvas.get_untracked() {
        Some(c) => {
            if let Err(e) = export_png(&c, "chart.png") {
                log::error!("chart export: {}", e);
            }
        }
        None => log::warn!("chart export: canvas not mounted"),
    };

    view! {
        <PageFrame page_id="p901_visualisasi--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Visualisasi Produksi">
                <button class="button button--secondary" on:click=load_default disabled=move || loading.get()>
                    {icon("refresh")}
                    "Default"
                </button>
                <button class="button button--secondary" on:click=export>
                    {icon("download")}
                    "Export PNG"
                </button>
            </PageHeader>

            <form
                class="form details-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    show();
                }
            >
                <div class="form__row">
                    <div class="form__group">
                        <label>"Data"</label>
                        <select
                            class="form__select"
                            prop:value=move || tipe_data().code()
                            on:change=move |ev| {
                                let next = TipeData::from_code(&event_target_value(&ev));
                                form.update(|f| f.tipe_data = next);
                            }
                        >
                            {TipeData::all()
                                .into_iter()
                                .map(|t| view! { <option value=t.code()>{t.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <Show when=move || tipe_data() == TipeData::Afdeling>
                        <div class="form__group">
                            <label>"Afdeling"</label>
                            <AfdelingSelect
                                value=Signal::derive(move || form.get().afdeling)
                                on_change=Callback::new(move |v| form.update(|f| f.afdeling = v))
                            />
                        </div>
                    </Show>
                    <Show when=move || tipe_data() == TipeData::Mandor>
                        <div class="form__group">
                            <label>"Mandor"</label>
                            <AutocompleteInput
                                kind=CandidateKind::Mandor
                                candidates=mandor_candidates
                                selected_id=mandor_id
                                placeholder="Ketik nama atau NIK mandor"
                            />
                        </div>
                    </Show>
                    <div class="form__group">
                        <label>"Satuan"</label>
                        <select
                            class="form__select"
                            prop:value=move || form.get().satuan.code()
                            on:change=move |ev| {
                                let next = Satuan::from_code(&event_target_value(&ev));
                                form.update(|f| f.satuan = next);
                            }
                        >
                            {Satuan::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label>"Tipe Produksi"</label>
                        <TipeProduksiSelect
                            value=Signal::derive(move || form.get().tipe_produksi)
                            on_change=Callback::new(move |v| form.update(|f| f.tipe_produksi = v))
                            allow_all=true
                        />
                    </div>
                </div>
                <div class="form__row">
                    <div class="form__group">
                        <label>"Tanggal Awal"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || form.get().tanggal_awal
                            on:input=move |ev| form.update(|f| f.tanggal_awal = event_target_value(&ev))
                        />
                    </div>
                    <div class="form__group">
                        <label>"Tanggal Akhir"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || form.get().tanggal_akhir
                            on:input=move |ev| form.update(|f| f.tanggal_akhir = event_target_value(&ev))
                        />
                    </div>
                    <div class="form__group">
                        <label>"Periode"</label>
                        <select
                            class="form__select"
                            prop:value=move || form.get().granularity.code()
                            on:change=move |ev| {
                                if let Some(g) = Granularity::from_code(&event_target_value(&ev)) {
                                    form.update(|f| f.granularity = g);
                                }
                            }
                        >
                            {Granularity::all()
                                .into_iter()
                                .map(|g| view! { <option value=g.code()>{g.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label>"Batas"</label>
                        <input
                            type="number"
                            class="form__input"
                            prop:value=move || form.get().threshold
                            on:input=move |ev| form.update(|f| f.threshold = event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="form__actions">
                    <button type="submit" class="button button--primary" disabled=move || loading.get()>
                        {icon("bar-chart")}
                        "Tampilkan Grafik"
                    </button>
                </div>
            </form>

            <div class="visualisasi__manual form">
                <div class="form__row">
                    <div class="form__group form__group--wide">
                        <label>"Data manual (pisahkan dengan koma)"</label>
                        <input
                            type="text"
                            class="form__input"
                            placeholder=SAMPLE_VALUES
                            prop:value=move || manual_values.get()
                            on:input=move |ev| manual_values.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="form__actions">
                    <button type="button" class="button button--secondary" on:click=move |_| draw_manual()>
                        "Gambar"
                    </button>
                    <button
                        type="button"
                        class="button button--secondary"
                        on:click=move |_| {
                            manual_values.set(SAMPLE_VALUES.to_string());
                            draw_manual();
                        }
                    >
                        "Contoh Data"
                    </button>
                    <button type="button" class="button button--secondary" on:click=clear>
                        {icon("cancel")}
                        "Bersihkan"
                    </button>
                </div>
            </div>

            <h3 class="page__section-title">{move || title.get()}</h3>
            {move || loading.get().then(|| view! { <p class="page__empty">"Memuat..."</p> })}
            <BarChart points=points threshold=threshold node_ref=canvas />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_title_names_measure_and_range() {
        let form = VisualisasiForm {
            satuan: Satuan::KeringSheet,
            tanggal_awal: "2024-01-01".into(),
            tanggal_akhir: "2024-01-31".into(),
            ..VisualisasiForm::default()
        };
        assert_eq!(
            series_title(&form),
            "Kering Sheet (kg) - Total Kebun (2024-01-01 s/d 2024-01-31)"
        );
    }

    #[test]
    fn test_blank_form_defaults() {
        let form = blank_form();
        assert_eq!(form.threshold, "150");
        assert_eq!(form.tipe_data, TipeData::Total);
    }
}
