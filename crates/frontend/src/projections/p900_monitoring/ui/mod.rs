use contracts::projections::p900_monitoring::dto::{
    MandorRow, MonitoringSummary, PenyadapRow, SearchForm, ViewMode,
};
use contracts::shared::api::ApiError;
use contracts::shared::autocomplete::{Candidate, CandidateKind};
use contracts::shared::numeric::{format_decimal, format_fixed2};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_mandor::api as mandor_api;
use crate::domain::a002_penyadap::api as penyadap_api;
use crate::projections::p900_monitoring::api;
use crate::shared::components::{AfdelingSelect, AutocompleteInput, StatCard, TipeProduksiSelect, ValueFormat};
use crate::shared::date_utils::{format_date, today_str};
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::polling::RequestGeneration;

#[derive(Debug, Clone, PartialEq)]
enum Rows {
    Penyadap(Vec<PenyadapRow>),
    Mandor(Vec<MandorRow>),
}

impl Rows {
    fn is_empty(&self) -> bool {
        match self {
            Rows::Penyadap(r) => r.is_empty(),
            Rows::Mandor(r) => r.is_empty(),
        }
    }
}

fn blank_form() -> SearchForm {
    SearchForm {
        tanggal_akhir: today_str(),
        ..SearchForm::default()
    }
}

/// Summary cards per mode: label, value, format
fn summary_cards(mode: ViewMode, s: &MonitoringSummary) -> Vec<(&'static str, f64, ValueFormat)> {
    match mode {
        ViewMode::Penyadap => vec![
            ("Jumlah Data", s.total_records, ValueFormat::Integer),
            ("Total Basah Latek", s.total_basah_latek, ValueFormat::Decimal),
            ("Total Sheet", s.total_sheet, ValueFormat::Fixed2),
            ("Total Basah Lump", s.total_basah_lump, ValueFormat::Decimal),
            ("Total Br.Cr", s.total_br_cr, ValueFormat::Fixed2),
            ("Total Produksi", s.total_produksi, ValueFormat::Fixed2),
        ],
        ViewMode::Mandor => vec![
            ("Jumlah Data", s.total_records, ValueFormat::Integer),
            ("Total HKO", s.total_hko, ValueFormat::Integer),
            ("Latek Kebun", s.total_basah_latek_kebun, ValueFormat::Decimal),
            ("Latek Pabrik", s.total_basah_latek_pabrik, ValueFormat::Decimal),
            ("Sheet Kering", s.total_kering_sheet, ValueFormat::Decimal),
            ("Rata-rata per Taper", s.rata_rata_produksi_per_taper, ValueFormat::Fixed2),
            ("Total Produksi", s.total_produksi, ValueFormat::Fixed2),
        ],
    }
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn persen_class(alert: bool) -> &'static str {
    if alert {
        "table__cell table__cell--right monitoring__persen--alert"
    } else {
        "table__cell table__cell--right monitoring__persen--ok"
    }
}

fn penyadap_table(rows: Vec<PenyadapRow>) -> AnyView {
    view! {
        <table class="table__data table--striped">
            <thead class="table__head">
                <tr>
                    <th class="table__header-cell">"Tanggal"</th>
                    <th class="table__header-cell">"Mandor"</th>
                    <th class="table__header-cell">"Tipe"</th>
                    <th class="table__header-cell">"Tahun Tanam"</th>
                    <th class="table__header-cell">"Afdeling"</th>
                    <th class="table__header-cell">"NIK"</th>
                    <th class="table__header-cell">"Nama Penyadap"</th>
                    <th class="table__header-cell">"Basah Latek"</th>
                    <th class="table__header-cell">"Sheet"</th>
                    <th class="table__header-cell">"Basah Lump"</th>
                    <th class="table__header-cell">"Br.Cr"</th>
                    <th class="table__header-cell">"Total Produksi"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|r| view! {
                    <tr class="table__row">
                        <td class="table__cell">{format_date(&r.tanggal)}</td>
                        <td class="table__cell">{or_dash(&r.mandor)}</td>
                        <td class="table__cell">{or_dash(&r.tipe_produksi)}</td>
                        <td class="table__cell">{or_dash(&r.tahun_tanam)}</td>
                        <td class="table__cell">{or_dash(&r.afdeling)}</td>
                        <td class="table__cell">{or_dash(&r.nik)}</td>
                        <td class="table__cell">{or_dash(&r.nama_penyadap)}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.basah_latek)}</td>
                        <td class="table__cell table__cell--right">{format_fixed2(r.sheet)}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.basah_lump)}</td>
                        <td class="table__cell table__cell--right">{format_fixed2(r.br_cr)}</td>
                        <td class="table__cell table__cell--right">{format_fixed2(r.total_produksi)}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

fn mandor_table(rows: Vec<MandorRow>) -> AnyView {
    view! {
        <table class="table__data table--striped">
            <thead class="table__head">
                <tr>
                    <th class="table__header-cell">"Tanggal"</th>
                    <th class="table__header-cell">"Mandor"</th>
                    <th class="table__header-cell">"Tipe"</th>
                    <th class="table__header-cell">"Tahun Tanam"</th>
                    <th class="table__header-cell">"Afdeling"</th>
                    <th class="table__header-cell">"HKO"</th>
                    <th class="table__header-cell">"Latek Kebun"</th>
                    <th class="table__header-cell">"Latek Pabrik"</th>
                    <th class="table__header-cell">"% Latek"</th>
                    <th class="table__header-cell">"Lump Kebun"</th>
                    <th class="table__header-cell">"Lump Pabrik"</th>
                    <th class="table__header-cell">"% Lump"</th>
                    <th class="table__header-cell">"Kering Sheet"</th>
                    <th class="table__header-cell">"Kering Br.Cr"</th>
                    <th class="table__header-cell">"Per Taper"</th>
                    <th class="table__header-cell">"Total Produksi"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|r| view! {
                    <tr class="table__row">
                        <td class="table__cell">{format_date(&r.tanggal)}</td>
                        <td class="table__cell">{or_dash(&r.mandor)}</td>
                        <td class="table__cell">{or_dash(&r.tipe_produksi)}</td>
                        <td class="table__cell">{or_dash(&r.tahun_tanam)}</td>
                        <td class="table__cell">{or_dash(&r.afdeling)}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.hko_hari_ini)}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.hari_ini_basah_latek_kebun)}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.hari_ini_basah_latek_pabrik)}</td>
                        <td class=persen_class(r.latek_alert())>{format!("{}%", format_fixed2(r.hari_ini_basah_latek_persen))}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.hari_ini_basah_lump_kebun)}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.hari_ini_basah_lump_pabrik)}</td>
                        <td class=persen_class(r.lump_alert())>{format!("{}%", format_fixed2(r.hari_ini_basah_lump_persen))}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.hari_ini_kering_sheet)}</td>
                        <td class="table__cell table__cell--right">{format_decimal(r.hari_ini_kering_br_cr)}</td>
                        <td class="table__cell table__cell--right">{format_fixed2(r.produksi_per_taper_hari_ini)}</td>
                        <td class="table__cell table__cell--right">{format_fixed2(r.total_produksi_hari_ini)}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

/// Production history of one penyadap or one mandor over a date range
#[component]
pub fn MonitoringPage() -> impl IntoView {
    let form = RwSignal::new(blank_form());
    let person_id = RwSignal::new(String::new());
    let mandor_candidates = RwSignal::new(Vec::<Candidate>::new());
    let penyadap_candidates = RwSignal::new(Vec::<Candidate>::new());
    let result = RwSignal::new(None::<(Rows, MonitoringSummary)>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let generation = StoredValue::new(RequestGeneration::new());

    spawn_local(async move {
        match mandor_api::fetch_candidates().await {
            Ok(list) => mandor_candidates.set(list),
            Err(e) => log::warn!("monitoring mandor list: {}", e),
        }
    });
    spawn_local(async move {
        match penyadap_api::fetch_candidates().await {
            Ok(list) => penyadap_candidates.set(list),
            Err(e) => log::warn!("monitoring penyadap list: {}", e),
        }
    });

    let mode = move || form.with(|f| f.mode);

    let set_mode = move |next: ViewMode| {
        if form.with_untracked(|f| f.mode) == next {
            return;
        }
        form.update(|f| f.mode = next);
        person_id.set(String::new());
        result.set(None);
        error.set(None);
        generation.with_value(|g| g.invalidate());
    };

    let run_search = move || {
        let mut snapshot = form.get_untracked();
        snapshot.person_id = person_id.get_untracked();
        let query = match snapshot.validate() {
            Ok(q) => q,
            Err(e) => return alert_error("monitoring", &ApiError::from(e)),
        };
        let Some(ticket) = generation.try_with_value(|g| g.next()) else {
            return;
        };
        let view_mode = snapshot.mode;
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let outcome = match view_mode {
                ViewMode::Penyadap => api::search_penyadap(&query)
                    .await
                    .map(|(rows, s)| (Rows::Penyadap(rows), s)),
                ViewMode::Mandor => api::search_mandor(&query)
                    .await
                    .map(|(rows, s)| (Rows::Mandor(rows), s)),
            };
            if !generation
                .try_with_value(|g| g.accept(ticket, "monitoring"))
                .unwrap_or(false)
            {
                return;
            }
            match outcome {
                Ok(found) => result.set(Some(found)),
                Err(e) => {
                    log::error!("monitoring search: {}", e);
                    result.set(None);
                    error.set(Some(e.alert_text()));
                }
            }
            loading.set(false);
        });
    };

    let reset = move |_| {
        form.update(|f| {
            let kept = f.mode;
            *f = blank_form();
            f.mode = kept;
        });
        person_id.set(String::new());
        result.set(None);
        error.set(None);
        generation.with_value(|g| g.invalidate());
        loading.set(false);
    };

    view! {
        <PageFrame page_id="p900_monitoring--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Monitoring Produksi" />

            <div class="page__toolbar monitoring__modes">
                {[ViewMode::Penyadap, ViewMode::Mandor]
                    .into_iter()
                    .map(|m| view! {
                        <button
                            class="button"
                            class:button--primary=move || mode() == m
                            class:button--secondary=move || mode() != m
                            on:click=move |_| set_mode(m)
                        >
                            {m.display_name()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <form
                class="form details-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    run_search();
                }
            >
                <div class="form__row">
                    <div class="form__group">
                        <label>{move || mode().display_name()}</label>
                        {move || match mode() {
                            ViewMode::Penyadap => view! {
                                <AutocompleteInput
                                    kind=CandidateKind::Penyadap
                                    candidates=penyadap_candidates
                                    selected_id=person_id
                                    placeholder="Ketik nama atau NIK penyadap"
                                />
                            }.into_any(),
                            ViewMode::Mandor => view! {
                                <AutocompleteInput
                                    kind=CandidateKind::Mandor
                                    candidates=mandor_candidates
                                    selected_id=person_id
                                    placeholder="Ketik nama atau NIK mandor"
                                />
                            }.into_any(),
                        }}
                    </div>
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
                        <label>"Tipe Produksi"</label>
                        <TipeProduksiSelect
                            value=Signal::derive(move || form.get().tipe_produksi)
                            on_change=Callback::new(move |v| form.update(|f| f.tipe_produksi = v))
                            allow_all=true
                        />
                    </div>
                    <div class="form__group">
                        <label>"Afdeling"</label>
                        <AfdelingSelect
                            value=Signal::derive(move || form.get().afdeling)
                            on_change=Callback::new(move |v| form.update(|f| f.afdeling = v))
                            allow_all=true
                        />
                    </div>
                </div>
                <div class="form__actions">
                    <button type="submit" class="button button--primary" disabled=move || loading.get()>
                        {icon("search")}
                        "Tampilkan"
                    </button>
                    <button type="button" class="button button--secondary" on:click=reset>
                        {icon("cancel")}
                        "Reset"
                    </button>
                </div>
            </form>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || {
                if loading.get() {
                    return view! { <p class="page__empty">"Memuat data..."</p> }.into_any();
                }
                match result.get() {
                    None => view! {
                        <p class="page__empty">"Silakan pilih filter dan klik tombol untuk menampilkan data"</p>
                    }.into_any(),
                    Some((rows, _)) if rows.is_empty() => view! {
                        <p class="page__empty">"Tidak ada data untuk filter ini."</p>
                    }.into_any(),
                    Some((rows, summary)) => {
                        let cards = summary_cards(mode(), &summary)
                            .into_iter()
                            .map(|(label, value, format)| view! {
                                <StatCard label=label value=Signal::derive(move || Some(value)) format=format />
                            })
                            .collect_view();
                        let table = match rows {
                            Rows::Penyadap(r) => penyadap_table(r),
                            Rows::Mandor(r) => mandor_table(r),
                        };
                        view! {
                            <div class="monitoring__summary">{cards}</div>
                            <div class="table-container">{table}</div>
                        }.into_any()
                    }
                }
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_cards_follow_mode() {
        let summary = MonitoringSummary {
            total_records: 3.0,
            total_hko: 12.0,
            total_basah_latek: 40.0,
            ..MonitoringSummary::default()
        };
        let penyadap = summary_cards(ViewMode::Penyadap, &summary);
        assert_eq!(penyadap[1], ("Total Basah Latek", 40.0, ValueFormat::Decimal));
        assert!(penyadap.iter().all(|(label, _, _)| *label != "Total HKO"));

        let mandor = summary_cards(ViewMode::Mandor, &summary);
        assert_eq!(mandor[1], ("Total HKO", 12.0, ValueFormat::Integer));
        assert_eq!(mandor[0].1, 3.0);
    }

    #[test]
    fn test_blank_cells_show_dash() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("Setro"), "Setro");
    }
}
