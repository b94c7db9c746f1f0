use chrono::NaiveDate;
use contracts::domain::a003_baku::aggregate::{rekap_by_tipe, BakuDetail, DetailTotals};
use contracts::shared::numeric::format_decimal;
use contracts::shared::series::DATE_FORMAT;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a003_baku::api;
use crate::shared::components::TableTotalsRow;
use crate::shared::date_utils::{format_long_date, today};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::polling::RequestGeneration;

fn persen(value: f64) -> String {
    format!("{}%", format_decimal(value))
}

fn detail_row(d: BakuDetail) -> impl IntoView {
    view! {
        <tr class="table__row">
            <td class="table__cell">{d.tahun_tanam.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())}</td>
            <td class="table__cell">{d.nik.clone()}</td>
            <td class="table__cell">{d.mandor.clone()}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.hko)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_kebun_basah_latek)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_pabrik_basah_latek)}</td>
            <td class="table__cell table__cell--right">{persen(d.persentase_selisih_basah_latek)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_kebun_basah_lump)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_pabrik_basah_lump)}</td>
            <td class="table__cell table__cell--right">{persen(d.persentase_selisih_basah_lump)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.k3_sheet)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_sheet)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_br_cr)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.kering())}</td>
        </tr>
    }
}

/// Total cells after the three label columns; percentages come from the sums
fn totals_cells(t: DetailTotals) -> impl IntoView {
    view! {
        <td class="table__cell--right">{format_decimal(t.hko)}</td>
        <td class="table__cell--right">{format_decimal(t.kebun_latek)}</td>
        <td class="table__cell--right">{format_decimal(t.pabrik_latek)}</td>
        <td class="table__cell--right">{persen(t.latek_persen())}</td>
        <td class="table__cell--right">{format_decimal(t.kebun_lump)}</td>
        <td class="table__cell--right">{format_decimal(t.pabrik_lump)}</td>
        <td class="table__cell--right">{persen(t.lump_persen())}</td>
        <td class="table__cell--right">{persen(t.k3_sheet_persen())}</td>
        <td class="table__cell--right">{format_decimal(t.sheet)}</td>
        <td class="table__cell--right">{format_decimal(t.br_cr)}</td>
        <td class="table__cell--right">{format_decimal(t.kering)}</td>
    }
}

fn table_head() -> impl IntoView {
    view! {
        <thead class="table__head">
            <tr>
                <th class="table__header-cell" rowspan="2">"TAHUN TANAM"</th>
                <th class="table__header-cell" rowspan="2">"NIK"</th>
                <th class="table__header-cell" rowspan="2">"MANDOR"</th>
                <th class="table__header-cell" rowspan="2">"HKO"</th>
                <th class="table__header-cell" colspan="3">"LATEX"</th>
                <th class="table__header-cell" colspan="3">"LUMP"</th>
                <th class="table__header-cell" rowspan="2">"KKK SHEET"</th>
                <th class="table__header-cell" colspan="3">"KERING"</th>
            </tr>
            <tr>
                <th class="table__header-cell">"KEBUN"</th>
                <th class="table__header-cell">"PABRIK"</th>
                <th class="table__header-cell">"%"</th>
                <th class="table__header-cell">"KEBUN"</th>
                <th class="table__header-cell">"PABRIK"</th>
                <th class="table__header-cell">"%"</th>
                <th class="table__header-cell">"SHEET"</th>
                <th class="table__header-cell">"BR.CR"</th>
                <th class="table__header-cell">"JUMLAH"</th>
            </tr>
        </thead>
    }
}

/// Recap of one day, one table per production type
#[component]
pub fn BakuRekap() -> impl IntoView {
    let date = RwSignal::new(today());
    let details = RwSignal::new(Vec::<BakuDetail>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let generation = StoredValue::new(RequestGeneration::new());

    let load = move || {
        let Some(ticket) = generation.try_with_value(|g| g.next()) else {
            return;
        };
        let day = date.get_untracked();
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_details(day).await;
            if !generation
                .try_with_value(|g| g.accept(ticket, "rekap"))
                .unwrap_or(false)
            {
                return;
            }
            match result {
                Ok(list) => {
                    details.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("rekap {}: {}", day, e);
                    details.set(Vec::new());
                    error.set(Some(e.alert_text()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let on_date = move |ev: leptos::ev::Event| {
        match NaiveDate::parse_from_str(&event_target_value(&ev), DATE_FORMAT) {
            Ok(d) => {
                date.set(d);
                load();
            }
            Err(_) => log::debug!("rekap: ignoring incomplete date"),
        }
    };

    view! {
        <PageFrame page_id="a003_baku--rekap" category=PAGE_CAT_LIST>
            <PageHeader title="Rekap Produksi">
                <input
                    type="date"
                    class="form__input"
                    prop:value=move || date.get().format(DATE_FORMAT).to_string()
                    on:change=on_date
                />
            </PageHeader>
            <div class="page__subtitle">{move || format_long_date(date.get())}</div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || {
                let summary = details.with(|list| rekap_by_tipe(list));
                if summary.is_empty() {
                    let text = if loading.get() { "Memuat..." } else { "Tidak ada data untuk tanggal ini." };
                    return view! { <p class="page__empty">{text}</p> }.into_any();
                }
                let grand = summary.grand_total;
                let sections = summary
                    .groups
                    .into_iter()
                    .map(|group| {
                        view! {
                            <div class="table-container rekap__section">
                                <h3 class="page__section-title">{format!("Tipe: {}", group.label)}</h3>
                                <table class="table__data table--striped">
                                    {table_head()}
                                    <tbody>
                                        {group.rows.into_iter().map(detail_row).collect_view()}
                                        <TableTotalsRow>
                                            <td colspan="3">"TOTAL"</td>
                                            {totals_cells(group.totals)}
                                        </TableTotalsRow>
                                    </tbody>
                                </table>
                            </div>
                        }
                    })
                    .collect_view();
                view! {
                    {sections}
                    <div class="table-container">
                        <table class="table__data">
                            <tbody>
                                <TableTotalsRow class="table__totals-row--grand">
                                    <td colspan="3">"JUMLAH PRODUKSI"</td>
                                    {totals_cells(grand)}
                                </TableTotalsRow>
                            </tbody>
                        </table>
                    </div>
                }
                .into_any()
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persen_uses_one_decimal() {
        assert_eq!(persen(12.345), "12.3%");
        assert_eq!(persen(0.0), "0%");
    }
}
