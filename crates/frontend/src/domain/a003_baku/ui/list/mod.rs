use contracts::domain::a003_baku::aggregate::{group_by_mandor, BakuDetail, BakuEntry};
use contracts::domain::common::WriteTarget;
use contracts::shared::aggregation::Group;
use contracts::shared::numeric::format_decimal;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::details::{BakuDetails, BakuDetailsViewModel};
use crate::domain::a003_baku::api;
use crate::shared::components::TableTotalsRow;
use crate::shared::config::config;
use crate::shared::date_utils::{today, today_str};
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::polling::{use_interval, RequestGeneration};

fn toggle_label(shown: bool) -> &'static str {
    if shown {
        "Sembunyikan Data Produksi Baku"
    } else {
        "Tampilkan Data Produksi Baku"
    }
}

fn rekap_row(d: BakuDetail) -> impl IntoView {
    view! {
        <tr class="table__row">
            <td class="table__cell">{d.mandor.clone()}</td>
            <td class="table__cell">{d.afdeling.clone()}</td>
            <td class="table__cell">{d.tipe.display_name()}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_pabrik_basah_latek)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_kebun_basah_latek)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_sheet)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.k3_sheet)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_pabrik_basah_lump)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_kebun_basah_lump)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.jumlah_br_cr)}</td>
            <td class="table__cell table__cell--right">{format_decimal(d.k3_br_cr)}</td>
        </tr>
    }
}

/// One table of today's entries for a single mandor
fn mandor_table(
    group: Group<BakuEntry>,
    vm: BakuDetailsViewModel,
    on_delete: Callback<BakuEntry>,
) -> impl IntoView {
    let totals = group.totals;
    let rows = group
        .rows
        .into_iter()
        .map(|entry| {
            let for_edit = entry.clone();
            let for_delete = entry.clone();
            view! {
                <tr class="table__row">
                    <td class="table__cell">{entry.penyadap_nik().to_string()}</td>
                    <td class="table__cell">{entry.penyadap_name().to_string()}</td>
                    <td class="table__cell table__cell--right">{format_decimal(entry.basah_latex)}</td>
                    <td class="table__cell table__cell--right">{format_decimal(entry.basah_lump)}</td>
                    <td class="table__cell table__cell--right">{format_decimal(entry.sheet)}</td>
                    <td class="table__cell table__cell--right">{format_decimal(entry.br_cr)}</td>
                    <td class="table__cell table__cell--actions">
                        <button class="button button--small" title="Edit" on:click=move |_| vm.edit(&for_edit)>
                            {icon("edit")}
                        </button>
                        <button
                            class="button button--small button--danger"
                            title="Hapus"
                            on:click=move |_| on_delete.run(for_delete.clone())
                        >
                            {icon("delete")}
                        </button>
                    </td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="table__data table--striped baku-detail__table">
            <caption class="table__caption">{format!("Mandor: {}", group.label)}</caption>
            <thead class="table__head">
                <tr>
                    <th class="table__header-cell">"NIK"</th>
                    <th class="table__header-cell">"Penyadap"</th>
                    <th class="table__header-cell">"Latek"</th>
                    <th class="table__header-cell">"Lump"</th>
                    <th class="table__header-cell">"Sheet"</th>
                    <th class="table__header-cell">"Br.Cr"</th>
                    <th class="table__header-cell">"Action"</th>
                </tr>
            </thead>
            <tbody>
                {rows}
                <TableTotalsRow>
                    <td colspan="2">"TOTAL"</td>
                    <td class="table__cell--right">{format_decimal(totals.basah_latex)}</td>
                    <td class="table__cell--right">{format_decimal(totals.basah_lump)}</td>
                    <td class="table__cell--right">{format_decimal(totals.sheet)}</td>
                    <td class="table__cell--right">{format_decimal(totals.br_cr)}</td>
                    <td></td>
                </TableTotalsRow>
            </tbody>
        </table>
    }
}

/// Daily input page: entry form, the per-mandor recap and today's entries
#[component]
pub fn BakuList() -> impl IntoView {
    let vm = BakuDetailsViewModel::new();
    let details = RwSignal::new(Vec::<BakuDetail>::new());
    let entries = RwSignal::new(Vec::<BakuEntry>::new());
    let show_entries = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let details_generation = StoredValue::new(RequestGeneration::new());
    let entries_generation = StoredValue::new(RequestGeneration::new());

    let load_details = move || {
        let Some(ticket) = details_generation.try_with_value(|g| g.next()) else {
            return;
        };
        spawn_local(async move {
            let result = api::fetch_details(today()).await;
            let current = details_generation
                .try_with_value(|g| g.accept(ticket, "rekap mandor"))
                .unwrap_or(false);
            if !current {
                return;
            }
            match result {
                Ok(list) => {
                    details.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("rekap mandor: {}", e);
                    error.set(Some(e.alert_text()));
                }
            }
        });
    };

    let load_entries = move || {
        let Some(ticket) = entries_generation.try_with_value(|g| g.next()) else {
            return;
        };
        spawn_local(async move {
            let result = api::fetch_today_entries().await;
            let current = entries_generation
                .try_with_value(|g| g.accept(ticket, "detail penyadap"))
                .unwrap_or(false);
            if !current {
                return;
            }
            match result {
                Ok(list) => entries.set(list),
                Err(e) => log::error!("detail penyadap: {}", e),
            }
        });
    };

    let refresh = move || {
        load_details();
        load_entries();
    };
    refresh();
    use_interval(config().polling.rekap_secs, load_details);

    let on_delete = Callback::new(move |entry: BakuEntry| {
        if !confirm("Hapus data?") {
            return;
        }
        spawn_local(async move {
            match api::remove(entry.id).await {
                Ok(_) => {
                    let editing = vm.editing_id.get_untracked();
                    if WriteTarget::after_delete(editing, entry.id) != editing {
                        vm.reset();
                    }
                    refresh();
                }
                Err(e) => alert_error("baku delete", &e),
            }
        });
    });

    view! {
        <PageFrame page_id="a003_baku--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Input Produksi Baku" subtitle=today_str()>
                <button class="button button--secondary" on:click=move |_| refresh()>
                    {icon("refresh")}
                    "Muat Ulang"
                </button>
            </PageHeader>

            <BakuDetails vm=vm on_saved=Callback::new(move |_| refresh()) />

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <h3 class="page__section-title">"Rekap Mandor"</h3>
            <div class="table-container">
                {move || {
                    let rows = details.get();
                    if rows.is_empty() {
                        return view! {
                            <p class="page__empty">
                                {format!("Belum ada data rekap untuk hari ini ({}).", today_str())}
                            </p>
                        }
                        .into_any();
                    }
                    view! {
                        <table class="table__data table--striped">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">"Mandor"</th>
                                    <th class="table__header-cell">"Afdeling"</th>
                                    <th class="table__header-cell">"Tipe"</th>
                                    <th class="table__header-cell">"Pabrik Latek"</th>
                                    <th class="table__header-cell">"Kebun Latek"</th>
                                    <th class="table__header-cell">"Sheet"</th>
                                    <th class="table__header-cell">"K3 Sheet"</th>
                                    <th class="table__header-cell">"Pabrik Lump"</th>
                                    <th class="table__header-cell">"Kebun Lump"</th>
                                    <th class="table__header-cell">"Br.Cr"</th>
                                    <th class="table__header-cell">"K3 Br.Cr"</th>
                                </tr>
                            </thead>
                            <tbody>{rows.into_iter().map(rekap_row).collect_view()}</tbody>
                        </table>
                    }
                    .into_any()
                }}
            </div>

            <div class="page__toolbar">
                <button
                    class="button button--secondary"
                    on:click=move |_| show_entries.update(|s| *s = !*s)
                >
                    {move || toggle_label(show_entries.get())}
                </button>
            </div>

            <Show when=move || show_entries.get()>
                <div class="baku-detail">
                    <h3 class="page__section-title">"Detail per Penyadap"</h3>
                    {move || {
                        let groups = entries.with(|list| group_by_mandor(list));
                        if groups.is_empty() {
                            return view! {
                                <p class="page__empty">
                                    {format!("Belum ada data detail untuk hari ini ({}).", today_str())}
                                </p>
                            }
                            .into_any();
                        }
                        groups
                            .into_iter()
                            .map(|group| mandor_table(group, vm, on_delete))
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_label_follows_visibility() {
        assert_eq!(toggle_label(false), "Tampilkan Data Produksi Baku");
        assert_eq!(toggle_label(true), "Sembunyikan Data Produksi Baku");
    }
}
