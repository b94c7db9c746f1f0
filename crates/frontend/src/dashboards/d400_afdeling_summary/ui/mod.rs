use contracts::dashboards::d400_afdeling_summary::dto::{DashboardData, PeriodTotals};
use contracts::enums::AfdelingKey;
use contracts::shared::events::{AfdelingClicked, DebugUpdate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d400_afdeling_summary::api;
use crate::shared::components::{StatCard, ValueFormat};
use crate::shared::config::config;
use crate::shared::event_bus::use_bus;
use crate::shared::handshake::{on_click, run_handshake, use_map_state, HandshakeOutcome, Via};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::polling::{use_interval, RequestGeneration};

/// Card rows of one column: label, accessor, format
const CARDS: &[(&str, fn(&PeriodTotals) -> f64, ValueFormat)] = &[
    ("HKO", |t| t.hko as f64, ValueFormat::Integer),
    ("Latek Kebun (kg)", |t| t.latek_kebun, ValueFormat::Decimal),
    ("Latek Pabrik (kg)", |t| t.latek_pabrik, ValueFormat::Decimal),
    ("Selisih Latek", |t| t.latek_persen, ValueFormat::Percent),
    ("Lump Kebun (kg)", |t| t.lump_kebun, ValueFormat::Decimal),
    ("Lump Pabrik (kg)", |t| t.lump_pabrik, ValueFormat::Decimal),
    ("Selisih Lump", |t| t.lump_persen, ValueFormat::Percent),
    ("K3 Sheet", |t| t.k3_sheet, ValueFormat::Decimal),
    ("Kering Sheet (kg)", |t| t.kering_sheet, ValueFormat::Decimal),
    ("Kering Br.Cr (kg)", |t| t.kering_br_cr, ValueFormat::Decimal),
    ("Kering Jumlah (kg)", |t| t.kering_jumlah, ValueFormat::Decimal),
    ("K3 Sheet %", |t| t.k3_sheet_persen, ValueFormat::Percent),
    ("Produksi per Taper", |t| t.per_taper, ValueFormat::Fixed2),
    ("Total Produksi (kg)", |t| t.produksi, ValueFormat::Decimal),
];

fn via_label(via: Via) -> &'static str {
    match via {
        Via::Pong => "Connected",
        Via::LastKnown => "Fallback",
        Via::Click => "Click",
    }
}

fn period_column(
    title: &'static str,
    data: RwSignal<Option<DashboardData>>,
    pick: fn(&DashboardData) -> PeriodTotals,
) -> impl IntoView {
    let cards = CARDS
        .iter()
        .map(|&(label, get, format)| {
            let value = Signal::derive(move || data.with(|d| d.as_ref().map(|d| get(&pick(d)))));
            view! { <StatCard label=label value=value format=format /> }
        })
        .collect_view();
    view! {
        <div class="dashboard__column">
            <h3 class="dashboard__column-title">{title}</h3>
            <div class="dashboard__cards">{cards}</div>
        </div>
    }
}

/// Today and to-date totals of the afdeling last picked on the block map
#[component]
pub fn AfdelingSummaryDashboard() -> impl IntoView {
    let bus = use_bus();
    let map = use_map_state();
    let current = RwSignal::new(None::<AfdelingClicked>);
    let data = RwSignal::new(None::<DashboardData>);
    let notice = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let generation = StoredValue::new(RequestGeneration::new());
    let debug_bus = bus.clone();
    let debug = StoredValue::new(move |update: DebugUpdate| {
        debug_bus.debug.publish(&update);
    });

    let load = move |key: AfdelingKey| {
        let Some(ticket) = generation.try_with_value(|g| g.next()) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_summary(key).await;
            if !generation
                .try_with_value(|g| g.accept(ticket, "dashboard"))
                .unwrap_or(false)
            {
                return;
            }
            match result {
                Ok(summary) => {
                    data.set(Some(summary));
                    notice.set(None);
                }
                Err(e) => {
                    log::error!("dashboard {}: {}", key.code(), e);
                    data.set(None);
                    notice.set(Some(format!("Gagal memuat data {}: {}", key.label(), e.alert_text())));
                }
            }
            loading.set(false);
        });
    };

    let apply = move |outcome: HandshakeOutcome| {
        match outcome {
            HandshakeOutcome::Load { event, via } => {
                debug.with_value(|d| {
                    d(DebugUpdate::single("handshake", via_label(via))
                        .with("dashboardAfdeling", event.afdeling.clone()))
                });
                if let Some(key) = event.afdeling_key {
                    load(key);
                }
                current.set(Some(event));
            }
            other => {
                debug.with_value(|d| d(DebugUpdate::single("handshake", format!("{:?}", other))));
                notice.set(other.notice());
            }
        }
    };

    bus.afdeling_clicked
        .subscribe(move |event| apply(on_click(event)))
        .until_cleanup();

    {
        let bus = bus.clone();
        spawn_local(async move {
            let outcome = run_handshake(&bus, map, &config().handshake).await;
            apply(outcome);
        });
    }

    use_interval(config().polling.dashboard_secs, move || {
        if let Some(key) = current
            .try_with_untracked(|c| c.as_ref().and_then(|e| e.afdeling_key))
            .flatten()
        {
            load(key);
        }
    });

    view! {
        <PageFrame page_id="d400_afdeling_summary--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Ringkasan Afdeling">
                <button
                    class="button button--secondary"
                    disabled=move || current.with(|c| c.is_none())
                    on:click=move |_| {
                        if let Some(key) = current.with_untracked(|c| c.as_ref().and_then(|e| e.afdeling_key)) {
                            load(key);
                        }
                    }
                >
                    "Muat Ulang"
                </button>
            </PageHeader>

            <div class="dashboard__afdeling">
                {move || match current.get() {
                    Some(event) => format!("Afdeling: {} (blok {})", event.afdeling, event.name),
                    None => "Afdeling: -".to_string(),
                }}
                {move || loading.get().then(|| view! { <span class="dashboard__loading">" Memuat..."</span> })}
            </div>

            {move || notice.get().map(|n| view! { <div class="dashboard__notice">{n}</div> })}

            <div class="dashboard__columns">
                {period_column("Hari Ini", data, DashboardData::hari_ini)}
                {period_column("Sampai Hari Ini", data, DashboardData::sampai_hari_ini)}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_read_their_own_field() {
        let totals = PeriodTotals {
            hko: 7,
            latek_persen: 2.5,
            per_taper: 14.0,
            ..PeriodTotals::default()
        };
        let value_of = |label: &str| {
            CARDS
                .iter()
                .find(|(l, _, _)| *l == label)
                .map(|(_, get, _)| get(&totals))
        };
        assert_eq!(value_of("HKO"), Some(7.0));
        assert_eq!(value_of("Selisih Latek"), Some(2.5));
        assert_eq!(value_of("Produksi per Taper"), Some(14.0));
        assert_eq!(value_of("Lump Kebun (kg)"), Some(0.0));
    }
}
