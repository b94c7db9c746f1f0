//! Tab key → page. Every key listed in `tab_labels` has an arm here.

use crate::dashboards::d400_afdeling_summary::ui::AfdelingSummaryDashboard;
use crate::domain::a001_mandor::ui::list::MandorList;
use crate::domain::a002_penyadap::ui::list::PenyadapList;
use crate::domain::a003_baku::ui::list::BakuList;
use crate::domain::a003_baku::ui::rekap::BakuRekap;
use crate::domain::a004_peta::ui::list::PetaList;
use crate::domain::a005_master::ui::list::MasterList;
use crate::layout::global_context::AppGlobalContext;
use crate::projections::p900_monitoring::ui::MonitoringPage;
use crate::projections::p901_visualisasi::ui::VisualisasiPage;
use crate::projections::p902_perbandingan::ui::PerbandinganPage;
use crate::system::pages::account::AccountPage;
use leptos::logging::log;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    log!("render_tab_content: '{}'", key);

    match key {
        // ── Production ────────────────────────────────────────────────────
        "a003_baku" => view! { <BakuList /> }.into_any(),
        "a003_baku_rekap" => view! { <BakuRekap /> }.into_any(),

        // ── Master data ───────────────────────────────────────────────────
        "a001_mandor" => view! { <MandorList /> }.into_any(),
        "a002_penyadap" => view! { <PenyadapList /> }.into_any(),
        "a004_peta" => view! { <PetaList /> }.into_any(),
        "a005_master" => view! { <MasterList /> }.into_any(),

        // ── Reports ───────────────────────────────────────────────────────
        "d400_afdeling_summary" => view! { <AfdelingSummaryDashboard /> }.into_any(),
        "p900_monitoring" => view! { <MonitoringPage /> }.into_any(),
        "p901_visualisasi" => view! { <VisualisasiPage /> }.into_any(),
        "p902_perbandingan" => view! { <PerbandinganPage /> }.into_any(),

        // ── System ────────────────────────────────────────────────────────
        "sys_account" => view! { <AccountPage /> }.into_any(),

        _ => {
            log::warn!("unknown tab key: {}", key);
            let key_for_close = key.to_string();
            view! {
                <div class="placeholder">
                    "Halaman tidak ditemukan"
                    <button
                        class="button button--secondary"
                        on:click=move |_| tabs_store.close_tab(&key_for_close)
                    >
                        "Tutup"
                    </button>
                </div>
            }
            .into_any()
        }
    }
}
