use contracts::domain::a004_peta::aggregate::{filter_peta, search_info, Peta};
use contracts::domain::common::AggregateRoot;
use contracts::shared::events::{DebugUpdate, PetaPong};
use contracts::shared::numeric::format_decimal;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::details::{PetaDetails, PetaDetailsViewModel};
use crate::domain::a004_peta::api;
use crate::shared::date_utils::now_ms;
use crate::shared::dialogs::alert;
use crate::shared::event_bus::use_bus;
use crate::shared::handshake::use_map_state;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

/// Block list. Picking a block plays the role of clicking it on the map:
/// the dashboard hears about it and the page answers liveness pings.
#[component]
pub fn PetaList() -> impl IntoView {
    let bus = use_bus();
    let map = use_map_state();
    let items = RwSignal::new(Vec::<Peta>::new());
    let filter = RwSignal::new(String::new());
    let code_query = RwSignal::new(String::new());
    let found = RwSignal::new(None::<Peta>);
    let error = RwSignal::new(None::<String>);
    let vm = PetaDetailsViewModel::new();

    {
        let bus_for_pong = bus.clone();
        bus.rekap_ping
            .subscribe(move |ping| {
                let last = map.last_detected.try_get_untracked().flatten();
                bus_for_pong.peta_pong.publish(&PetaPong {
                    ready: true,
                    has_map: true,
                    last_detected_afdeling: last,
                    ts: ping.requested_at,
                });
            })
            .until_cleanup();
    }
    bus.debug.publish(&DebugUpdate::single("mapStatus", "Ready"));

    let load = move || {
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(list) => {
                    items.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("peta list: {}", e);
                    error.set(Some(e.alert_text()));
                }
            }
        });
    };
    load();

    let select = {
        let bus = bus.clone();
        move |peta: &Peta| {
            let event = peta.click_event();
            log::info!("block picked: {} -> {}", event.name, event.afdeling);
            map.last_detected.set(Some(event.clone()));
            bus.debug.publish(
                &DebugUpdate::single("lastClick", event.name.clone())
                    .with("afdeling", event.afdeling.clone()),
            );
            bus.afdeling_clicked.publish(&event);
        }
    };
    let select = StoredValue::new(select);

    let search_code = move || {
        let code = code_query.get_untracked();
        if code.trim().is_empty() {
            alert("Masukkan kode blok");
            return;
        }
        spawn_local(async move {
            match api::find_by_code(&code).await {
                Ok(Some(peta)) => {
                    select.with_value(|f| f(&peta));
                    found.set(Some(peta));
                }
                Ok(None) => {
                    found.set(None);
                    alert(&format!("Blok dengan kode {} tidak ditemukan", code.trim()));
                }
                Err(e) => {
                    log::error!("peta by code: {}", e);
                    alert(&e.alert_text());
                }
            }
        });
    };

    let on_saved = Callback::new(move |updated: Peta| {
        items.update(|list| {
            if let Some(slot) = list.iter_mut().find(|p| p.id == updated.id) {
                *slot = updated;
            }
        });
    });

    let visible = move || {
        let q = filter.get();
        items.with(|list| filter_peta(list, &q).into_iter().cloned().collect::<Vec<_>>())
    };

    view! {
        <PageFrame page_id="a004_peta--list" category=PAGE_CAT_LIST>
            <PageHeader title=Peta::list_name()>
                <button class="button button--secondary" on:click=move |_| load()>
                    {icon("refresh")}
                    "Muat Ulang"
                </button>
            </PageHeader>

            <form
                class="page__toolbar"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    search_code();
                }
            >
                <input
                    type="text"
                    class="form__input"
                    placeholder="Kode blok, mis. KLP-01"
                    prop:value=move || code_query.get()
                    on:input=move |ev| code_query.set(event_target_value(&ev))
                />
                <button type="submit" class="button button--primary">
                    {icon("search")}
                    "Cari"
                </button>
            </form>

            {move || found.get().map(|p| view! {
                <div class="peta__found">
                    <strong>{p.code.clone()}</strong>
                    {format!(" Blok {} | Afdeling {} | Luas {} ha | {} pohon | Kloon {}",
                        p.blok, p.afdeling, format_decimal(p.luas), p.jumlah_pohon, p.kloon)}
                </div>
            })}

            <PetaDetails vm=vm on_saved=on_saved />

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="page__toolbar">
                <input
                    type="search"
                    class="form__input"
                    placeholder="Filter kode, blok, afdeling, kloon..."
                    prop:value=move || filter.get()
                    on:input=move |ev| filter.set(event_target_value(&ev))
                />
            </div>

            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Kode"</th>
                            <th class="table__header-cell">"Blok"</th>
                            <th class="table__header-cell">"Afdeling"</th>
                            <th class="table__header-cell">"Luas"</th>
                            <th class="table__header-cell">"Jumlah Pohon"</th>
                            <th class="table__header-cell">"Jenis Kebun"</th>
                            <th class="table__header-cell">"Tahun Tanam"</th>
                            <th class="table__header-cell">"Kloon"</th>
                            <th class="table__header-cell">"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            visible()
                                .into_iter()
                                .map(|p| {
                                    let for_pick = p.clone();
                                    let for_edit = p.clone();
                                    let selected = found.with(|f| f.as_ref().map(|x| x.id) == Some(p.id));
                                    let style = p.style();
                                    let swatch = format!(
                                        "background:{};border:1px solid {}",
                                        style.fill_color, style.color
                                    );
                                    view! {
                                        <tr
                                            class="table__row"
                                            class:table__row--selected=selected
                                            on:click=move |_| {
                                                select.with_value(|f| f(&for_pick));
                                                found.set(Some(for_pick.clone()));
                                            }
                                        >
                                            <td class="table__cell">{p.code.clone()}</td>
                                            <td class="table__cell">{p.blok.clone()}</td>
                                            <td class="table__cell">
                                                <span class="afdeling-swatch" style=swatch></span>
                                                {p.afdeling.clone()}
                                            </td>
                                            <td class="table__cell table__cell--right">{format_decimal(p.luas)}</td>
                                            <td class="table__cell table__cell--right">{p.jumlah_pohon}</td>
                                            <td class="table__cell">{p.jenis_kebun.clone()}</td>
                                            <td class="table__cell">{p.tahun_tanam.clone()}</td>
                                            <td class="table__cell">{p.kloon.clone()}</td>
                                            <td class="table__cell table__cell--actions">
                                                <button
                                                    class="button button--small"
                                                    title="Edit"
                                                    on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        vm.edit(&for_edit);
                                                    }
                                                >
                                                    {icon("edit")}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
            <div class="page__footer-info">
                {move || {
                    let total = items.with(|l| l.len());
                    search_info(visible().len(), total)
                }}
            </div>
        </PageFrame>
    }
}
