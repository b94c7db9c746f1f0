use contracts::domain::a001_mandor::aggregate::Mandor;
use contracts::domain::common::{AggregateRoot, WriteTarget};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::details::{MandorDetails, MandorDetailsViewModel};
use crate::domain::a001_mandor::api;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

fn matches_filter(m: &Mandor, filter: &str) -> bool {
    let q = filter.trim().to_lowercase();
    q.is_empty()
        || m.mandor.to_lowercase().contains(&q)
        || m.nik.contains(filter.trim())
        || m.afdeling.to_lowercase().contains(&q)
}

#[component]
pub fn MandorList() -> impl IntoView {
    let items = RwSignal::new(Vec::<Mandor>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let filter = RwSignal::new(String::new());
    let vm = MandorDetailsViewModel::new();

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(list) => {
                    items.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("mandor list: {}", e);
                    error.set(Some(e.alert_text()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let handle_delete = move |m: Mandor| {
        if !confirm(&format!("Hapus mandor {}?", m.description())) {
            return;
        }
        spawn_local(async move {
            match api::remove(m.id).await {
                Ok(_) => {
                    let editing = vm.editing_id.get_untracked();
                    if WriteTarget::after_delete(editing, m.id) != editing {
                        vm.reset();
                    }
                    load();
                }
                Err(e) => alert_error("mandor delete", &e),
            }
        });
    };

    let visible = move || {
        let f = filter.get();
        items.with(|list| list.iter().filter(|m| matches_filter(m, &f)).cloned().collect::<Vec<_>>())
    };

    view! {
        <PageFrame page_id="a001_mandor--list" category=PAGE_CAT_LIST>
            <PageHeader title=Mandor::list_name()>
                <button class="button button--secondary" on:click=move |_| load()>
                    {icon("refresh")}
                    "Muat Ulang"
                </button>
            </PageHeader>

            <MandorDetails vm=vm on_saved=Callback::new(move |_| load()) />

            <div class="page__toolbar">
                <input
                    type="search"
                    class="form__input"
                    placeholder="Cari nama, NIK atau afdeling..."
                    prop:value=move || filter.get()
                    on:input=move |ev| filter.set(event_target_value(&ev))
                />
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Nama Mandor"</th>
                            <th class="table__header-cell">"NIK"</th>
                            <th class="table__header-cell">"Tahun Tanam"</th>
                            <th class="table__header-cell">"Afdeling"</th>
                            <th class="table__header-cell">"Tipe"</th>
                            <th class="table__header-cell">"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = visible();
                            if loading.get() && rows.is_empty() {
                                return view! { <tr><td colspan="6">"Memuat..."</td></tr> }.into_any();
                            }
                            if rows.is_empty() {
                                return view! { <tr><td colspan="6">"Tidak ada data mandor."</td></tr> }.into_any();
                            }
                            rows.into_iter()
                                .map(|m| {
                                    let for_edit = m.clone();
                                    let for_delete = m.clone();
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{m.mandor.clone()}</td>
                                            <td class="table__cell">{m.nik.clone()}</td>
                                            <td class="table__cell">
                                                {m.tahun_tanam.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())}
                                            </td>
                                            <td class="table__cell">{m.afdeling.clone()}</td>
                                            <td class="table__cell">{m.tipe.display_name()}</td>
                                            <td class="table__cell table__cell--actions">
                                                <button class="button button--small" title="Edit" on:click=move |_| vm.edit(&for_edit)>
                                                    {icon("edit")}
                                                </button>
                                                <button
                                                    class="button button--small button--danger"
                                                    title="Hapus"
                                                    on:click=move |_| handle_delete(for_delete.clone())
                                                >
                                                    {icon("delete")}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::TipeProduksi;

    fn mandor(name: &str, nik: &str, afdeling: &str) -> Mandor {
        Mandor {
            id: 1,
            mandor: name.to_string(),
            nik: nik.to_string(),
            tahun_tanam: Some(2015),
            afdeling: afdeling.to_string(),
            tipe: TipeProduksi::Baku,
        }
    }

    #[test]
    fn test_filter_matches_name_nik_and_afdeling() {
        let m = mandor("Joko Susilo", "12345", "Klepu");
        assert!(matches_filter(&m, ""));
        assert!(matches_filter(&m, "joko"));
        assert!(matches_filter(&m, "234"));
        assert!(matches_filter(&m, "KLEPU"));
        assert!(!matches_filter(&m, "setro"));
    }
}
