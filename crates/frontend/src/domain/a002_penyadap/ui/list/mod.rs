use contracts::domain::a002_penyadap::aggregate::Penyadap;
use contracts::domain::common::{AggregateRoot, WriteTarget};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::details::{PenyadapDetails, PenyadapDetailsViewModel};
use crate::domain::a002_penyadap::api;
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

/// Name case-insensitively, NIK verbatim
fn matches_filter(p: &Penyadap, filter: &str) -> bool {
    let trimmed = filter.trim();
    trimmed.is_empty()
        || p.nama_penyadap.to_lowercase().contains(&trimmed.to_lowercase())
        || p.nik.contains(trimmed)
}

#[component]
pub fn PenyadapList() -> impl IntoView {
    let items = RwSignal::new(Vec::<Penyadap>::new());
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(String::new());
    let vm = PenyadapDetailsViewModel::new();

    let load = move || {
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(list) => {
                    items.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("penyadap list: {}", e);
                    error.set(Some(e.alert_text()));
                }
            }
        });
    };
    load();

    let handle_delete = move |p: Penyadap| {
        if !confirm(&format!("Hapus penyadap {}?", p.description())) {
            return;
        }
        spawn_local(async move {
            match api::remove(p.id).await {
                Ok(_) => {
                    let editing = vm.editing_id.get_untracked();
                    if WriteTarget::after_delete(editing, p.id) != editing {
                        vm.reset();
                    }
                    load();
                }
                Err(e) => alert_error("penyadap delete", &e),
            }
        });
    };

    let visible = move || {
        let f = filter.get();
        items.with(|list| list.iter().filter(|p| matches_filter(p, &f)).cloned().collect::<Vec<_>>())
    };

    view! {
        <PageFrame page_id="a002_penyadap--list" category=PAGE_CAT_LIST>
            <PageHeader title=Penyadap::list_name()>
                <button class="button button--secondary" on:click=move |_| load()>
                    {icon("refresh")}
                    "Muat Ulang"
                </button>
            </PageHeader>

            <PenyadapDetails vm=vm on_saved=Callback::new(move |_| load()) />

            <div class="page__toolbar">
                <input
                    type="search"
                    class="form__input"
                    placeholder="Cari nama atau NIK..."
                    prop:value=move || filter.get()
                    on:input=move |ev| filter.set(event_target_value(&ev))
                />
                <span class="page__count">
                    {move || format!("{} dari {} penyadap", visible().len(), items.with(|l| l.len()))}
                </span>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"NIK"</th>
                            <th class="table__header-cell">"Nama Penyadap"</th>
                            <th class="table__header-cell">"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=visible
                            key=|p| p.id
                            children=move |p: Penyadap| {
                                let for_edit = p.clone();
                                let for_delete = p.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{p.nik}</td>
                                        <td class="table__cell">{p.nama_penyadap}</td>
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
                            }
                        />
                    </tbody>
                </table>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nik_filter_is_case_sensitive() {
        let p = Penyadap {
            id: 4,
            nama_penyadap: "Siti Aminah".to_string(),
            nik: "KLP-0042".to_string(),
        };
        assert!(matches_filter(&p, "siti"));
        assert!(matches_filter(&p, " KLP-00 "));
        assert!(!matches_filter(&p, "klp-0042"));
    }
}
