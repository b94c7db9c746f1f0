use contracts::domain::a005_master::aggregate::{file_size_label, Master, UploadForm, UploadResponse};
use contracts::domain::common::AggregateRoot;
use contracts::enums::AfdelingKey;
use contracts::shared::api::ApiError;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a005_master::api;
use crate::shared::config::config;
use crate::shared::date_utils::{format_date, today_str};
use crate::shared::dialogs::{alert_error, confirm};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

/// Result box under the upload form
#[derive(Debug, Clone, PartialEq)]
enum UploadResult {
    Done(UploadResponse),
    Failed(String),
}

/// Server rejections are shown as sent; anything else gets a prefix
fn failure_text(error: ApiError) -> String {
    match error {
        ApiError::Application(msg) => msg,
        other => format!("Terjadi kesalahan saat upload: {}", other),
    }
}

/// Workbook upload plus the list of stored masters
#[component]
pub fn MasterList() -> impl IntoView {
    let items = RwSignal::new(Vec::<Master>::new());
    let loading = RwSignal::new(false);
    let list_error = RwSignal::new(None::<String>);
    let form = RwSignal::new(UploadForm {
        tanggal: today_str(),
        ..UploadForm::default()
    });
    let uploading = RwSignal::new(false);
    let result = RwSignal::new(None::<UploadResult>);
    let file_input = NodeRef::<html::Input>::new();

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(list) => {
                    items.set(list);
                    list_error.set(None);
                }
                Err(e) => {
                    log::error!("master list: {}", e);
                    list_error.set(Some("Gagal memuat daftar master".to_string()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let on_file_change = move |_| {
        let picked = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(|file| (file.name(), file.size() as u64));
        form.update(|f| f.file = picked);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let snapshot = form.get_untracked();
        if let Err(e) = snapshot.validate(config().upload.max_file_bytes) {
            result.set(Some(UploadResult::Failed(e.to_string())));
            return;
        }
        let Some(file) = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            result.set(Some(UploadResult::Failed("File belum dipilih".to_string())));
            return;
        };
        uploading.set(true);
        result.set(None);
        spawn_local(async move {
            match api::upload(&snapshot.tanggal, &snapshot.afdeling, &file).await {
                Ok(resp) => {
                    log::info!("upload {} accepted", resp.file_name);
                    result.set(Some(UploadResult::Done(resp)));
                    form.set(UploadForm {
                        tanggal: today_str(),
                        ..UploadForm::default()
                    });
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    load();
                }
                Err(e) => {
                    log::error!("upload: {}", e);
                    result.set(Some(UploadResult::Failed(failure_text(e))));
                }
            }
            uploading.set(false);
        });
    };

    let handle_delete = move |id: u64| {
        if !confirm(&format!("Hapus master dengan ID {}?", id)) {
            return;
        }
        spawn_local(async move {
            match api::remove(id).await {
                Ok(_) => load(),
                Err(e) => alert_error("master delete", &e),
            }
        });
    };

    view! {
        <PageFrame page_id="a005_master--list" category=PAGE_CAT_LIST>
            <PageHeader title=Master::list_name()>
                <button class="button button--secondary" on:click=move |_| load()>
                    {icon("refresh")}
                    "Muat Ulang"
                </button>
            </PageHeader>

            <form class="form details-form upload-form" on:submit=on_submit>
                <h3>"Upload File Produksi"</h3>
                <div class="form__row">
                    <div class="form__group">
                        <label for="upload-tanggal">"Tanggal"</label>
                        <input
                            type="date"
                            id="upload-tanggal"
                            class="form__input"
                            prop:value=move || form.get().tanggal
                            on:input=move |ev| form.update(|f| f.tanggal = event_target_value(&ev))
                        />
                    </div>
                    <div class="form__group">
                        <label for="upload-afdeling">"Afdeling"</label>
                        <select
                            id="upload-afdeling"
                            class="form__select"
                            prop:value=move || form.get().afdeling
                            on:change=move |ev| form.update(|f| f.afdeling = event_target_value(&ev))
                        >
                            <option value="">"Pilih Afdeling"</option>
                            {AfdelingKey::all()
                                .into_iter()
                                .map(|key| view! { <option value=key.code()>{key.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label for="upload-file">"File"</label>
                        <input
                            type="file"
                            id="upload-file"
                            class="form__input"
                            accept=".xlsx,.xls,.csv"
                            node_ref=file_input
                            on:change=on_file_change
                        />
                        <div class="upload-form__meta">
                            {move || match form.get().file {
                                Some((name, size)) => format!("{} | {}", name, file_size_label(size)),
                                None => "Belum ada file dipilih".to_string(),
                            }}
                        </div>
                    </div>
                </div>
                <div class="form__actions">
                    <button type="submit" class="button button--primary" disabled=move || uploading.get()>
                        {icon("upload")}
                        {move || if uploading.get() { "Mengunggah..." } else { "Upload" }}
                    </button>
                </div>
            </form>

            {move || result.get().map(|r| match r {
                UploadResult::Done(resp) => view! {
                    <div class="upload-result">
                        <strong>{resp.message.clone()}</strong>
                        <div>{format!("Tanggal: {}", resp.tanggal)}</div>
                        <div>{format!("Afdeling: {}", resp.afdeling)}</div>
                        <div>{format!("File: {}", resp.file_name)}</div>
                        <div>{format!("Ukuran: {}", resp.size_label())}</div>
                    </div>
                }.into_any(),
                UploadResult::Failed(msg) => view! {
                    <div class="upload-result upload-result--error"><strong>{msg}</strong></div>
                }.into_any(),
            })}

            <h3 class="page__section-title">"Daftar Master"</h3>
            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"ID"</th>
                            <th class="table__header-cell">"Tanggal"</th>
                            <th class="table__header-cell">"Afdeling"</th>
                            <th class="table__header-cell">"Nama File"</th>
                            <th class="table__header-cell">"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if let Some(e) = list_error.get() {
                                return view! { <tr><td colspan="5" class="error">{e}</td></tr> }.into_any();
                            }
                            let rows = items.get();
                            if rows.is_empty() {
                                let text = if loading.get() { "Memuat..." } else { "Tidak ada master" };
                                return view! { <tr><td colspan="5">{text}</td></tr> }.into_any();
                            }
                            rows.into_iter()
                                .map(|m| {
                                    let id = m.id;
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{m.id}</td>
                                            <td class="table__cell">{format_date(&m.tanggal)}</td>
                                            <td class="table__cell">{m.afdeling.clone()}</td>
                                            <td class="table__cell">{m.nama_file.clone()}</td>
                                            <td class="table__cell table__cell--actions">
                                                <button
                                                    class="button button--small button--danger"
                                                    title="Hapus"
                                                    on:click=move |_| handle_delete(id)
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

    #[test]
    fn test_failure_text() {
        assert_eq!(
            failure_text(ApiError::Application("Format salah".to_string())),
            "Format salah"
        );
        assert!(failure_text(ApiError::Transport("offline".to_string()))
            .starts_with("Terjadi kesalahan saat upload: "));
    }
}
