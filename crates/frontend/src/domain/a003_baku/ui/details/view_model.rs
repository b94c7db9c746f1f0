use contracts::domain::a001_mandor::aggregate::Mandor;
use contracts::domain::a003_baku::aggregate::{BakuEntry, BakuForm};
use contracts::domain::common::WriteTarget;
use contracts::enums::TipeProduksi;
use contracts::shared::api::ApiError;
use contracts::shared::autocomplete::{merge_candidates, Candidate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_mandor::api as mandor_api;
use crate::domain::a002_penyadap::api as penyadap_api;
use crate::domain::a003_baku::api;
use crate::shared::config::config;
use crate::shared::dialogs::{alert, alert_error};
use crate::shared::polling::RequestGeneration;

#[derive(Clone, Copy)]
pub struct BakuDetailsViewModel {
    /// Everything but the penyadap id, which the autocomplete owns
    pub form: RwSignal<BakuForm>,
    pub penyadap_id: RwSignal<String>,
    pub penyadap_candidates: RwSignal<Vec<Candidate>>,
    /// Full `/api/penyadap` list, merged under server search hits
    penyadap_cache: RwSignal<Vec<Candidate>>,
    pub mandors: RwSignal<Vec<Mandor>>,
    pub editing_id: RwSignal<Option<u64>>,
    pub saving: RwSignal<bool>,
    search_generation: StoredValue<RequestGeneration>,
}

fn blank_form() -> BakuForm {
    BakuForm {
        tipe: TipeProduksi::Baku.code().to_string(),
        ..BakuForm::default()
    }
}

impl BakuDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(blank_form()),
            penyadap_id: RwSignal::new(String::new()),
            penyadap_candidates: RwSignal::new(Vec::new()),
            penyadap_cache: RwSignal::new(Vec::new()),
            mandors: RwSignal::new(Vec::new()),
            editing_id: RwSignal::new(None),
            saving: RwSignal::new(false),
            search_generation: StoredValue::new(RequestGeneration::new()),
        }
    }

    pub fn target(&self) -> WriteTarget<u64> {
        WriteTarget::from_editing(self.editing_id.get())
    }

    pub fn load_mandors(&self) {
        let mandors = self.mandors;
        spawn_local(async move {
            match mandor_api::fetch_all().await {
                Ok(list) => mandors.set(list),
                Err(e) => log::warn!("mandor options: {}", e),
            }
        });
    }

    pub fn load_penyadap(&self) {
        let cache = self.penyadap_cache;
        let candidates = self.penyadap_candidates;
        spawn_local(async move {
            match penyadap_api::fetch_candidates().await {
                Ok(list) => {
                    if candidates.with_untracked(Vec::is_empty) {
                        candidates.set(list.clone());
                    }
                    cache.set(list);
                }
                Err(e) => log::warn!("penyadap options: {}", e),
            }
        });
    }

    /// Refreshes the penyadap candidates from the server typeahead
    pub fn search_penyadap(&self, query: String) {
        if query.trim().chars().count() < config().autocomplete.min_query_len {
            return;
        }
        let Some(ticket) = self.search_generation.try_with_value(|g| g.next()) else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            let result = penyadap_api::search(&query).await;
            let current = this
                .search_generation
                .try_with_value(|g| g.accept(ticket, "penyadap search"))
                .unwrap_or(false);
            if !current {
                return;
            }
            match result {
                Ok(list) => {
                    let merged = this.penyadap_cache.with_untracked(|cached| merge_candidates(list, cached));
                    this.penyadap_candidates.set(merged);
                }
                Err(e) => {
                    log::warn!("penyadap search: {}", e);
                    this.penyadap_candidates.set(this.penyadap_cache.get_untracked());
                }
            }
        });
    }

    pub fn edit(&self, entry: &BakuEntry) {
        self.form.set(BakuForm::from_entry(entry));
        let candidate = Candidate {
            id: entry.id_penyadap,
            name: entry.penyadap_name().to_string(),
            nik: entry.penyadap_nik().to_string(),
            tahun_tanam: None,
        };
        self.penyadap_candidates.set(vec![candidate]);
        self.penyadap_id.set(entry.id_penyadap.to_string());
        self.editing_id.set(Some(entry.id));
    }

    pub fn reset(&self) {
        self.form.set(blank_form());
        self.penyadap_id.set(String::new());
        self.penyadap_candidates.set(self.penyadap_cache.get_untracked());
        self.editing_id.set(None);
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let mut form = self.form.get_untracked();
        form.penyadap_id = self.penyadap_id.get_untracked();
        let dto = match form.validate() {
            Ok(dto) => dto,
            Err(e) => return alert_error("baku", &ApiError::from(e)),
        };
        let target = WriteTarget::from_editing(self.editing_id.get_untracked());
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::save(target, &dto).await {
                Ok(_) => {
                    alert(target.success_message());
                    this.reset();
                    on_saved.run(());
                }
                Err(e) => alert_error("baku save", &e),
            }
            this.saving.set(false);
        });
    }
}

impl Default for BakuDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
