use contracts::domain::a002_penyadap::aggregate::{Penyadap, PenyadapForm};
use contracts::domain::common::WriteTarget;
use contracts::shared::api::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_penyadap::api;
use crate::shared::dialogs::{alert, alert_error};

#[derive(Clone, Copy)]
pub struct PenyadapDetailsViewModel {
    pub form: RwSignal<PenyadapForm>,
    pub editing_id: RwSignal<Option<u64>>,
    pub saving: RwSignal<bool>,
}

impl PenyadapDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(PenyadapForm::default()),
            editing_id: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn target(&self) -> WriteTarget<u64> {
        WriteTarget::from_editing(self.editing_id.get())
    }

    pub fn edit(&self, penyadap: &Penyadap) {
        self.form.set(PenyadapForm::from_penyadap(penyadap));
        self.editing_id.set(Some(penyadap.id));
    }

    pub fn reset(&self) {
        self.form.set(PenyadapForm::default());
        self.editing_id.set(None);
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let dto = match self.form.get_untracked().validate() {
            Ok(dto) => dto,
            Err(e) => return alert_error("penyadap", &ApiError::from(e)),
        };
        let target = WriteTarget::from_editing(self.editing_id.get_untracked());
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::save(target, &dto).await {
                Ok(message) if message.is_empty() => {
                    alert(target.success_message());
                    this.reset();
                    on_saved.run(());
                }
                Ok(message) => {
                    alert(&message);
                    this.reset();
                    on_saved.run(());
                }
                Err(e) => alert_error("penyadap save", &e),
            }
            this.saving.set(false);
        });
    }
}

impl Default for PenyadapDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
