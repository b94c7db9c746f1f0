use contracts::domain::a001_mandor::aggregate::{Mandor, MandorForm};
use contracts::domain::common::WriteTarget;
use contracts::enums::TipeProduksi;
use contracts::shared::api::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_mandor::api;
use crate::shared::dialogs::{alert, alert_error};

#[derive(Clone, Copy)]
pub struct MandorDetailsViewModel {
    pub form: RwSignal<MandorForm>,
    pub editing_id: RwSignal<Option<u64>>,
    pub saving: RwSignal<bool>,
}

fn blank_form() -> MandorForm {
    MandorForm {
        tipe: TipeProduksi::Baku.code().to_string(),
        ..MandorForm::default()
    }
}

impl MandorDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(blank_form()),
            editing_id: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn target(&self) -> WriteTarget<u64> {
        WriteTarget::from_editing(self.editing_id.get())
    }

    pub fn edit(&self, mandor: &Mandor) {
        self.form.set(MandorForm::from_mandor(mandor));
        self.editing_id.set(Some(mandor.id));
    }

    pub fn reset(&self) {
        self.form.set(blank_form());
        self.editing_id.set(None);
    }

    /// Validates, then POSTs or PUTs; `on_saved` runs after a successful write
    pub fn save_command(&self, on_saved: Callback<()>) {
        let dto = match self.form.get_untracked().validate() {
            Ok(dto) => dto,
            Err(e) => return alert_error("mandor", &ApiError::from(e)),
        };
        let target = WriteTarget::from_editing(self.editing_id.get_untracked());
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::save(target, &dto).await {
                Ok(message) => {
                    alert(if message.is_empty() { target.success_message() } else { message.as_str() });
                    this.reset();
                    on_saved.run(());
                }
                Err(e) => alert_error("mandor save", &e),
            }
            this.saving.set(false);
        });
    }
}

impl Default for MandorDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
