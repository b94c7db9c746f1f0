use super::AggregateRoot;

/// Whether a form submit creates a record or updates the one being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteTarget<Id> {
    #[default]
    Create,
    Update(Id),
}

impl<Id: Copy + std::fmt::Display> WriteTarget<Id> {
    pub fn from_editing(editing_id: Option<Id>) -> Self {
        match editing_id {
            Some(id) => WriteTarget::Update(id),
            None => WriteTarget::Create,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, WriteTarget::Update(_))
    }

    /// POST to the collection or PUT to the item
    pub fn path<A: AggregateRoot<Id = Id>>(&self) -> String {
        match self {
            WriteTarget::Create => A::collection_path(),
            WriteTarget::Update(id) => A::item_path(*id),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            WriteTarget::Create => "Simpan",
            WriteTarget::Update(_) => "Perbarui",
        }
    }

    /// Fallback alert text when the server sends no message
    pub fn success_message(&self) -> &'static str {
        match self {
            WriteTarget::Create => "Data disimpan",
            WriteTarget::Update(_) => "Data diperbarui",
        }
    }
}

impl<Id: Copy + PartialEq> WriteTarget<Id> {
    /// Edit state left after `deleted` is removed: editing the deleted record ends
    pub fn after_delete(editing: Option<Id>, deleted: Id) -> Option<Id> {
        editing.filter(|id| *id != deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleting_the_edited_record_returns_to_create() {
        assert_eq!(WriteTarget::after_delete(Some(7u64), 7), None);
        assert_eq!(WriteTarget::<u64>::from_editing(WriteTarget::after_delete(Some(7), 7)), WriteTarget::Create);
    }

    #[test]
    fn test_deleting_another_record_keeps_the_edit() {
        assert_eq!(WriteTarget::after_delete(Some(7u64), 3), Some(7));
        assert_eq!(WriteTarget::after_delete(None::<u64>, 3), None);
    }
}
