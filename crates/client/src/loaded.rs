use stockroom_core::Entity;
use stockroom_export::{export, CsvDocument, CsvRecord, ExportError};

/// The most recently fetched list for one table.
///
/// Export always reflects exactly what was last loaded, never a fresh fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedList<T> {
    items: Vec<T>,
}

impl<T> Default for LoadedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> LoadedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held list with a fresh fetch result.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Entity> LoadedList<T> {
    /// Row with `id` from the held list, as used to prefill an edit form.
    pub fn find(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }
}

impl<T: CsvRecord> LoadedList<T> {
    /// Render the held list; an empty list yields [`ExportError::NoData`].
    pub fn export_csv(&self) -> Result<CsvDocument, ExportError> {
        export(&self.items)
    }
}
