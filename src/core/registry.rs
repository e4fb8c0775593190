use crate::core::WidgetId;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Enumerates live widgets. Widgets join on construction and leave on
/// `dispose`; nothing else is coordinated through it.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Arc<Mutex<IndexMap<WidgetId, String>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: WidgetId, label: impl Into<String>) {
        self.lock().insert(id, label.into());
    }

    pub fn unregister(&self, id: &WidgetId) -> bool {
        self.lock().shift_remove(id).is_some()
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.lock().contains_key(id)
    }

    pub fn ids(&self) -> Vec<WidgetId> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<WidgetId, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
