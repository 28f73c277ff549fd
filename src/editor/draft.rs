use crate::core::prelude::*;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPhase {
    Loading,
    Loaded,
    Editing,
    Saving,
    Saved,
    Failed(String),
}

impl std::fmt::Display for EditPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditPhase::Loading => write!(f, "LOADING"),
            EditPhase::Loaded => write!(f, "LOADED"),
            EditPhase::Editing => write!(f, "EDITING"),
            EditPhase::Saving => write!(f, "SAVING"),
            EditPhase::Saved => write!(f, "SAVED"),
            EditPhase::Failed(reason) => write!(f, "FAILED ({})", reason),
        }
    }
}

/// In-memory working copy of one record.
///
/// The value survives a failed save so the user can retry. While a save
/// is in flight the draft is busy: further edits and saves are refused.
#[derive(Debug, Clone)]
pub struct Draft<T> {
    phase: EditPhase,
    value: Option<T>,
}

impl<T: Clone> Draft<T> {
    pub fn loading() -> Self {
        Self {
            phase: EditPhase::Loading,
            value: None,
        }
    }

    pub fn loaded(value: T) -> Self {
        Self {
            phase: EditPhase::Loaded,
            value: Some(value),
        }
    }

    /// Records the load outcome; a load error is kept as the failure reason
    /// and handed back to the caller.
    pub fn finish_loading(&mut self, result: Result<T>) -> Result<()> {
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.phase = EditPhase::Loaded;
                Ok(())
            }
            Err(e) => {
                self.phase = EditPhase::Failed(e.reason());
                Err(e)
            }
        }
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.phase == EditPhase::Saving
    }

    /// Local changes not yet persisted.
    pub fn is_dirty(&self) -> bool {
        matches!(self.phase, EditPhase::Editing)
            || (matches!(self.phase, EditPhase::Failed(_)) && self.value.is_some())
    }

    pub fn edit<R>(&mut self, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        if self.is_busy() {
            return Err(AppError::Validation("Save in progress".into()));
        }
        let value = self
            .value
            .as_mut()
            .ok_or_else(|| AppError::Validation("Record is not loaded yet".into()))?;
        let out = f(value)?;
        self.phase = EditPhase::Editing;
        Ok(out)
    }

    /// Marks the draft busy and hands out the snapshot to persist.
    pub fn begin_save(&mut self) -> Result<T> {
        if self.is_busy() {
            return Err(AppError::Validation("Save in progress".into()));
        }
        let snapshot = self
            .value
            .clone()
            .ok_or_else(|| AppError::Validation("Record is not loaded yet".into()))?;
        self.phase = EditPhase::Saving;
        Ok(snapshot)
    }

    pub fn finish_save(&mut self, outcome: &Result<()>) {
        self.phase = match outcome {
            Ok(()) => EditPhase::Saved,
            Err(e) => EditPhase::Failed(e.reason()),
        };
    }
}

/// Drafts keyed by record id. The lock is only held for synchronous
/// bookkeeping, never across a network call.
#[derive(Debug)]
pub struct DraftBook<T> {
    drafts: Arc<RwLock<HashMap<String, Draft<T>>>>,
}

impl<T: Clone> DraftBook<T> {
    pub fn new() -> Self {
        Self {
            drafts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn insert(&self, key: impl Into<String>, draft: Draft<T>) {
        let mut drafts = self.drafts.write().unwrap_or_else(|p| p.into_inner());
        drafts.insert(key.into(), draft);
    }

    pub fn remove(&self, key: &str) -> Option<Draft<T>> {
        let mut drafts = self.drafts.write().unwrap_or_else(|p| p.into_inner());
        drafts.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<Draft<T>> {
        let drafts = self.drafts.read().unwrap_or_else(|p| p.into_inner());
        drafts.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        let drafts = self.drafts.read().unwrap_or_else(|p| p.into_inner());
        drafts.contains_key(key)
    }

    pub fn with<R>(&self, key: &str, f: impl FnOnce(&mut Draft<T>) -> R) -> Option<R> {
        let mut drafts = self.drafts.write().unwrap_or_else(|p| p.into_inner());
        drafts.get_mut(key).map(f)
    }

    /// Keys of drafts with unsaved changes, sorted.
    pub fn dirty_keys(&self) -> Vec<String> {
        let drafts = self.drafts.read().unwrap_or_else(|p| p.into_inner());
        let mut keys: Vec<String> = drafts
            .iter()
            .filter(|(_, d)| d.is_dirty())
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }
}

impl<T: Clone> Default for DraftBook<T> {
    fn default() -> Self {
        Self::new()
    }
}
