//! Editing state for the exclusions screen.
//!
//! An [`ExclusionSession`] owns everything the screen mutates: the pending batch,
//! the persisted exclusions currently listed, which one is selected, and the slots
//! loaded for the selected exclusion's date. Each async operation issues one store
//! call and applies its result; a later call simply overwrites what an earlier one
//! wrote.

use chrono::NaiveDate;
use slot_engine::{build_batch, mark_slots_against, overlaps, Exclusion, PendingBatch, Slot};
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::store::ExclusionStore;

pub struct ExclusionSession<S> {
    store: S,
    pending: PendingBatch,
    items: Vec<Exclusion>,
    selected_id: Option<String>,
    slots: Vec<Slot>,
    collapse_duplicates: bool,
}

impl<S: ExclusionStore> ExclusionSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            pending: PendingBatch::new(),
            items: Vec::new(),
            selected_id: None,
            slots: Vec::new(),
            collapse_duplicates: false,
        }
    }

    /// Drop exact duplicate entries from the pending batch when saving.
    /// Off by default: duplicates are submitted as-is.
    pub fn collapse_duplicates(mut self, enabled: bool) -> Self {
        self.collapse_duplicates = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending(&self) -> &PendingBatch {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingBatch {
        &mut self.pending
    }

    /// Persisted exclusions from the last successful reload.
    pub fn items(&self) -> &[Exclusion] {
        &self.items
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&Exclusion> {
        let id = self.selected_id.as_deref()?;
        self.items.iter().find(|e| e.id.as_deref() == Some(id))
    }

    /// Slots for the selected exclusion's date, as reported by the store.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Replace the listed exclusions with those in `[from, to]`.
    ///
    /// When nothing is selected (or the selection is no longer listed) the first
    /// listed exclusion with an id is selected and its slots loaded. An empty list
    /// clears the selection and the slots.
    pub async fn reload(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
        self.items = self.store.fetch_exclusions(from, to).await?;

        if self.items.is_empty() {
            self.selected_id = None;
            self.slots.clear();
            return Ok(());
        }

        if self.selected().is_none() {
            self.selected_id = None;
            let first = self.items.iter().find_map(|e| e.id.clone());
            if let Some(id) = first {
                self.select(&id).await?;
            }
        }
        Ok(())
    }

    /// Select the listed exclusion `id` and load the slots for its date.
    ///
    /// # Errors
    /// Returns `ClientError::UnknownExclusion` if `id` is not in the current list.
    /// If the slot fetch fails the selection is kept and the slots stay empty.
    pub async fn select(&mut self, id: &str) -> Result<()> {
        let date = self
            .items
            .iter()
            .find(|e| e.id.as_deref() == Some(id))
            .map(|e| e.date)
            .ok_or_else(|| ClientError::UnknownExclusion(id.to_string()))?;

        self.selected_id = Some(id.to_string());
        self.slots.clear();
        self.slots = self.store.fetch_slots(date).await?;
        Ok(())
    }

    /// Delete a persisted exclusion and drop it from the list.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.store.remove_exclusion(id).await?;

        self.items.retain(|e| e.id.as_deref() != Some(id));
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
            self.slots.clear();
        }
        Ok(())
    }

    /// Submit the pending batch in one request.
    ///
    /// The batch is cleared only when the store accepts it; on failure it is left
    /// intact for another attempt. Returns the number of entries submitted (zero,
    /// without contacting the store, when nothing is pending).
    pub async fn save_pending(&mut self) -> Result<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let mut batch = build_batch(self.pending.entries());
        if self.collapse_duplicates {
            batch = batch.collapse_duplicates();
        }
        let submitted = batch.len();

        match self.store.submit_batch(&batch).await {
            Ok(created) => {
                info!(submitted, ?created, "pending exclusions saved");
                self.pending.clear();
                Ok(submitted)
            }
            Err(e) => {
                warn!(error = %e, pending = self.pending.len(), "saving pending exclusions failed");
                Err(e)
            }
        }
    }

    /// Whether the selected exclusion covers `slot`.
    pub fn is_slot_excluded(&self, slot: &Slot) -> bool {
        self.selected().is_some_and(|sel| overlaps(slot, sel))
    }

    /// The loaded slots marked against the pending batch and the selected exclusion.
    pub fn preview(&self) -> Vec<Slot> {
        let selected: Vec<Exclusion> = self.selected().cloned().into_iter().collect();
        mark_slots_against(&self.slots, self.pending.entries(), &selected)
    }
}
