use super::record::FamilyCaseRecord;

/// Snapshot-based unsaved-changes detection.
///
/// The snapshot is taken once, immediately after the initial load completes
/// (empty record for a new case, hydrated record in edit mode). Comparison is
/// structural equality over the record, which is cheap at this depth. The
/// bypass flag is a one-shot set after a confirmed successful submission so
/// the guard does not re-fire on the resulting navigation.
#[derive(Debug, Clone)]
pub struct UnsavedChangesGuard {
    snapshot: FamilyCaseRecord,
    bypass: bool,
}

impl UnsavedChangesGuard {
    pub fn snapshot(record: &FamilyCaseRecord) -> Self {
        Self {
            snapshot: record.clone(),
            bypass: false,
        }
    }

    pub fn has_unsaved_changes(&self, current: &FamilyCaseRecord) -> bool {
        *current != self.snapshot
    }

    pub fn set_bypass(&mut self) {
        self.bypass = true;
    }

    pub fn bypass(&self) -> bool {
        self.bypass
    }

    /// Intercept navigation-away exactly when changes exist, no submission is
    /// in flight, and the bypass is unset.
    pub fn should_intercept(&self, current: &FamilyCaseRecord, submitting: bool) -> bool {
        !self.bypass && !submitting && self.has_unsaved_changes(current)
    }
}
