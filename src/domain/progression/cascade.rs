//! Cascade-unlock of the next module after a first pass.

use super::ModuleProgress;
use crate::domain::catalog::ModulePosition;
use crate::domain::foundation::{Timestamp, UserId};

/// How the next module's record must be written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeWrite {
    /// No record existed; insert the returned one.
    Insert,
    /// Existing record was locked and is now unlocked.
    Update,
    /// Existing record was already unlocked.
    Unchanged,
}

impl CascadeWrite {
    /// `record` when this write unlocked it, `None` when it was already open.
    pub fn newly_unlocked(self, record: ModuleProgress) -> Option<ModuleProgress> {
        match self {
            CascadeWrite::Insert | CascadeWrite::Update => Some(record),
            CascadeWrite::Unchanged => None,
        }
    }
}

/// Unlocks `next` for `user_id`, creating its record if needed.
pub fn cascade_unlock(
    existing: Option<ModuleProgress>,
    user_id: &UserId,
    next: &ModulePosition,
    now: Timestamp,
) -> (ModuleProgress, CascadeWrite) {
    match existing {
        Some(mut record) => {
            let write = if record.unlock(now) {
                CascadeWrite::Update
            } else {
                CascadeWrite::Unchanged
            };
            (record, write)
        }
        None => (
            ModuleProgress::unlocked_by_cascade(user_id.clone(), next, now),
            CascadeWrite::Insert,
        ),
    }
}
