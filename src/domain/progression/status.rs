//! Per-module status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a learner stands on one module.
///
/// Moves forward only: `Locked -> Unlocked -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    Locked,
    Unlocked,
    Completed,
}

impl ModuleStatus {
    pub fn from_flags(is_unlocked: bool, is_completed: bool) -> Self {
        match (is_unlocked, is_completed) {
            (_, true) => ModuleStatus::Completed,
            (true, false) => ModuleStatus::Unlocked,
            (false, false) => ModuleStatus::Locked,
        }
    }

    pub fn is_accessible(&self) -> bool {
        !matches!(self, ModuleStatus::Locked)
    }
}

impl StateMachine for ModuleStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ModuleStatus::*;
        matches!((self, target), (Locked, Unlocked) | (Unlocked, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ModuleStatus::*;
        match self {
            Locked => vec![Unlocked],
            Unlocked => vec![Completed],
            Completed => vec![],
        }
    }
}
