/// Deterministic failure injection
///
/// A plan maps each operation to a fault mode. Armed operations still wait
/// out their latency and then reject, so callers observe the same timing as
/// a real failed request.
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::GetAll => "getAll",
            Operation::GetById => "getById",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaultMode {
    /// Fail the next n calls, then recover
    Next(u32),
    Always,
}

#[derive(Debug, Default)]
pub struct FaultPlan {
    modes: Mutex<HashMap<Operation, FaultMode>>,
}

impl FaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `times` calls of `op`
    pub fn fail_next(&self, op: Operation, times: u32) {
        let mut modes = self.modes.lock();
        if times == 0 {
            modes.remove(&op);
        } else {
            modes.insert(op, FaultMode::Next(times));
        }
    }

    pub fn fail_always(&self, op: Operation) {
        self.modes.lock().insert(op, FaultMode::Always);
    }

    pub fn clear(&self) {
        self.modes.lock().clear();
    }

    /// Consume one armed fault for `op`, returning whether the call must fail
    pub fn should_fail(&self, op: Operation) -> bool {
        let mut modes = self.modes.lock();
        let exhausted = match modes.get_mut(&op) {
            Some(FaultMode::Always) => return true,
            Some(FaultMode::Next(remaining)) => {
                *remaining -= 1;
                *remaining == 0
            }
            None => return false,
        };
        if exhausted {
            modes.remove(&op);
        }
        true
    }
}
