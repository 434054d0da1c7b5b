/// Artificial latency applied to every collection call
use crate::fault::Operation;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl LatencyProfile {
    /// Users and comments collections
    pub fn standard() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(250),
        }
    }

    /// Posts collection: heavier list and create calls
    pub fn posts() -> Self {
        Self {
            get_all: Duration::from_millis(400),
            create: Duration::from_millis(500),
            ..Self::standard()
        }
    }

    /// Zero latency, for unit tests that don't exercise interleaving
    pub fn instant() -> Self {
        Self {
            get_all: Duration::ZERO,
            get_by_id: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    /// Multiply every delay by `factor` (negative or NaN is treated as zero)
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |d: Duration| {
            if factor.is_finite() && factor > 0.0 {
                Duration::from_nanos((d.as_nanos() as f64 * factor).round() as u64)
            } else {
                Duration::ZERO
            }
        };
        Self {
            get_all: scale(self.get_all),
            get_by_id: scale(self.get_by_id),
            create: scale(self.create),
            update: scale(self.update),
            delete: scale(self.delete),
        }
    }

    pub fn for_operation(&self, op: Operation) -> Duration {
        match op {
            Operation::GetAll => self.get_all,
            Operation::GetById => self.get_by_id,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}
