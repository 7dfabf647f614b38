use crate::core::model::MetricsSnapshot;

/// Single replace-only cell for the latest [`MetricsSnapshot`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsStore {
    snapshot: Option<MetricsSnapshot>,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored snapshot wholesale and returns the superseded one.
    pub fn set(&mut self, snapshot: MetricsSnapshot) -> Option<MetricsSnapshot> {
        self.snapshot.replace(snapshot)
    }

    pub fn get(&self) -> Option<&MetricsSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn reset(&mut self) {
        self.snapshot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none()
    }
}
