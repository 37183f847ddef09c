use serde::Deserialize;

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 10;
pub const MAX_ACTIVITY_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQueryForm {
    pub limit: Option<i64>,
}

impl ActivityQueryForm {
    /// Requested feed length clamped to `1..=100`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT)
    }
}
