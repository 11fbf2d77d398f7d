use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    /// Day within the month; the approximation can yield 0 on a month boundary.
    pub day: u32,
    /// 1-based month index.
    pub month: u32,
    pub month_name: String,
    pub year: i64,
    /// e.g. "Sunday, March 30, 2025"
    pub gregorian_label: String,
    pub weekday: String,
}

impl HijriDate {
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name, self.year)
    }
}
