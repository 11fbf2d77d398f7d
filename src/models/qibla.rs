use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QiblaResult {
    /// Degrees clockwise from true north, one decimal, in [0, 360).
    pub direction: f64,
    pub distance_km: f64,
    /// e.g. "10,307 km"
    pub distance: String,
}
