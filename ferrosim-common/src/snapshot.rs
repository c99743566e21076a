use serde::{Deserialize, Serialize};

/// A snapshot of the field state and summary metrics at a recording point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Generation count at which the snapshot was taken.
    pub generation: u64,
    /// Simulation time (generation * time_step).
    pub time: f32,
    /// Grid-wide totals per channel. With `r_w == r_c` and diffusion-only
    /// transport, `fe3_total + fe2_total` stays constant over a run.
    pub fe3_total: f32,
    pub fe2_total: f32,
    pub dormant_total: f32,
    pub active_total: f32,
    /// Number of cells whose active density exceeds the presence threshold.
    pub colonized_cell_count: u32,
    /// Optional: raw row-major field (4 floats per cell) at the snapshot time.
    /// Included only if the output config asks for it; large.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Vec<f32>>,
}
