use serde::{Deserialize, Serialize};

/// Tunable coefficients for one simulation run.
///
/// The set is a plain record: the engine reads whatever values it is handed and
/// never rejects them. An unstable Euler step or a negative rate produces
/// unphysical output, not an error. Missing keys in a `[params]` config section
/// fall back to the documented defaults field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Reproduction rate of active bacteria, gated by available Fe3.
    pub r_r: f32,
    /// Death rate of active bacteria.
    pub r_d: f32,
    /// Fe3 consumption rate per unit of active metabolism.
    pub r_c: f32,
    /// Fe2 production rate per unit of active metabolism.
    /// Commonly set equal to `r_c` for mass balance, but independently tunable.
    pub r_w: f32,
    /// Maximum Active -> Dormant transition rate (reached when Fe3 is exhausted).
    pub alpha_ad: f32,
    /// Maximum Dormant -> Active transition rate (reached when Fe3 is saturated).
    pub alpha_da: f32,
    /// Explicit Euler integration step. Stability is the caller's problem.
    pub time_step: f32,
    /// Unbiased random-walk coefficient for active bacteria.
    pub random_walk_active: f32,
    /// Unbiased random-walk coefficient for dormant bacteria.
    pub random_walk_dormant: f32,
    /// Strength of the drift along the local Fe3 gradient (active only).
    pub bias_strength: f32,
    /// Diffusion coefficient of dissolved Fe2.
    pub fe2_diffusion: f32,
    /// Spatial scale of the Fe3 noise field (larger = broader features).
    pub fe3_scale: f32,
    /// Amplitude of the Fe3 noise around the 0.5 baseline.
    pub fe3_variation: f32,
    /// Number of circular Active colonies stamped into the initial field.
    pub initial_active_seeds: u32,
    /// Radius of each seeded colony, in cells.
    pub seed_pixel_radius: u32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            r_r: 0.3,
            r_d: 0.05,
            r_c: 0.8,
            r_w: 0.8,
            alpha_ad: 0.5,
            alpha_da: 0.5,
            time_step: 0.1,
            random_walk_active: 0.1,
            random_walk_dormant: 0.3,
            bias_strength: 0.5,
            fe2_diffusion: 0.5,
            fe3_scale: 20.0,
            fe3_variation: 0.5,
            initial_active_seeds: 5,
            seed_pixel_radius: 5,
        }
    }
}

/// Presentation metadata for one tunable parameter.
///
/// Consumed by control-panel collaborators to build sliders; the engine itself
/// performs no validation against these bounds.
#[derive(Debug, Clone, Copy)]
pub struct ParameterRange {
    pub name: &'static str,
    pub label: &'static str,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// Recommended {default, min, max, step} per parameter, in display order.
pub const PARAMETER_RANGES: &[ParameterRange] = &[
    ParameterRange { name: "fe3_scale", label: "Fe3 Noise Scale", default: 20.0, min: 10.0, max: 40.0, step: 0.5 },
    ParameterRange { name: "fe3_variation", label: "Fe3 Noise Variation", default: 0.5, min: 0.0, max: 1.0, step: 0.01 },
    ParameterRange { name: "initial_active_seeds", label: "Initial Active Seeds", default: 5.0, min: 0.0, max: 20.0, step: 1.0 },
    ParameterRange { name: "seed_pixel_radius", label: "Seed Radius (cells)", default: 5.0, min: 1.0, max: 20.0, step: 1.0 },
    ParameterRange { name: "r_r", label: "Reproduction Rate", default: 0.3, min: 0.0, max: 1.0, step: 0.01 },
    ParameterRange { name: "r_d", label: "Death Rate", default: 0.05, min: 0.0, max: 1.0, step: 0.01 },
    ParameterRange { name: "r_c", label: "Fe3 Consumption", default: 0.8, min: 0.0, max: 2.0, step: 0.01 },
    ParameterRange { name: "r_w", label: "Fe2 Production", default: 0.8, min: 0.0, max: 2.0, step: 0.01 },
    ParameterRange { name: "alpha_ad", label: "Active -> Dormant Rate", default: 0.5, min: 0.0, max: 1.0, step: 0.01 },
    ParameterRange { name: "alpha_da", label: "Dormant -> Active Rate", default: 0.5, min: 0.0, max: 1.0, step: 0.01 },
    ParameterRange { name: "time_step", label: "Time Step", default: 0.1, min: 0.005, max: 0.2, step: 0.005 },
    ParameterRange { name: "random_walk_active", label: "Active Random Walk", default: 0.1, min: 0.0, max: 1.0, step: 0.05 },
    ParameterRange { name: "random_walk_dormant", label: "Dormant Random Walk", default: 0.3, min: 0.0, max: 1.0, step: 0.05 },
    ParameterRange { name: "bias_strength", label: "Gradient Bias", default: 0.5, min: 0.0, max: 2.0, step: 0.05 },
    ParameterRange { name: "fe2_diffusion", label: "Fe2 Diffusion", default: 0.5, min: 0.0, max: 1.0, step: 0.05 },
];

impl ParameterSet {
    /// Looks up a parameter value by its range-table name.
    pub fn value_of(&self, name: &str) -> Option<f32> {
        Some(match name {
            "r_r" => self.r_r,
            "r_d" => self.r_d,
            "r_c" => self.r_c,
            "r_w" => self.r_w,
            "alpha_ad" => self.alpha_ad,
            "alpha_da" => self.alpha_da,
            "time_step" => self.time_step,
            "random_walk_active" => self.random_walk_active,
            "random_walk_dormant" => self.random_walk_dormant,
            "bias_strength" => self.bias_strength,
            "fe2_diffusion" => self.fe2_diffusion,
            "fe3_scale" => self.fe3_scale,
            "fe3_variation" => self.fe3_variation,
            "initial_active_seeds" => self.initial_active_seeds as f32,
            "seed_pixel_radius" => self.seed_pixel_radius as f32,
            _ => return None,
        })
    }
}
