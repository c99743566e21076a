use crate::noise::NoiseField;
use anyhow::Result;
use ferrosim_common::{clamp, Cell, ParameterSet};
use rand::distr::Uniform;
use rand::prelude::*;

/// Builds the starting field: a smooth Fe3 landscape plus seeded Active
/// colonies. Fe2 and Dormant start at zero everywhere.
///
/// Deterministic for a given noise field, RNG state, and parameter set; the
/// RNG is only consulted for seed center placement.
pub fn generate(
    size: usize,
    params: &ParameterSet,
    noise: &dyn NoiseField,
    rng: &mut StdRng,
) -> Result<Vec<Cell>> {
    let mut cells = fill_fe3_field(size, params, noise);

    if params.initial_active_seeds > 0 {
        let coord_dist = Uniform::new(0, size as i32)?;
        for _ in 0..params.initial_active_seeds {
            let cx = rng.sample(coord_dist);
            let cy = rng.sample(coord_dist);
            stamp_active_seed(&mut cells, size, cx, cy, params.seed_pixel_radius);
        }
    }

    Ok(cells)
}

/// Maps noise samples at `(x / fe3_scale, y / fe3_scale)` onto Fe3, clamped to
/// [0, 1] around the 0.5 baseline. All other channels are zero.
pub fn fill_fe3_field(size: usize, params: &ParameterSet, noise: &dyn NoiseField) -> Vec<Cell> {
    let inv_scale = 1.0 / params.fe3_scale;
    let mut cells = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let sample = noise.sample(x as f32 * inv_scale, y as f32 * inv_scale);
            let fe3 = clamp(0.5 + params.fe3_variation * sample, 0.0, 1.0);
            cells.push(Cell { fe3, ..Cell::default() });
        }
    }
    cells
}

/// Stamps one circular Active colony centered at `(cx, cy)`: density 1.0 at
/// the center falling linearly to 0.5 at the radius edge. Existing density is
/// combined with `max`, so overlapping colonies never erode each other; cells
/// outside the grid are silently skipped.
pub fn stamp_active_seed(cells: &mut [Cell], size: usize, cx: i32, cy: i32, radius: u32) {
    let radius = radius.max(1);
    let r = radius as i32;
    let radius_f = radius as f32;
    for dy in -r..=r {
        for dx in -r..=r {
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || y < 0 || x >= size as i32 || y >= size as i32 {
                continue;
            }
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            if dist > radius_f {
                continue;
            }
            let density = 1.0 - 0.5 * dist / radius_f;
            let cell = &mut cells[y as usize * size + x as usize];
            cell.active = cell.active.max(density);
        }
    }
}
