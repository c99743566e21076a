//! The per-cell generation transition.
//!
//! One fused pass computes reaction, diffusion, and movement together; every
//! term reads only the generation's starting values, never a partially
//! updated cell, so the update is order-independent and the pass maps over
//! the grid with rayon without synchronization. The only barrier is the
//! buffer swap after the whole pass.
//!
//! Edge policy: out-of-bounds neighbor coordinates clamp to the nearest valid
//! cell. A clamped neighbor equals the cell itself, so no flux crosses the
//! boundary and both diffusion and the chemotaxis drift conserve their
//! channel totals.

use crate::rates::{r_ad, r_da};
use ferrosim_common::{Cell, ParameterSet};
use rayon::prelude::*;

/// The 4-neighborhood a cell update reads, fetched from the current buffer.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood {
    pub center: Cell,
    pub west: Cell,
    pub east: Cell,
    pub north: Cell,
    pub south: Cell,
}

impl Neighborhood {
    /// Fetches the neighborhood of `(x, y)` with clamped edges.
    pub fn clamped(cells: &[Cell], size: usize, x: usize, y: usize) -> Self {
        let at = |cx: usize, cy: usize| cells[cy * size + cx];
        Self {
            center: at(x, y),
            west: at(x.saturating_sub(1), y),
            east: at((x + 1).min(size - 1), y),
            north: at(x, y.saturating_sub(1)),
            south: at(x, (y + 1).min(size - 1)),
        }
    }

    /// Discrete Laplacian of one channel: neighbor average minus self.
    fn laplacian(&self, channel: impl Fn(&Cell) -> f32) -> f32 {
        (channel(&self.west) + channel(&self.east) + channel(&self.north) + channel(&self.south))
            * 0.25
            - channel(&self.center)
    }

    /// Net outward chemotaxis flux of Active across the four faces.
    ///
    /// Per face the flux is `A_face * (Fe3_neighbor - Fe3_self)` with the
    /// face density taken as the arithmetic mean, positive when bacteria
    /// leave toward a better-fed neighbor. The term is antisymmetric between
    /// any cell pair, so the grid total of Active is untouched by bias alone.
    fn active_outflow(&self) -> f32 {
        let c = &self.center;
        let face = |n: &Cell| 0.5 * (c.active + n.active) * (n.fe3 - c.fe3);
        face(&self.west) + face(&self.east) + face(&self.north) + face(&self.south)
    }
}

/// Advances one cell by one generation. Pure: output depends only on the
/// neighborhood snapshot and the parameter set.
pub fn step_cell(nb: &Neighborhood, p: &ParameterSet) -> Cell {
    let c = nb.center;

    // Reaction terms, all local.
    let growth = p.r_r * c.active * c.fe3;
    let death = p.r_d * c.active;
    let to_dormant = r_ad(c.fe3, p.alpha_ad) * c.active;
    let to_active = r_da(c.fe3, p.alpha_da) * c.dormant;
    // Fe3 turnover gated by what is locally available; r_c and r_w scale the
    // same product, so equal rates conserve fe3 + fe2 exactly.
    let metabolized = c.active * c.fe3;

    // Transport terms, neighbor-coupled.
    let fe2_spread = p.fe2_diffusion * nb.laplacian(|cell| cell.fe2);
    let active_walk = p.random_walk_active * nb.laplacian(|cell| cell.active);
    let dormant_walk = p.random_walk_dormant * nb.laplacian(|cell| cell.dormant);
    let active_drift = -p.bias_strength * nb.active_outflow();

    // Explicit Euler for every channel.
    Cell {
        fe3: c.fe3 + p.time_step * (-p.r_c * metabolized),
        fe2: c.fe2 + p.time_step * (p.r_w * metabolized + fe2_spread),
        dormant: c.dormant + p.time_step * (to_dormant - to_active + dormant_walk),
        active: c.active
            + p.time_step * (growth - death - to_dormant + to_active + active_walk + active_drift),
    }
}

/// Maps [`step_cell`] over the whole grid, writing the next generation.
///
/// Rows of the output buffer are distributed across the rayon pool; each task
/// reads the shared `current` slice and owns its output row, so there is no
/// write contention and no locking.
pub fn step_grid(current: &[Cell], next: &mut [Cell], size: usize, params: &ParameterSet) {
    debug_assert_eq!(current.len(), size * size);
    debug_assert_eq!(next.len(), size * size);

    next.par_chunks_mut(size).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let nb = Neighborhood::clamped(current, size, x, y);
            *out = step_cell(&nb, params);
        }
    });
}
