use crate::grid_state::GridState;
use crate::initial;
use crate::kernel;
use crate::noise::GradientNoise;
use anyhow::Result;
use ferrosim_common::{Cell, FieldSnapshot, ParameterSet};
use log::{debug, info};
use rand::prelude::*;

/// Active density above which a cell counts as colonized in snapshots.
const ACTIVE_PRESENCE_THRESHOLD: f32 = 0.01;

/// Owns the grid and the active parameter set, and drives the generation
/// lifecycle. The controller has no timer of its own: `start`/`pause` only
/// flip the running flag, and an external loop decides when to call `step`.
pub struct SimulationController {
    size: usize,
    params: ParameterSet,
    state: GridState,
    /// Host-side RNG for initial placement; every draw flows through it.
    rng: StdRng,
    /// When set, `reset` re-seeds the RNG and reproduces the same field.
    fixed_seed: Option<u64>,
    running: bool,
    generation: u64,
    recorded_snapshots: Vec<FieldSnapshot>,
}

impl SimulationController {
    /// Builds a controller with a fresh entropy seed. Fails only if the grid
    /// is degenerate or the initial field cannot be allocated.
    pub fn new(size: usize, params: ParameterSet) -> Result<Self> {
        Self::build(size, params, None)
    }

    /// Builds a controller whose initial field (and every reset of it) is
    /// fully determined by `seed`.
    pub fn with_seed(size: usize, params: ParameterSet, seed: u64) -> Result<Self> {
        Self::build(size, params, Some(seed))
    }

    fn build(size: usize, params: ParameterSet, fixed_seed: Option<u64>) -> Result<Self> {
        if size < 2 {
            anyhow::bail!("grid size must be at least 2 (got {}).", size);
        }
        let seed = fixed_seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = generate_field(size, &params, &mut rng)?;
        let state = GridState::new(size, cells)?;
        debug!("Initialized {}x{} field (seed {}).", size, size, seed);

        Ok(Self {
            size,
            params,
            state,
            rng,
            fixed_seed,
            running: false,
            generation: 0,
            recorded_snapshots: Vec::new(),
        })
    }

    /// Runs one generation transition synchronously: computes the full next
    /// buffer from the current one, then swaps. Readers never observe a
    /// partially written generation.
    pub fn step(&mut self) {
        let params = self.params;
        let size = self.size;
        let (current, next) = self.state.buffers();
        kernel::step_grid(current, next, size, &params);
        self.state.swap();
        self.generation += 1;
    }

    /// Allows an external loop to begin invoking `step`.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halts an external loop. The in-progress generation, if any, is not
    /// cancelled; this only gates future `step` calls.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Halts, regenerates the initial field, and discards the generation
    /// count and any recorded snapshots. With a fixed seed the regenerated
    /// field is identical; otherwise it is a fresh random draw.
    pub fn reset(&mut self) -> Result<()> {
        self.running = false;
        self.generation = 0;
        self.recorded_snapshots.clear();
        if let Some(seed) = self.fixed_seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let cells = generate_field(self.size, &self.params, &mut self.rng)?;
        self.state.replace(cells)?;
        info!("Reset {}x{} field.", self.size, self.size);
        Ok(())
    }

    /// Atomically replaces the active parameter set; the very next `step`
    /// reads the new values.
    pub fn update_parameters(&mut self, params: ParameterSet) {
        self.params = params;
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Simulation time in integration units.
    pub fn sim_time(&self) -> f32 {
        self.generation as f32 * self.params.time_step
    }

    /// Read-only handle to the current generation, stable between steps.
    pub fn current_state(&self) -> &GridState {
        &self.state
    }

    /// Flat row-major `size * size * 4` float view for display upload.
    pub fn field(&self) -> &[f32] {
        self.state.as_floats()
    }

    /// Records channel totals (and optionally the raw field) for the current
    /// generation.
    pub fn record_snapshot(&mut self, include_field: bool) {
        let cells = self.state.current();
        let mut fe3_total = 0.0f64;
        let mut fe2_total = 0.0f64;
        let mut dormant_total = 0.0f64;
        let mut active_total = 0.0f64;
        let mut colonized = 0u32;
        for cell in cells {
            fe3_total += cell.fe3 as f64;
            fe2_total += cell.fe2 as f64;
            dormant_total += cell.dormant as f64;
            active_total += cell.active as f64;
            if cell.active > ACTIVE_PRESENCE_THRESHOLD {
                colonized += 1;
            }
        }

        let snapshot = FieldSnapshot {
            generation: self.generation,
            time: self.sim_time(),
            fe3_total: fe3_total as f32,
            fe2_total: fe2_total as f32,
            dormant_total: dormant_total as f32,
            active_total: active_total as f32,
            colonized_cell_count: colonized,
            field: include_field.then(|| self.state.as_floats().to_vec()),
        };
        debug!(
            "Snapshot at generation {}: fe3 {:.3}, fe2 {:.3}, active {:.3}, dormant {:.3}, colonized {}.",
            snapshot.generation,
            snapshot.fe3_total,
            snapshot.fe2_total,
            snapshot.active_total,
            snapshot.dormant_total,
            snapshot.colonized_cell_count
        );
        self.recorded_snapshots.push(snapshot);
    }

    pub fn recorded_snapshots(&self) -> &[FieldSnapshot] {
        &self.recorded_snapshots
    }
}

/// Generates the starting field: noise instance and seed placement both drawn
/// from the controller's RNG, synchronously, before any step may run.
fn generate_field(size: usize, params: &ParameterSet, rng: &mut StdRng) -> Result<Vec<Cell>> {
    let noise = GradientNoise::seeded(rng.random());
    initial::generate(size, params, &noise, rng)
}
