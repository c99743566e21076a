use anyhow::Result;
use ferrosim_common::{as_float_slice, Cell};

/// Double-buffered grid storage.
///
/// Within one generation every read targets `current` and every write targets
/// `next`; [`GridState::swap`] flips the two after the generation barrier.
/// Readers therefore only ever observe a fully written buffer, which is the
/// whole concurrency discipline of the engine.
#[derive(Debug)]
pub struct GridState {
    size: usize,
    current: Vec<Cell>,
    next: Vec<Cell>,
}

impl GridState {
    /// Takes ownership of an initial field. The backing `next` buffer is
    /// allocated here; this is the engine's single allocation point.
    pub fn new(size: usize, initial: Vec<Cell>) -> Result<Self> {
        if initial.len() != size * size {
            anyhow::bail!(
                "initial field length {} does not match {}x{} grid.",
                initial.len(),
                size,
                size
            );
        }
        let next = vec![Cell::default(); size * size];
        Ok(Self { size, current: initial, next })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Read access to the last fully computed generation.
    pub fn current(&self) -> &[Cell] {
        &self.current
    }

    /// Flat row-major channel view of the current generation, laid out as
    /// `size * size * 4` floats for direct display upload.
    pub fn as_floats(&self) -> &[f32] {
        as_float_slice(&self.current)
    }

    /// Split borrow for the update pass: read side and write side together.
    pub fn buffers(&mut self) -> (&[Cell], &mut [Cell]) {
        (&self.current, &mut self.next)
    }

    /// Makes `next` the new `current`. An index flip, not a copy.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Replaces the current field wholesale (reset path). The stale `next`
    /// buffer is left as-is; the following step overwrites every cell of it.
    pub fn replace(&mut self, cells: Vec<Cell>) -> Result<()> {
        if cells.len() != self.size * self.size {
            anyhow::bail!(
                "replacement field length {} does not match {}x{} grid.",
                cells.len(),
                self.size,
                self.size
            );
        }
        self.current = cells;
        Ok(())
    }
}
