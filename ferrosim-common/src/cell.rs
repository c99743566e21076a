use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Number of scalar channels stored per grid cell.
pub const CHANNELS: usize = 4;

/// One grid cell of the coupled iron/bacteria fields.
///
/// Field order matches the row-major `size * size * 4` float layout a display
/// collaborator uploads directly: Fe3, Fe2, Dormant, Active.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct Cell {
    /// Oxidized iron concentration (the substrate bacteria feed on).
    pub fe3: f32,
    /// Reduced iron concentration (metabolic byproduct).
    pub fe2: f32,
    /// Dormant bacterial density.
    pub dormant: f32,
    /// Active (foraging) bacterial density.
    pub active: f32,
}

/// Reinterprets a cell buffer as its flat channel array without copying.
pub fn as_float_slice(cells: &[Cell]) -> &[f32] {
    // `Cell` is four packed f32s, so the cast cannot fail.
    <[f32]>::ref_from_bytes(cells.as_bytes()).expect("cell buffer reinterprets as f32 slice")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_view_is_row_major_channel_order() {
        let cells = vec![
            Cell { fe3: 0.1, fe2: 0.2, dormant: 0.3, active: 0.4 },
            Cell { fe3: 0.5, fe2: 0.6, dormant: 0.7, active: 0.8 },
        ];
        let floats = as_float_slice(&cells);
        assert_eq!(floats.len(), 2 * CHANNELS);
        assert_eq!(floats, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
    }

    #[test]
    fn empty_buffer_views_as_empty() {
        assert!(as_float_slice(&[]).is_empty());
    }
}
