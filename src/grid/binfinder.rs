//! Neighbourhood strategies for the partner-cell search.
use super::layout::{Cell, GridLayout};

/// Pluggable selection of candidate partner cells for a middle cell.
///
/// Implementations must return cells valid for the given layout; the finder
/// assumes nothing beyond finiteness. The two shipped strategies cover the
/// common cases; callers with detector-specific neighbour maps supply their
/// own.
pub trait BinFinder {
    /// Cells that may hold bottom partners for middles in `cell`.
    fn bottom_bins(&self, cell: Cell, layout: &GridLayout) -> Vec<Cell>;

    /// Cells that may hold top partners for middles in `cell`.
    fn top_bins(&self, cell: Cell, layout: &GridLayout) -> Vec<Cell>;
}

/// Searches only the middle cell itself.
pub struct SameCellBinFinder;

impl BinFinder for SameCellBinFinder {
    fn bottom_bins(&self, cell: Cell, _layout: &GridLayout) -> Vec<Cell> {
        vec![cell]
    }

    fn top_bins(&self, cell: Cell, _layout: &GridLayout) -> Vec<Cell> {
        vec![cell]
    }
}

/// Searches the middle cell plus its two phi neighbours at the same z,
/// wrapping around the phi seam.
pub struct PhiNeighborBinFinder;

fn phi_ring(cell: Cell, layout: &GridLayout) -> Vec<Cell> {
    let n = layout.n_phi();
    // Small grids collapse the ring; never hand the same cell out twice or
    // the scan would produce duplicate partners.
    match n {
        0 | 1 => vec![cell],
        2 => vec![
            cell,
            Cell {
                phi: 1 - cell.phi,
                z: cell.z,
            },
        ],
        _ => {
            let prev = (cell.phi + n - 1) % n;
            let next = (cell.phi + 1) % n;
            vec![
                cell,
                Cell {
                    phi: prev,
                    z: cell.z,
                },
                Cell {
                    phi: next,
                    z: cell.z,
                },
            ]
        }
    }
}

impl BinFinder for PhiNeighborBinFinder {
    fn bottom_bins(&self, cell: Cell, layout: &GridLayout) -> Vec<Cell> {
        phi_ring(cell, layout)
    }

    fn top_bins(&self, cell: Cell, layout: &GridLayout) -> Vec<Cell> {
        phi_ring(cell, layout)
    }
}
