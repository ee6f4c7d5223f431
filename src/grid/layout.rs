//! Sizing and addressing of the (phi, z) grid.
use crate::config::SeedFinderConfig;
use std::f32::consts::PI;

/// Address of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub phi: usize,
    pub z: usize,
}

/// Bin geometry of the spacepoint grid.
///
/// The phi axis always spans the full circle and wraps; the z axis spans
/// `[z_min, z_max]` of the region of interest. Points outside either range
/// never reach the grid, so every accepted point maps to exactly one cell.
#[derive(Clone, Debug)]
pub struct GridLayout {
    n_phi: usize,
    n_z: usize,
    z_min: f32,
    phi_bin_width: f32,
    z_bin_width: f32,
}

impl GridLayout {
    /// Derives bin counts from the seeding cuts.
    ///
    /// A track at `min_pt` bends by `outer_angle` in phi when it reaches
    /// `r_max`, and by `inner_angle` when it reaches the innermost radius a
    /// top partner of an outermost middle point may have. Their difference
    /// bounds the phi spread of any middle-top doublet, and thus the bin
    /// width needed for one-neighbour searches. In z, the steepest accepted
    /// doublet climbs `cot_theta_max * delta_r_max` per partner search.
    pub fn from_config(config: &SeedFinderConfig) -> Self {
        let min_helix_radius = config.min_helix_radius();
        let max_r2 = config.r_max * config.r_max;
        let x_outer = max_r2 / (2.0 * min_helix_radius);
        let y_outer = (max_r2 - x_outer * x_outer).sqrt();
        let outer_angle = (x_outer / y_outer).atan();
        let mut inner_angle = 0.0;
        if config.r_max > config.delta_r_max {
            let inner_r = config.r_max - config.delta_r_max;
            let inner_r2 = inner_r * inner_r;
            let x_inner = inner_r2 / (2.0 * min_helix_radius);
            let y_inner = (inner_r2 - x_inner * x_inner).sqrt();
            inner_angle = (x_inner / y_inner).atan();
        }
        let n_phi = ((2.0 * PI / (outer_angle - inner_angle)).floor() as usize).max(1);

        let z_bin_size = config.cot_theta_max * config.delta_r_max;
        let n_z = ((config.z_max - config.z_min) / z_bin_size).floor() as usize;
        let n_z = n_z.max(1);

        Self {
            n_phi,
            n_z,
            z_min: config.z_min,
            phi_bin_width: 2.0 * PI / n_phi as f32,
            z_bin_width: (config.z_max - config.z_min) / n_z as f32,
        }
    }

    #[inline]
    pub fn n_phi(&self) -> usize {
        self.n_phi
    }

    #[inline]
    pub fn n_z(&self) -> usize {
        self.n_z
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.n_phi * self.n_z
    }

    /// Cell containing `(phi, z)`. Values on the upper edges clamp into the
    /// last bin so that accepted boundary points stay addressable.
    pub fn cell_of(&self, phi: f32, z: f32) -> Cell {
        let phi_bin = ((phi + PI) / self.phi_bin_width)
            .floor()
            .clamp(0.0, (self.n_phi - 1) as f32) as usize;
        let z_bin = ((z - self.z_min) / self.z_bin_width)
            .floor()
            .clamp(0.0, (self.n_z - 1) as f32) as usize;
        Cell {
            phi: phi_bin,
            z: z_bin,
        }
    }

    /// Flat storage index, phi-major. Output slots follow this order.
    #[inline]
    pub fn flat_index(&self, cell: Cell) -> usize {
        cell.phi * self.n_z + cell.z
    }

    #[inline]
    pub fn cell_at(&self, flat: usize) -> Cell {
        Cell {
            phi: flat / self.n_z,
            z: flat % self.n_z,
        }
    }

    /// All cells in flat-index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.num_cells()).map(|flat| self.cell_at(flat))
    }
}
