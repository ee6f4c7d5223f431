//! Event index: beam-frame spacepoints binned over (phi, z).
use super::layout::{Cell, GridLayout};
use crate::config::SeedFinderConfig;
use crate::point::{InternalSpacePoint, SpacePoint};
use log::debug;
use nalgebra::Vector2;

/// The per-event spatial index.
///
/// Owns every [`InternalSpacePoint`] it adapted; cells are non-decreasing in
/// radius up to the millimetre bucket width used during the build. Read-only
/// after construction.
pub struct SpacePointIndex<'a, P> {
    layout: GridLayout,
    cells: Vec<Vec<InternalSpacePoint<'a, P>>>,
    points_seen: usize,
    points_binned: usize,
}

impl<'a, P: SpacePoint> SpacePointIndex<'a, P> {
    /// Adapts and bins one event's spacepoints.
    ///
    /// Points outside the z or phi region of interest are skipped silently.
    /// The radius guard truncates to integer millimetres, so a point whose
    /// truncated radius reaches `r_max + |beam_pos|` is dropped even when
    /// its exact radius is fractionally inside; partner searches near the
    /// outermost radius rely on this exact behaviour staying put.
    ///
    /// Bucketing by millimetre and flushing buckets in ascending order makes
    /// every cell radius-sorted to within one bucket width, which is all the
    /// doublet scan's early break requires (the bucket is narrower than any
    /// practical `delta_r_min`).
    pub fn build<I, C>(points: I, cov_tool: C, config: &SeedFinderConfig) -> Self
    where
        I: IntoIterator<Item = &'a P>,
        C: Fn(&P, f32, f32, f32) -> Vector2<f32>,
    {
        let layout = GridLayout::from_config(config);
        let num_r_buckets = (config.r_max + config.beam_pos.norm()) as usize;
        let mut r_buckets: Vec<Vec<InternalSpacePoint<'a, P>>> = Vec::new();
        r_buckets.resize_with(num_r_buckets, Vec::new);

        let mut points_seen = 0usize;
        for sp in points {
            points_seen += 1;
            let z = sp.z();
            if z > config.z_max || z < config.z_min {
                continue;
            }
            let phi = sp.y().atan2(sp.x());
            if phi > config.phi_max || phi < config.phi_min {
                continue;
            }
            let cov = cov_tool(sp, config.z_align, config.r_align, config.sigma_error);
            let isp = InternalSpacePoint::new(sp, config.beam_pos, cov);
            let r_index = isp.radius() as usize;
            if r_index >= num_r_buckets {
                continue;
            }
            r_buckets[r_index].push(isp);
        }

        let mut cells: Vec<Vec<InternalSpacePoint<'a, P>>> = Vec::new();
        cells.resize_with(layout.num_cells(), Vec::new);
        let mut points_binned = 0usize;
        for bucket in r_buckets {
            for isp in bucket {
                let cell = layout.cell_of(isp.phi(), isp.z());
                let flat = layout.flat_index(cell);
                cells[flat].push(isp);
                points_binned += 1;
            }
        }

        debug!(
            "SpacePointIndex::build seen={} binned={} grid={}x{}",
            points_seen,
            points_binned,
            layout.n_phi(),
            layout.n_z()
        );

        Self {
            layout,
            cells,
            points_seen,
            points_binned,
        }
    }
}

impl<'a, P> SpacePointIndex<'a, P> {
    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Spacepoints of one cell, in near-ascending radius order.
    #[inline]
    pub fn at(&self, cell: Cell) -> &[InternalSpacePoint<'a, P>] {
        &self.cells[self.layout.flat_index(cell)]
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Grid dimensions as (phi bins, z bins).
    #[inline]
    pub fn num_bins(&self) -> (usize, usize) {
        (self.layout.n_phi(), self.layout.n_z())
    }

    /// Spacepoints offered to the builder, including skipped ones.
    #[inline]
    pub fn points_seen(&self) -> usize {
        self.points_seen
    }

    /// Spacepoints actually binned.
    #[inline]
    pub fn points_binned(&self) -> usize {
        self.points_binned
    }
}
