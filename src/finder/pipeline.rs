//! Seed finder driving the doublet-triplet-filter chain per grid cell.
//!
//! Typical usage:
//! ```no_run
//! use nalgebra::Vector2;
//! use seedfinder::prelude::*;
//!
//! # struct Hit { x: f32, y: f32, z: f32 }
//! # impl SpacePoint for Hit {
//! #     fn x(&self) -> f32 { self.x }
//! #     fn y(&self) -> f32 { self.y }
//! #     fn z(&self) -> f32 { self.z }
//! # }
//! # fn example(hits: Vec<Hit>) -> Result<(), seedfinder::ConfigError> {
//! let finder = SeedFinder::new(
//!     SeedFinderConfig::default(),
//!     DefaultSeedFilter::new(SeedFilterConfig::default()),
//! )?;
//! let index = finder.bin_space_points(&hits, |_sp, _za, _ra, _se| Vector2::zeros());
//! let per_cell = finder.create_seeds(&index, &PhiNeighborBinFinder);
//! # let _ = per_cell;
//! # Ok(())
//! # }
//! ```
use super::doublets::{compatible_bottoms, compatible_tops};
use super::transform::transform_coordinates;
use super::workspace::FinderWorkspace;
use crate::config::{ConfigError, DerivedCuts, SeedFinderConfig};
use crate::filter::SeedFilter;
use crate::grid::{BinFinder, Cell, SpacePointIndex};
use crate::point::{InternalSpacePoint, SpacePoint};
use crate::types::{Seed, SeedingSummary};
use log::debug;
use nalgebra::Vector2;
use std::time::Instant;

/// Triplet seed finder.
///
/// Holds the validated configuration, the cut constants derived from it,
/// and the injected seed filter. Immutable once constructed; one instance
/// serves any number of events and threads.
pub struct SeedFinder<F> {
    config: SeedFinderConfig,
    cuts: DerivedCuts,
    filter: F,
}

impl<F> SeedFinder<F> {
    /// Validates `config` and precomputes the scattering and curvature
    /// constants.
    pub fn new(config: SeedFinderConfig, filter: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let cuts = DerivedCuts::new(&config);
        Ok(Self {
            config,
            cuts,
            filter,
        })
    }

    pub fn config(&self) -> &SeedFinderConfig {
        &self.config
    }

    pub fn derived_cuts(&self) -> &DerivedCuts {
        &self.cuts
    }

    /// Builds the per-event spatial index.
    pub fn bin_space_points<'a, P, C>(
        &self,
        points: impl IntoIterator<Item = &'a P>,
        cov_tool: C,
    ) -> SpacePointIndex<'a, P>
    where
        P: SpacePoint + 'a,
        C: Fn(&P, f32, f32, f32) -> Vector2<f32>,
    {
        SpacePointIndex::build(points, cov_tool, &self.config)
    }

    /// Runs the seeding kernel for every middle spacepoint of one cell,
    /// appending ranked seeds to `out`.
    ///
    /// Distinct cells are independent; callers may fan this out across
    /// threads as long as each thread brings its own workspace and output
    /// slot.
    pub fn seeds_for_cell<'i, 'a, P, B>(
        &self,
        index: &'i SpacePointIndex<'a, P>,
        bin_finder: &B,
        cell: Cell,
        ws: &mut FinderWorkspace<'i, 'a, P>,
        out: &mut Vec<Seed<'a, P>>,
    ) where
        P: SpacePoint,
        F: SeedFilter<P>,
        B: BinFinder + ?Sized,
    {
        let middles = index.at(cell);
        if middles.is_empty() {
            return;
        }
        let bottom_cells = bin_finder.bottom_bins(cell, index.layout());
        let top_cells = bin_finder.top_bins(cell, index.layout());
        for middle in middles {
            self.seeds_for_middle(index, middle, &bottom_cells, &top_cells, ws, out);
        }
    }

    fn seeds_for_middle<'i, 'a, P>(
        &self,
        index: &'i SpacePointIndex<'a, P>,
        middle: &'i InternalSpacePoint<'a, P>,
        bottom_cells: &[Cell],
        top_cells: &[Cell],
        ws: &mut FinderWorkspace<'i, 'a, P>,
        out: &mut Vec<Seed<'a, P>>,
    ) where
        P: SpacePoint,
        F: SeedFilter<P>,
    {
        compatible_bottoms(middle, index, bottom_cells, &self.config, &mut ws.compat_bottoms);
        if ws.compat_bottoms.is_empty() {
            return;
        }
        compatible_tops(middle, index, top_cells, &self.config, &mut ws.compat_tops);
        if ws.compat_tops.is_empty() {
            return;
        }

        transform_coordinates(&ws.compat_bottoms, middle, true, &mut ws.lin_bottoms);
        transform_coordinates(&ws.compat_tops, middle, false, &mut ws.lin_tops);

        let r_m = middle.radius();
        let cov_r_m = middle.covr();
        let cov_z_m = middle.covz();
        let sigma2 = self.config.sigma_scattering * self.config.sigma_scattering;

        ws.candidates.clear();
        for (b_idx, lb) in ws.lin_bottoms.iter().enumerate() {
            let cot_theta_b = lb.cot_theta;
            // 1 + cot^2(theta) = 1/sin^2(theta); converts the pT-based
            // scattering bound to total momentum at this doublet's slope.
            let i_sin_theta2 = 1.0 + cot_theta_b * cot_theta_b;
            let scattering_in_region2 =
                self.cuts.max_scattering_angle2 * i_sin_theta2 * sigma2;

            ws.triplet_tops.clear();
            ws.curvatures.clear();
            ws.impact_parameters.clear();

            for (t_idx, lt) in ws.lin_tops.iter().enumerate() {
                // Combined doublet errors plus the middle-point correlation
                // term shared by both legs.
                let error2 = lt.er
                    + lb.er
                    + 2.0 * (cot_theta_b * lt.cot_theta * cov_r_m + cov_z_m)
                        * lb.i_delta_r
                        * lt.i_delta_r;

                let delta_cot_theta = cot_theta_b - lt.cot_theta;
                let delta_cot_theta2 = delta_cot_theta * delta_cot_theta;
                let mut d_cot_theta_minus_error2 = 0.0f32;
                // Only when the slope difference exceeds its own error can
                // scattering rule the pair out; both sides stay squared.
                if delta_cot_theta2 - error2 > 0.0 {
                    let error = error2.sqrt();
                    d_cot_theta_minus_error2 =
                        delta_cot_theta2 + error2 - 2.0 * delta_cot_theta.abs() * error;
                    if d_cot_theta_minus_error2 > scattering_in_region2 {
                        continue;
                    }
                }

                // Parallel rays in the conformal plane carry no curvature
                // information.
                let d_u = lt.u - lb.u;
                if d_u == 0.0 {
                    continue;
                }
                // Straight line V = A*U + B in conformal space encodes the
                // circle: sqrt(S2)/B is twice the helix radius.
                let a = (lt.v - lb.v) / d_u;
                let s2 = 1.0 + a * a;
                let b = lb.v - a * lb.u;
                let b2 = b * b;
                if s2 < b2 * self.cuts.min_helix_diameter2 {
                    continue;
                }

                // Re-evaluate scattering at the pT this triplet actually
                // measured instead of the configured floor.
                let i_helix_diameter2 = b2 / s2;
                let pt2_scatter = 4.0 * i_helix_diameter2 * self.cuts.pt2_per_radius;
                let p2_scatter = pt2_scatter * i_sin_theta2;
                if delta_cot_theta2 - error2 > 0.0
                    && d_cot_theta_minus_error2 > p2_scatter * sigma2
                {
                    continue;
                }

                // Impact parameter straight from the linear form, no
                // quadratic solve in the transverse plane needed.
                let im = ((a - b * r_m) * r_m).abs();
                if im > self.config.impact_max {
                    continue;
                }

                ws.triplet_tops.push(ws.compat_tops[t_idx]);
                // Signed curvature keeps the bending direction.
                ws.curvatures.push(b / s2.sqrt());
                ws.impact_parameters.push(im);
            }

            if !ws.triplet_tops.is_empty() {
                self.filter.filter_2sp_fixed(
                    ws.compat_bottoms[b_idx],
                    middle,
                    &ws.triplet_tops,
                    &ws.curvatures,
                    &ws.impact_parameters,
                    lb.z_origin,
                    &mut ws.candidates,
                );
            }
        }

        self.filter.filter_1sp_fixed(&mut ws.candidates, out);
    }

    /// Runs the kernel over every cell sequentially.
    ///
    /// Returns one seed list per cell, in flat (phi-major) cell order.
    pub fn create_seeds<'a, P, B>(
        &self,
        index: &SpacePointIndex<'a, P>,
        bin_finder: &B,
    ) -> Vec<Vec<Seed<'a, P>>>
    where
        P: SpacePoint,
        F: SeedFilter<P>,
        B: BinFinder + ?Sized,
    {
        let mut output: Vec<Vec<Seed<'a, P>>> = Vec::new();
        output.resize_with(index.num_cells(), Vec::new);
        let mut ws = FinderWorkspace::new();
        for (flat, cell) in index.layout().cells().enumerate() {
            self.seeds_for_cell(index, bin_finder, cell, &mut ws, &mut output[flat]);
        }
        output
    }

    /// Like [`create_seeds`](Self::create_seeds), additionally reporting
    /// counters and wall time for the pass.
    pub fn create_seeds_with_summary<'a, P, B>(
        &self,
        index: &SpacePointIndex<'a, P>,
        bin_finder: &B,
    ) -> (Vec<Vec<Seed<'a, P>>>, SeedingSummary)
    where
        P: SpacePoint,
        F: SeedFilter<P>,
        B: BinFinder + ?Sized,
    {
        let start = Instant::now();
        debug!(
            "SeedFinder::create_seeds start points={} cells={}",
            index.points_binned(),
            index.num_cells()
        );
        let output = self.create_seeds(index, bin_finder);
        let seeds = output.iter().map(Vec::len).sum();
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "SeedFinder::create_seeds done seeds={} latency_ms={:.3}",
            seeds, latency_ms
        );
        let summary = SeedingSummary {
            points_seen: index.points_seen(),
            points_binned: index.points_binned(),
            grid_bins: index.num_bins(),
            seeds,
            latency_ms,
        };
        (output, summary)
    }

    /// Parallel driver: fans the per-cell kernel out across the rayon pool
    /// with one workspace per worker. Slot order matches the sequential
    /// driver.
    #[cfg(feature = "parallel")]
    pub fn par_create_seeds<'a, P, B>(
        &self,
        index: &SpacePointIndex<'a, P>,
        bin_finder: &B,
    ) -> Vec<Vec<Seed<'a, P>>>
    where
        P: SpacePoint + Sync,
        F: SeedFilter<P> + Sync,
        B: BinFinder + Sync + ?Sized,
    {
        use rayon::prelude::*;

        let layout = index.layout();
        (0..index.num_cells())
            .into_par_iter()
            .map_init(FinderWorkspace::new, |ws, flat| {
                let mut out = Vec::new();
                self.seeds_for_cell(index, bin_finder, layout.cell_at(flat), ws, &mut out);
                out
            })
            .collect()
    }
}
