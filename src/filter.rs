//! Two-stage seed quality filter.
//!
//! The finder produces unordered triplet sets; this is the only component
//! that ranks them. Stage one runs once per (bottom, middle) pair over all
//! accepted tops, stage two once per middle over the merged candidates.
//! Both stages are a caller-replaceable policy behind [`SeedFilter`]; the
//! shipped [`DefaultSeedFilter`] rewards tops that share a curvature (one
//! track crossing many layers) and penalises large impact parameters.
use crate::point::{InternalSpacePoint, SpacePoint};
use crate::types::Seed;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ranking policy injected into the seed finder.
pub trait SeedFilter<P: SpacePoint> {
    /// Scores every accepted top for one fixed (bottom, middle) pair and
    /// appends the weighted candidates to `out`.
    ///
    /// `curvatures` and `impact_parameters` run parallel to `tops`;
    /// `z_origin` is the bottom doublet's z-axis intercept.
    #[allow(clippy::too_many_arguments)]
    fn filter_2sp_fixed<'a>(
        &self,
        bottom: &InternalSpacePoint<'a, P>,
        middle: &InternalSpacePoint<'a, P>,
        tops: &[&InternalSpacePoint<'a, P>],
        curvatures: &[f32],
        impact_parameters: &[f32],
        z_origin: f32,
        out: &mut Vec<Seed<'a, P>>,
    );

    /// Selects from all of one middle's candidates into the region output.
    ///
    /// Must leave `candidates` empty; it is reused scratch.
    fn filter_1sp_fixed<'a>(
        &self,
        candidates: &mut Vec<Seed<'a, P>>,
        out: &mut Vec<Seed<'a, P>>,
    );
}

/// Knobs of the default quality policy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedFilterConfig {
    /// Curvature window (1/mm on the inverse helix diameter) within which
    /// two tops count as lying on the same track.
    pub delta_inv_helix_diameter: f32,
    /// Weight penalty per millimetre of transverse impact parameter.
    pub impact_weight_factor: f32,
    /// Weight awarded for each distinct curvature-compatible top.
    pub compat_seed_weight: f32,
    /// Minimum radial distance between tops before they count as distinct
    /// layers (mm).
    pub delta_r_min: f32,
    /// Cap on seeds kept per middle spacepoint.
    pub max_seeds_per_sp_m: usize,
    /// Cap on curvature-compatibility boosts per candidate.
    pub compat_seed_limit: usize,
}

impl Default for SeedFilterConfig {
    fn default() -> Self {
        Self {
            delta_inv_helix_diameter: 0.00003,
            impact_weight_factor: 1.0,
            compat_seed_weight: 200.0,
            delta_r_min: 5.0,
            max_seeds_per_sp_m: 5,
            compat_seed_limit: 2,
        }
    }
}

/// Curvature-compatibility scoring with a per-middle cap.
pub struct DefaultSeedFilter {
    config: SeedFilterConfig,
}

impl DefaultSeedFilter {
    pub fn new(config: SeedFilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeedFilterConfig {
        &self.config
    }
}

impl<P: SpacePoint> SeedFilter<P> for DefaultSeedFilter {
    #[allow(clippy::too_many_arguments)]
    fn filter_2sp_fixed<'a>(
        &self,
        bottom: &InternalSpacePoint<'a, P>,
        middle: &InternalSpacePoint<'a, P>,
        tops: &[&InternalSpacePoint<'a, P>],
        curvatures: &[f32],
        impact_parameters: &[f32],
        z_origin: f32,
        out: &mut Vec<Seed<'a, P>>,
    ) {
        let cfg = &self.config;
        for (i, top) in tops.iter().enumerate() {
            let lower_limit = curvatures[i] - cfg.delta_inv_helix_diameter;
            let upper_limit = curvatures[i] + cfg.delta_inv_helix_diameter;
            let current_r = top.radius();
            let mut weight = -impact_parameters[i] * cfg.impact_weight_factor;

            // Tops at matching curvature but different layers mean the
            // candidate is backed by more than three measurements. Each
            // distinct layer is credited once.
            let mut credited_radii: Vec<f32> = Vec::with_capacity(cfg.compat_seed_limit);
            for (j, other) in tops.iter().enumerate() {
                if i == j {
                    continue;
                }
                let other_r = other.radius();
                if (current_r - other_r).abs() < cfg.delta_r_min {
                    continue;
                }
                if curvatures[j] < lower_limit || curvatures[j] > upper_limit {
                    continue;
                }
                let mut new_layer = true;
                for &credited in &credited_radii {
                    if (credited - other_r).abs() < cfg.delta_r_min {
                        new_layer = false;
                        break;
                    }
                }
                if new_layer {
                    credited_radii.push(other_r);
                    weight += cfg.compat_seed_weight;
                }
                if credited_radii.len() >= cfg.compat_seed_limit {
                    break;
                }
            }

            out.push(Seed {
                bottom: bottom.external(),
                middle: middle.external(),
                top: top.external(),
                z_origin,
                weight,
            });
        }
    }

    fn filter_1sp_fixed<'a>(
        &self,
        candidates: &mut Vec<Seed<'a, P>>,
        out: &mut Vec<Seed<'a, P>>,
    ) {
        // Stable descending sort keeps equal-weight candidates in insertion
        // order, which keeps the whole pass deterministic.
        candidates.sort_by(|s1, s2| {
            s2.weight
                .partial_cmp(&s1.weight)
                .unwrap_or(Ordering::Equal)
        });
        let keep = candidates.len().min(self.config.max_seeds_per_sp_m);
        out.extend(candidates.drain(..).take(keep));
    }
}
