//! Doublet compatibility scan over candidate partner cells.
//!
//! Both scans walk each cell in stored (near-ascending radius) order and use
//! the asymmetry between `continue` and `break` to stop as soon as the rest
//! of a cell can no longer pass the radial window. The index's millimetre
//! bucketing keeps any radius inversion below `delta_r_min`, so the break
//! never discards a valid partner.
use crate::config::SeedFinderConfig;
use crate::grid::{Cell, SpacePointIndex};
use crate::point::{InternalSpacePoint, SpacePoint};

/// Collects bottom partners for `middle` from `cells` into `out`.
///
/// Pure filter; clears `out` first.
pub(crate) fn compatible_bottoms<'i, 'a, P: SpacePoint>(
    middle: &InternalSpacePoint<'a, P>,
    index: &'i SpacePointIndex<'a, P>,
    cells: &[Cell],
    config: &SeedFinderConfig,
    out: &mut Vec<&'i InternalSpacePoint<'a, P>>,
) {
    out.clear();
    let r_m = middle.radius();
    let z_m = middle.z();
    for &cell in cells {
        for sp in index.at(cell) {
            let delta_r = r_m - sp.radius();
            // Partners sorted by ascending radius: deltas shrink as we walk.
            if delta_r > config.delta_r_max {
                continue;
            }
            if delta_r < config.delta_r_min {
                break;
            }
            let cot_theta = (z_m - sp.z()) / delta_r;
            if cot_theta.abs() > config.cot_theta_max {
                continue;
            }
            let z_origin = z_m - r_m * cot_theta;
            if z_origin < config.collision_region_min || z_origin > config.collision_region_max {
                continue;
            }
            out.push(sp);
        }
    }
}

/// Collects top partners for `middle`; mirrored radial window, deltas grow
/// as the scan walks outward.
pub(crate) fn compatible_tops<'i, 'a, P: SpacePoint>(
    middle: &InternalSpacePoint<'a, P>,
    index: &'i SpacePointIndex<'a, P>,
    cells: &[Cell],
    config: &SeedFinderConfig,
    out: &mut Vec<&'i InternalSpacePoint<'a, P>>,
) {
    out.clear();
    let r_m = middle.radius();
    let z_m = middle.z();
    for &cell in cells {
        for sp in index.at(cell) {
            let delta_r = sp.radius() - r_m;
            if delta_r < config.delta_r_min {
                continue;
            }
            if delta_r > config.delta_r_max {
                break;
            }
            let cot_theta = (sp.z() - z_m) / delta_r;
            if cot_theta.abs() > config.cot_theta_max {
                continue;
            }
            let z_origin = z_m - r_m * cot_theta;
            if z_origin < config.collision_region_min || z_origin > config.collision_region_max {
                continue;
            }
            out.push(sp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    struct Hit {
        x: f32,
        y: f32,
        z: f32,
    }

    impl SpacePoint for Hit {
        fn x(&self) -> f32 {
            self.x
        }
        fn y(&self) -> f32 {
            self.y
        }
        fn z(&self) -> f32 {
            self.z
        }
    }

    fn hits_on_axis(radii_z: &[(f32, f32)]) -> Vec<Hit> {
        radii_z
            .iter()
            .map(|&(r, z)| Hit { x: r, y: 0.0, z })
            .collect()
    }

    fn zero_cov(_: &Hit, _: f32, _: f32, _: f32) -> Vector2<f32> {
        Vector2::zeros()
    }

    fn scan_setup<'a>(
        hits: &'a [Hit],
        config: &SeedFinderConfig,
    ) -> (SpacePointIndex<'a, Hit>, Cell) {
        let index = SpacePointIndex::build(hits, zero_cov, config);
        let cell = index.layout().cell_of(0.0, 0.0);
        (index, cell)
    }

    #[test]
    fn radial_window_and_origin_cuts_select_bottoms() {
        let config = SeedFinderConfig::default();
        let hits = hits_on_axis(&[
            (20.0, 0.0),  // delta_r 180 and in-window
            (150.0, 0.0), // delta_r 50, compatible
            (197.0, 0.0), // delta_r 3 < delta_r_min
            (200.0, 0.0), // middle
        ]);
        let (index, cell) = scan_setup(&hits, &config);
        let middle = index
            .at(cell)
            .iter()
            .find(|sp| (sp.radius() - 200.0).abs() < 0.5)
            .unwrap();

        let mut out = Vec::new();
        compatible_bottoms(middle, &index, &[cell], &config, &mut out);
        let radii: Vec<f32> = out.iter().map(|sp| sp.radius()).collect();
        assert_eq!(radii.len(), 2);
        assert!(radii.contains(&20.0) && radii.contains(&150.0));
    }

    #[test]
    fn bottom_scan_breaks_once_partners_get_too_close() {
        let config = SeedFinderConfig::default();
        // The 197 mm point sits inside delta_r_min of the middle; everything
        // stored after it (the middle itself) must not be inspected, and the
        // earlier compatible point must already be collected.
        let hits = hits_on_axis(&[(100.0, 0.0), (197.0, 0.0), (200.0, 0.0)]);
        let (index, cell) = scan_setup(&hits, &config);
        let middle = index
            .at(cell)
            .iter()
            .find(|sp| (sp.radius() - 200.0).abs() < 0.5)
            .unwrap();

        let mut out = Vec::new();
        compatible_bottoms(middle, &index, &[cell], &config, &mut out);
        assert_eq!(out.len(), 1);
        assert!((out[0].radius() - 100.0).abs() < 0.5);
    }

    #[test]
    fn steep_and_displaced_doublets_are_rejected() {
        let config = SeedFinderConfig::default();
        let hits = hits_on_axis(&[
            (100.0, 0.0),   // middle
            (150.0, 400.0), // cot_theta 8 > cot_theta_max
            (180.0, 16.0),  // cot_theta 0.2, z_origin -20, compatible
            (250.0, 60.0),  // cot_theta 0.4, z_origin -40, compatible
        ]);
        let (index, cell) = scan_setup(&hits, &config);
        let middle = index
            .at(cell)
            .iter()
            .find(|sp| (sp.radius() - 100.0).abs() < 0.5)
            .unwrap();

        let mut out = Vec::new();
        compatible_tops(middle, &index, &[cell], &config, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn out_of_collision_region_origin_is_rejected() {
        let config = SeedFinderConfig::default();
        // Extrapolates to z ~ 195, outside +-150.
        let hits = hits_on_axis(&[(30.0, 200.0), (80.0, 205.0)]);
        let (index, cell) = scan_setup(&hits, &config);
        let middle = index
            .at(cell)
            .iter()
            .find(|sp| (sp.radius() - 80.0).abs() < 0.5)
            .unwrap();

        let mut out = Vec::new();
        compatible_bottoms(middle, &index, &[cell], &config, &mut out);
        assert!(out.is_empty());
    }
}
