//! Conformal mapping of doublets around a middle spacepoint.
use crate::point::{InternalSpacePoint, SpacePoint};

/// Helix-linearisation record for one (middle, partner) doublet.
///
/// `u`/`v` come from transforming the circle equation
/// `x^2 + y^2 - 2*x0*x - 2*y0*y = 0` into the linear form
/// `1 - 2*x0*u - 2*v0*v = 0`, so the triplet predicate can evaluate helix
/// radius and impact parameter with affine arithmetic only.
#[derive(Clone, Copy, Debug)]
pub struct LinCircle {
    pub cot_theta: f32,
    /// z-axis intercept of the doublet extrapolated to r = 0.
    pub z_origin: f32,
    /// Reciprocal transverse distance between the pair.
    pub i_delta_r: f32,
    pub u: f32,
    pub v: f32,
    /// Propagated squared error term, without the middle-point correlation.
    pub er: f32,
}

/// Transforms every partner into conformal coordinates anchored at `middle`.
///
/// `bottom` flips the sign of `cot_theta` so that bottom-middle and
/// middle-top doublets of one track agree on it. Clears and refills `out`.
pub(crate) fn transform_coordinates<'i, 'a, P: SpacePoint>(
    partners: &[&'i InternalSpacePoint<'a, P>],
    middle: &InternalSpacePoint<'a, P>,
    bottom: bool,
    out: &mut Vec<LinCircle>,
) {
    out.clear();
    let x_m = middle.x();
    let y_m = middle.y();
    let z_m = middle.z();
    let r_m = middle.radius();
    let cov_r_m = middle.covr();
    let cov_z_m = middle.covz();
    let cos_phi_m = x_m / r_m;
    let sin_phi_m = y_m / r_m;
    let sign = if bottom { -1.0f32 } else { 1.0f32 };

    for sp in partners {
        let delta_x = sp.x() - x_m;
        let delta_y = sp.y() - y_m;
        let delta_z = sp.z() - z_m;
        // Projection of middle->partner onto the radial direction of the
        // middle point, and onto its orthogonal.
        let x = delta_x * cos_phi_m + delta_y * sin_phi_m;
        let y = delta_y * cos_phi_m - delta_x * sin_phi_m;
        let i_delta_r2 = 1.0 / (delta_x * delta_x + delta_y * delta_y);
        let i_delta_r = i_delta_r2.sqrt();
        let cot_theta = delta_z * i_delta_r * sign;
        out.push(LinCircle {
            cot_theta,
            z_origin: z_m - r_m * cot_theta,
            i_delta_r,
            u: x * i_delta_r2,
            v: y * i_delta_r2,
            er: ((cov_z_m + sp.covz()) + cot_theta * cot_theta * (cov_r_m + sp.covr()))
                * i_delta_r2,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    struct Hit(f32, f32, f32);

    impl SpacePoint for Hit {
        fn x(&self) -> f32 {
            self.0
        }
        fn y(&self) -> f32 {
            self.1
        }
        fn z(&self) -> f32 {
            self.2
        }
    }

    fn internal(hit: &Hit) -> InternalSpacePoint<'_, Hit> {
        InternalSpacePoint::new(hit, Vector2::zeros(), Vector2::zeros())
    }

    /// Any point on a circle through the origin with centre (x0, y0) must
    /// satisfy the linearised equation in the transformed frame.
    #[test]
    fn conformal_coordinates_linearise_the_circle() {
        let (x0, y0) = (40.0f32, 999.19968f32);
        let radius = (x0 * x0 + y0 * y0).sqrt();
        let point_at = |x: f32| -> Hit {
            let y = y0 - (radius * radius - (x - x0) * (x - x0)).sqrt();
            Hit(x, y, 0.0)
        };

        let m_hit = point_at(80.0);
        let t_hit = point_at(190.0);
        let b_hit = point_at(35.0);
        let middle = internal(&m_hit);
        let top = internal(&t_hit);
        let bottom = internal(&b_hit);

        let mut lin = Vec::new();
        transform_coordinates(&[&top], &middle, false, &mut lin);
        let lt = lin[0];
        // The circle centre rotates with the middle point's azimuth.
        let r_m = middle.radius();
        let cos_phi = middle.x() / r_m;
        let sin_phi = middle.y() / r_m;
        let x0_rot = x0 * cos_phi + y0 * sin_phi - r_m;
        let y0_rot = y0 * cos_phi - x0 * sin_phi;
        let residual = 1.0 - 2.0 * x0_rot * lt.u - 2.0 * y0_rot * lt.v;
        assert!(residual.abs() < 1e-3, "residual {residual}");

        transform_coordinates(&[&bottom], &middle, true, &mut lin);
        let lb = lin[0];
        // Flat in z, so both doublets share cot_theta = 0 and z_origin = 0.
        assert!(lb.cot_theta.abs() < 1e-6 && lt.cot_theta.abs() < 1e-6);
        assert!(lb.z_origin.abs() < 1e-4 && lt.z_origin.abs() < 1e-4);
    }

    #[test]
    fn bottom_partner_flips_the_slope_sign() {
        let m_hit = Hit(80.0, 0.0, 10.0);
        let b_hit = Hit(30.0, 0.0, 0.0);
        let t_hit = Hit(130.0, 0.0, 20.0);
        let middle = internal(&m_hit);
        let bottom = internal(&b_hit);
        let top = internal(&t_hit);

        let mut lin_b = Vec::new();
        let mut lin_t = Vec::new();
        transform_coordinates(&[&bottom], &middle, true, &mut lin_b);
        transform_coordinates(&[&top], &middle, false, &mut lin_t);
        // Same track slope seen from both sides: dz/dr = 0.2 on both legs.
        assert!((lin_b[0].cot_theta - 0.2).abs() < 1e-5);
        assert!((lin_t[0].cot_theta - 0.2).abs() < 1e-5);
        assert!((lin_b[0].z_origin - (10.0 - 80.0 * 0.2)).abs() < 1e-4);
    }

    #[test]
    fn error_term_combines_both_covariances() {
        let m_hit = Hit(50.0, 0.0, 0.0);
        let p_hit = Hit(100.0, 0.0, 50.0);
        let middle = InternalSpacePoint::new(&m_hit, Vector2::zeros(), Vector2::new(0.5, 0.25));
        let partner = InternalSpacePoint::new(&p_hit, Vector2::zeros(), Vector2::new(0.5, 0.25));

        let mut lin = Vec::new();
        transform_coordinates(&[&partner], &middle, false, &mut lin);
        let l = lin[0];
        let i_delta_r2 = 1.0 / (50.0f32 * 50.0);
        let expected = ((0.25 + 0.25) + l.cot_theta * l.cot_theta * (0.5 + 0.5)) * i_delta_r2;
        assert!((l.er - expected).abs() < 1e-7);
    }
}
