//! External spacepoint capability and its beam-frame adapter.
//!
//! The finder never owns a caller's measurement. It consumes it through the
//! [`SpacePoint`] accessor trait and wraps it once, at indexing time, into an
//! [`InternalSpacePoint`] that precomputes everything the hot loops read:
//! beam-frame coordinates, radius, azimuth and the two covariance
//! contributions supplied by the caller's covariance tool.
use nalgebra::Vector2;

/// Accessor capability for an externally-owned spacepoint.
///
/// Coordinates are cartesian millimetres in the laboratory frame.
pub trait SpacePoint {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn z(&self) -> f32;
}

/// A spacepoint translated into the beam frame, with derived quantities.
///
/// Immutable after construction. `radius() >= 0` and `phi()` lies in
/// `[-pi, pi]` by construction. The external point is only borrowed; seeds
/// handed back to the caller reference it directly.
pub struct InternalSpacePoint<'a, P> {
    x: f32,
    y: f32,
    z: f32,
    r: f32,
    phi: f32,
    covr: f32,
    covz: f32,
    sp: &'a P,
}

impl<'a, P: SpacePoint> InternalSpacePoint<'a, P> {
    /// Wraps `sp`, subtracting the beam offset before deriving r and phi.
    ///
    /// `cov` is the `(covr, covz)` contribution produced by the caller's
    /// covariance tool for this point.
    pub fn new(sp: &'a P, beam_pos: Vector2<f32>, cov: Vector2<f32>) -> Self {
        let x = sp.x() - beam_pos.x;
        let y = sp.y() - beam_pos.y;
        Self {
            x,
            y,
            z: sp.z(),
            r: (x * x + y * y).sqrt(),
            phi: y.atan2(x),
            covr: cov.x,
            covz: cov.y,
            sp,
        }
    }
}

impl<'a, P> InternalSpacePoint<'a, P> {
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    /// Transverse distance from the beam axis.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.r
    }

    /// Azimuth in the beam frame.
    #[inline]
    pub fn phi(&self) -> f32 {
        self.phi
    }

    #[inline]
    pub fn covr(&self) -> f32 {
        self.covr
    }

    #[inline]
    pub fn covz(&self) -> f32 {
        self.covz
    }

    /// The externally-owned measurement this point was derived from.
    #[inline]
    pub fn external(&self) -> &'a P {
        self.sp
    }
}
