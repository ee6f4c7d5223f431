//! Per-thread scratch reused across middle spacepoints.
//!
//! The triplet loop would otherwise allocate several vectors for every
//! middle point; keeping them here and clearing instead of reallocating
//! amortises the cost across a whole region. One workspace serves one
//! worker thread; the parallel driver creates one per rayon worker.
use super::transform::LinCircle;
use crate::point::InternalSpacePoint;
use crate::types::Seed;

/// Scratch buffers for [`SeedFinder::seeds_for_cell`](crate::SeedFinder::seeds_for_cell).
///
/// `'i` is the borrow of the event index, `'a` the lifetime of the caller's
/// spacepoints. All buffers are cleared, never shrunk, between middles.
pub struct FinderWorkspace<'i, 'a, P> {
    pub(crate) compat_bottoms: Vec<&'i InternalSpacePoint<'a, P>>,
    pub(crate) compat_tops: Vec<&'i InternalSpacePoint<'a, P>>,
    pub(crate) lin_bottoms: Vec<LinCircle>,
    pub(crate) lin_tops: Vec<LinCircle>,
    pub(crate) triplet_tops: Vec<&'i InternalSpacePoint<'a, P>>,
    pub(crate) curvatures: Vec<f32>,
    pub(crate) impact_parameters: Vec<f32>,
    pub(crate) candidates: Vec<Seed<'a, P>>,
}

impl<'i, 'a, P> FinderWorkspace<'i, 'a, P> {
    pub fn new() -> Self {
        Self {
            compat_bottoms: Vec::new(),
            compat_tops: Vec::new(),
            lin_bottoms: Vec::new(),
            lin_tops: Vec::new(),
            triplet_tops: Vec::new(),
            curvatures: Vec::new(),
            impact_parameters: Vec::new(),
            candidates: Vec::new(),
        }
    }
}

impl<'i, 'a, P> Default for FinderWorkspace<'i, 'a, P> {
    fn default() -> Self {
        Self::new()
    }
}
