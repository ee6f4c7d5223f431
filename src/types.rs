//! Result types shared across the seeding pipeline.
use serde::Serialize;

/// An ordered (bottom, middle, top) triplet consistent with one helix
/// hypothesis, as handed back to the caller.
///
/// The references point at the caller's own spacepoints. `z_origin` is the
/// z-axis intercept of the bottom-middle doublet; `weight` is the quality
/// score assigned by the seed filter (higher is better).
pub struct Seed<'a, P> {
    pub bottom: &'a P,
    pub middle: &'a P,
    pub top: &'a P,
    pub z_origin: f32,
    pub weight: f32,
}

impl<'a, P> Clone for Seed<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P> Copy for Seed<'a, P> {}

/// Counters and timing for one full seeding pass over an event.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SeedingSummary {
    /// Spacepoints offered to the index builder.
    pub points_seen: usize,
    /// Spacepoints that survived the region-of-interest cuts and were binned.
    pub points_binned: usize,
    /// Grid dimensions as (phi bins, z bins).
    pub grid_bins: (usize, usize),
    /// Total seeds across all cell slots.
    pub seeds: usize,
    pub latency_ms: f64,
}
