//! Triplet construction around each middle spacepoint.
//!
//! Overview
//! - [`doublets`] scans the neighbourhood cells for bottom and top partners
//!   passing the radial window, slope and collision-region cuts, breaking
//!   early on the radius-sorted cells.
//! - [`transform`] maps each surviving partner into conformal (U, V)
//!   coordinates anchored at the middle point, so that helix radius and
//!   impact parameter reduce to affine arithmetic.
//! - [`pipeline`] pairs every compatible bottom with every compatible top,
//!   applies the multiple-scattering, helix-radius and impact-parameter
//!   cuts, and hands accepted triplets to the seed filter.
//! - [`workspace`] holds the scratch buffers the loop reuses across middles.
//!
//! Key ideas
//! - Everything on the hot path stays squared; square roots are confined to
//!   the error term of a candidate pair and the curvature of an accepted
//!   triplet.
//! - Cut order matters: the cheap radial window runs first, the scattering
//!   comparison before any division, the impact parameter last.

pub mod doublets;
pub mod pipeline;
pub mod transform;
pub mod workspace;

pub use pipeline::SeedFinder;
pub use transform::LinCircle;
pub use workspace::FinderWorkspace;
