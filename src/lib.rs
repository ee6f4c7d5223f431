#![doc = include_str!("../README.md")]

// Public modules (stable surface)
pub mod config;
pub mod filter;
pub mod finder;
pub mod grid;
pub mod point;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Main entry points: finder + configuration + results.
pub use crate::config::{ConfigError, DerivedCuts, SeedFinderConfig};
pub use crate::finder::{FinderWorkspace, LinCircle, SeedFinder};
pub use crate::types::{Seed, SeedingSummary};

// Injected strategies and their shipped implementations.
pub use crate::filter::{DefaultSeedFilter, SeedFilter, SeedFilterConfig};
pub use crate::grid::{
    BinFinder, Cell, GridLayout, PhiNeighborBinFinder, SameCellBinFinder, SpacePointIndex,
};
pub use crate::point::{InternalSpacePoint, SpacePoint};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::filter::{DefaultSeedFilter, SeedFilter, SeedFilterConfig};
    pub use crate::grid::{BinFinder, PhiNeighborBinFinder, SameCellBinFinder};
    pub use crate::point::SpacePoint;
    pub use crate::{Seed, SeedFinder, SeedFinderConfig};
}
