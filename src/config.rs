//! Configuration surface for the seed finder.
//!
//! All cuts are plain scalars in the MeV / mm / kT convention:
//! momenta in MeV, lengths in mm, the longitudinal field in kilotesla, so
//! that `pT per helix radius = 300 * B`. Validation happens once, at
//! [`SeedFinder::new`](crate::SeedFinder::new); the kernel itself has no
//! recoverable error paths.
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use thiserror::Error;

/// Cuts and region of interest for triplet seed finding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedFinderConfig {
    /// Lower transverse-momentum bound (MeV). Drives the helix-radius floor
    /// and the multiple-scattering bound.
    pub min_pt: f32,
    /// Maximum |cot theta| for any doublet. 7.40627 corresponds to
    /// a pseudorapidity of 2.7.
    pub cot_theta_max: f32,
    /// Minimum radial separation between a middle point and a partner (mm).
    pub delta_r_min: f32,
    /// Maximum radial separation between a middle point and a partner (mm).
    pub delta_r_max: f32,
    /// Maximum transverse impact parameter of the fitted helix (mm).
    pub impact_max: f32,
    /// Multiplier on the scattering bound, in standard deviations.
    pub sigma_scattering: f32,
    /// Lower z bound for the extrapolated doublet origin (mm).
    pub collision_region_min: f32,
    /// Upper z bound for the extrapolated doublet origin (mm).
    pub collision_region_max: f32,
    /// Azimuthal region of interest (radians).
    pub phi_min: f32,
    pub phi_max: f32,
    /// Longitudinal region of interest (mm).
    pub z_min: f32,
    pub z_max: f32,
    /// Maximum transverse radius of interest (mm).
    pub r_max: f32,
    /// Longitudinal magnetic field (kT).
    pub b_field_in_z: f32,
    /// Transverse beam position; subtracted before radii are derived (mm).
    pub beam_pos: Vector2<f32>,
    /// Material budget traversed by a seed, in radiation lengths
    /// (dimensionless x/X0, fed to the Highland formula).
    pub rad_length_per_seed: f32,
    /// Alignment uncertainties forwarded to the covariance tool (mm).
    pub z_align: f32,
    pub r_align: f32,
    /// Error multiplier forwarded to the covariance tool.
    pub sigma_error: f32,
}

impl Default for SeedFinderConfig {
    fn default() -> Self {
        Self {
            min_pt: 400.0,
            cot_theta_max: 7.40627,
            delta_r_min: 5.0,
            delta_r_max: 270.0,
            impact_max: 20.0,
            sigma_scattering: 5.0,
            collision_region_min: -150.0,
            collision_region_max: 150.0,
            phi_min: -PI,
            phi_max: PI,
            z_min: -2800.0,
            z_max: 2800.0,
            r_max: 600.0,
            b_field_in_z: 0.00208,
            beam_pos: Vector2::new(0.0, 0.0),
            rad_length_per_seed: 0.05,
            z_align: 0.0,
            r_align: 0.0,
            sigma_error: 5.0,
        }
    }
}

impl SeedFinderConfig {
    /// Radius of the tightest helix still above `min_pt`, in mm.
    pub(crate) fn min_helix_radius(&self) -> f32 {
        self.min_pt / (300.0 * self.b_field_in_z)
    }

    /// Checks mutual consistency of all bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pt <= 0.0 {
            return Err(ConfigError::NonPositiveMinPt(self.min_pt));
        }
        if self.b_field_in_z <= 0.0 {
            return Err(ConfigError::NonPositiveField(self.b_field_in_z));
        }
        if self.r_max <= 0.0 {
            return Err(ConfigError::NonPositiveRMax(self.r_max));
        }
        if self.cot_theta_max <= 0.0 {
            return Err(ConfigError::NonPositiveCotThetaMax(self.cot_theta_max));
        }
        if self.delta_r_min <= 0.0 || self.delta_r_min > self.delta_r_max {
            return Err(ConfigError::InvalidDeltaR {
                min: self.delta_r_min,
                max: self.delta_r_max,
            });
        }
        if self.phi_min >= self.phi_max {
            return Err(ConfigError::EmptyPhiRange {
                min: self.phi_min,
                max: self.phi_max,
            });
        }
        if self.z_min >= self.z_max {
            return Err(ConfigError::EmptyZRange {
                min: self.z_min,
                max: self.z_max,
            });
        }
        if self.collision_region_min > self.collision_region_max {
            return Err(ConfigError::InvalidCollisionRegion {
                min: self.collision_region_min,
                max: self.collision_region_max,
            });
        }
        if self.sigma_scattering < 0.0 {
            return Err(ConfigError::NegativeSigmaScattering(self.sigma_scattering));
        }
        if self.rad_length_per_seed <= 0.0 {
            return Err(ConfigError::NonPositiveRadLength(self.rad_length_per_seed));
        }
        // The phi-axis sizing intersects the minimum-pT helix with the
        // outermost radius; past the helix diameter there is no intersection.
        let helix_diameter = 2.0 * self.min_helix_radius();
        if self.r_max > helix_diameter {
            return Err(ConfigError::RMaxBeyondHelixDiameter {
                r_max: self.r_max,
                helix_diameter,
            });
        }
        Ok(())
    }
}

/// Constants derived once per finder from the configuration.
///
/// `highland` is the rms multiple-scattering angle for a `min_pt` track over
/// `rad_length_per_seed` radiation lengths: `13.6 MeV * sqrt(x/X0) *
/// (1 + 0.038 ln(x/X0))`, divided by momentum at use sites.
#[derive(Clone, Copy, Debug)]
pub struct DerivedCuts {
    pub highland: f32,
    pub max_scattering_angle2: f32,
    pub pt_per_helix_radius: f32,
    pub min_helix_diameter2: f32,
    pub pt2_per_radius: f32,
}

impl DerivedCuts {
    pub fn new(config: &SeedFinderConfig) -> Self {
        let highland = 13.6
            * config.rad_length_per_seed.sqrt()
            * (1.0 + 0.038 * config.rad_length_per_seed.ln());
        let max_scattering_angle = highland / config.min_pt;
        let pt_per_helix_radius = 300.0 * config.b_field_in_z;
        let min_helix_diameter = config.min_pt * 2.0 / pt_per_helix_radius;
        let pt_per_radius = highland / pt_per_helix_radius;
        Self {
            highland,
            max_scattering_angle2: max_scattering_angle * max_scattering_angle,
            pt_per_helix_radius,
            min_helix_diameter2: min_helix_diameter * min_helix_diameter,
            pt2_per_radius: pt_per_radius * pt_per_radius,
        }
    }
}

/// Inconsistent configuration, rejected at finder construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("min_pt must be positive, got {0} MeV")]
    NonPositiveMinPt(f32),

    #[error("b_field_in_z must be positive, got {0} kT")]
    NonPositiveField(f32),

    #[error("r_max must be positive, got {0} mm")]
    NonPositiveRMax(f32),

    #[error("cot_theta_max must be positive, got {0}")]
    NonPositiveCotThetaMax(f32),

    #[error("delta_r bounds must satisfy 0 < min <= max, got [{min}, {max}] mm")]
    InvalidDeltaR { min: f32, max: f32 },

    #[error("empty phi range [{min}, {max}]")]
    EmptyPhiRange { min: f32, max: f32 },

    #[error("empty z range [{min}, {max}] mm")]
    EmptyZRange { min: f32, max: f32 },

    #[error("collision region bounds inverted: [{min}, {max}] mm")]
    InvalidCollisionRegion { min: f32, max: f32 },

    #[error("sigma_scattering must not be negative, got {0}")]
    NegativeSigmaScattering(f32),

    #[error("rad_length_per_seed must be positive, got {0}")]
    NonPositiveRadLength(f32),

    #[error(
        "r_max {r_max} mm exceeds the minimum-pT helix diameter {helix_diameter} mm; \
         the phi binning would be undefined"
    )]
    RMaxBeyondHelixDiameter { r_max: f32, helix_diameter: f32 },
}
