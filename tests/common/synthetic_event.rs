//! Deterministic synthetic events shared by the integration tests.
#![allow(dead_code)]

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::Rng;
use seedfinder::{SeedFinderConfig, SpacePoint};
use std::f32::consts::PI;

/// Spacepoint with a stable identifier so seeds can be compared across runs
/// and translations.
#[derive(Clone, Debug)]
pub struct TestPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub id: usize,
}

impl TestPoint {
    pub fn at(x: f32, y: f32, z: f32, id: usize) -> Self {
        Self { x, y, z, id }
    }
}

impl SpacePoint for TestPoint {
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

pub fn zero_cov(_: &TestPoint, _: f32, _: f32, _: f32) -> Vector2<f32> {
    Vector2::zeros()
}

/// The cut values used by the end-to-end scenarios.
pub fn reference_config() -> SeedFinderConfig {
    SeedFinderConfig {
        min_pt: 400.0,
        b_field_in_z: 0.002,
        delta_r_min: 5.0,
        delta_r_max: 270.0,
        cot_theta_max: 7.40627,
        impact_max: 10.0,
        sigma_scattering: 5.0,
        collision_region_min: -150.0,
        collision_region_max: 150.0,
        rad_length_per_seed: 0.1,
        ..Default::default()
    }
}

pub const LAYER_RADII: [f32; 5] = [32.0, 72.0, 116.0, 172.0, 260.0];

/// Point on the circle of centre `(cx, cy)` through the origin, at abscissa
/// `x`, taking the intersection below the centre.
pub fn point_on_circle_through_origin(cx: f32, cy: f32, x: f32, z: f32, id: usize) -> TestPoint {
    let radius2 = cx * cx + cy * cy;
    let y = cy - (radius2 - (x - cx) * (x - cx)).sqrt();
    TestPoint::at(x, y, z, id)
}

/// Parameters of one generated helical track.
#[derive(Clone, Copy, Debug)]
pub struct TrackParams {
    pub pt_mev: f32,
    pub phi0: f32,
    pub charge: f32,
    pub z0: f32,
    pub cot_theta: f32,
}

pub fn random_track(rng: &mut StdRng) -> TrackParams {
    TrackParams {
        pt_mev: rng.gen_range(600.0f32..4000.0),
        phi0: rng.gen_range(-PI..PI),
        charge: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        z0: rng.gen_range(-100.0f32..100.0),
        cot_theta: rng.gen_range(-1.5f32..1.5),
    }
}

/// Hits of one helical track from the origin, one per detector layer.
///
/// The track starts at `(0, 0, z0)` heading `phi0`; the chord geometry of a
/// circle through the origin gives the azimuth at each layer radius.
pub fn helix_points(
    params: TrackParams,
    b_field_kt: f32,
    next_id: &mut usize,
    out: &mut Vec<TestPoint>,
) {
    let helix_radius = params.pt_mev / (300.0 * b_field_kt);
    let center_angle = params.phi0 + params.charge * PI / 2.0;
    let cx = helix_radius * center_angle.cos();
    let cy = helix_radius * center_angle.sin();

    for &layer_r in &LAYER_RADII {
        if layer_r >= 2.0 * helix_radius {
            break;
        }
        let alpha = 2.0 * (layer_r / (2.0 * helix_radius)).asin();
        let rot = -params.charge * alpha;
        let (sin_rot, cos_rot) = rot.sin_cos();
        let dx = -cx;
        let dy = -cy;
        out.push(TestPoint::at(
            cx + dx * cos_rot - dy * sin_rot,
            cy + dx * sin_rot + dy * cos_rot,
            params.z0 + params.cot_theta * layer_r,
            *next_id,
        ));
        *next_id += 1;
    }
}

/// Uniform random spacepoints over a cylinder around the beam axis.
pub fn noise_points(
    rng: &mut StdRng,
    count: usize,
    next_id: &mut usize,
    out: &mut Vec<TestPoint>,
) {
    for _ in 0..count {
        let r = rng.gen_range(20.0f32..200.0);
        let phi = rng.gen_range(-PI..PI);
        out.push(TestPoint::at(
            r * phi.cos(),
            r * phi.sin(),
            rng.gen_range(-200.0f32..200.0),
            *next_id,
        ));
        *next_id += 1;
    }
}

/// Signed curvature (inverse helix diameter) of a triplet, evaluated with
/// the same conformal construction the finder uses.
pub fn triplet_curvature(b: &TestPoint, m: &TestPoint, t: &TestPoint) -> f32 {
    let (u_b, v_b) = conformal(b, m);
    let (u_t, v_t) = conformal(t, m);
    let a = (v_t - v_b) / (u_t - u_b);
    let b_coef = v_b - a * u_b;
    b_coef / (1.0 + a * a).sqrt()
}

/// Transverse impact parameter of a triplet from the same construction.
pub fn triplet_impact(b: &TestPoint, m: &TestPoint, t: &TestPoint) -> f32 {
    let (u_b, v_b) = conformal(b, m);
    let (u_t, v_t) = conformal(t, m);
    let a = (v_t - v_b) / (u_t - u_b);
    let b_coef = v_b - a * u_b;
    let r_m = (m.x * m.x + m.y * m.y).sqrt();
    ((a - b_coef * r_m) * r_m).abs()
}

fn conformal(p: &TestPoint, m: &TestPoint) -> (f32, f32) {
    let r_m = (m.x * m.x + m.y * m.y).sqrt();
    let cos_phi = m.x / r_m;
    let sin_phi = m.y / r_m;
    let dx = p.x - m.x;
    let dy = p.y - m.y;
    let x = dx * cos_phi + dy * sin_phi;
    let y = dy * cos_phi - dx * sin_phi;
    let i_delta_r2 = 1.0 / (dx * dx + dy * dy);
    (x * i_delta_r2, y * i_delta_r2)
}
