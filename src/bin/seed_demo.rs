//! Runs the seed finder on a synthetic event and prints a report.
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seedfinder::prelude::*;
use seedfinder::SeedingSummary;
use serde::Serialize;
use std::env;
use std::f32::consts::PI;
use std::fs;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

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

const LAYER_RADII: [f32; 5] = [32.0, 72.0, 116.0, 172.0, 260.0];

/// Hits of one helical track from the origin region, one per layer.
fn helix_hits(rng: &mut StdRng, b_field_kt: f32, out: &mut Vec<Hit>) {
    let pt_mev = rng.gen_range(600.0f32..4000.0);
    let phi0 = rng.gen_range(-PI..PI);
    let charge: f32 = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let z0 = rng.gen_range(-100.0f32..100.0);
    let cot_theta = rng.gen_range(-1.5f32..1.5);

    let helix_radius = pt_mev / (300.0 * b_field_kt);
    let center_angle = phi0 + charge * PI / 2.0;
    let cx = helix_radius * center_angle.cos();
    let cy = helix_radius * center_angle.sin();

    for &layer_r in &LAYER_RADII {
        if layer_r >= 2.0 * helix_radius {
            break;
        }
        // Chord geometry: a point at distance r from the origin sits at arc
        // angle 2*asin(r / 2R) around the centre.
        let alpha = 2.0 * (layer_r / (2.0 * helix_radius)).asin();
        let rot = -charge * alpha;
        let (sin_rot, cos_rot) = rot.sin_cos();
        let dx = -cx;
        let dy = -cy;
        out.push(Hit {
            x: cx + dx * cos_rot - dy * sin_rot,
            y: cy + dx * sin_rot + dy * cos_rot,
            z: z0 + cot_theta * layer_r,
        });
    }
}

fn noise_hits(rng: &mut StdRng, count: usize, out: &mut Vec<Hit>) {
    for _ in 0..count {
        let r = rng.gen_range(25.0f32..300.0);
        let phi = rng.gen_range(-PI..PI);
        out.push(Hit {
            x: r * phi.cos(),
            y: r * phi.sin(),
            z: rng.gen_range(-250.0f32..250.0),
        });
    }
}

#[derive(Serialize)]
struct SeedRecord {
    bottom: [f32; 3],
    middle: [f32; 3],
    top: [f32; 3],
    z_origin: f32,
    weight: f32,
}

#[derive(Serialize)]
struct DemoReport {
    tracks: usize,
    noise: usize,
    rng_seed: u64,
    summary: SeedingSummary,
    seeds: Vec<SeedRecord>,
}

fn run() -> Result<(), String> {
    let program = env::args().next().unwrap_or_else(|| "seed_demo".to_string());
    let cli = parse_args(&program)?;

    let config = SeedFinderConfig::default();
    let mut rng = StdRng::seed_from_u64(cli.rng_seed);
    let mut hits: Vec<Hit> = Vec::new();
    for _ in 0..cli.tracks {
        helix_hits(&mut rng, config.b_field_in_z, &mut hits);
    }
    noise_hits(&mut rng, cli.noise, &mut hits);

    let finder = SeedFinder::new(config, DefaultSeedFilter::new(SeedFilterConfig::default()))
        .map_err(|e| format!("Invalid configuration: {e}"))?;
    let index = finder.bin_space_points(&hits, |_sp, _za, _ra, _se| Vector2::zeros());
    let (per_cell, summary) = finder.create_seeds_with_summary(&index, &PhiNeighborBinFinder);

    let seeds: Vec<SeedRecord> = per_cell
        .iter()
        .flatten()
        .map(|seed| SeedRecord {
            bottom: [seed.bottom.x(), seed.bottom.y(), seed.bottom.z()],
            middle: [seed.middle.x(), seed.middle.y(), seed.middle.z()],
            top: [seed.top.x(), seed.top.y(), seed.top.z()],
            z_origin: seed.z_origin,
            weight: seed.weight,
        })
        .collect();

    if cli.format.includes_text() {
        print_text_summary(&cli, &summary, &seeds);
    }

    if cli.format.includes_json() {
        let report = DemoReport {
            tracks: cli.tracks,
            noise: cli.noise,
            rng_seed: cli.rng_seed,
            summary,
            seeds,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        if let Some(path) = &cli.json_out {
            fs::write(path, json)
                .map_err(|e| format!("Failed to write JSON report to {}: {e}", path.display()))?;
            println!("JSON report written to {}", path.display());
        } else {
            println!("{json}");
        }
    }

    Ok(())
}

fn print_text_summary(cli: &CliConfig, summary: &SeedingSummary, seeds: &[SeedRecord]) {
    println!("Seeding summary");
    println!("  tracks generated: {}", cli.tracks);
    println!("  noise points: {}", cli.noise);
    println!(
        "  points binned: {}/{}",
        summary.points_binned, summary.points_seen
    );
    println!(
        "  grid: {} phi bins x {} z bins",
        summary.grid_bins.0, summary.grid_bins.1
    );
    println!("  seeds: {}", summary.seeds);
    println!("  latency_ms: {:.3}", summary.latency_ms);
    for (i, seed) in seeds.iter().take(10).enumerate() {
        println!(
            "  #{i}: weight={:.1} z_origin={:.1} r=({:.1}, {:.1}, {:.1})",
            seed.weight,
            seed.z_origin,
            (seed.bottom[0] * seed.bottom[0] + seed.bottom[1] * seed.bottom[1]).sqrt(),
            (seed.middle[0] * seed.middle[0] + seed.middle[1] * seed.middle[1]).sqrt(),
            (seed.top[0] * seed.top[0] + seed.top[1] * seed.top[1]).sqrt(),
        );
    }
    if seeds.len() > 10 {
        println!("  ... {} more", seeds.len() - 10);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Both,
}

impl OutputFormat {
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "both" => Ok(Self::Both),
            other => Err(format!("Unknown format '{other}'. Use text|json|both.")),
        }
    }

    fn includes_text(&self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }

    fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

struct CliConfig {
    tracks: usize,
    noise: usize,
    rng_seed: u64,
    format: OutputFormat,
    json_out: Option<PathBuf>,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut tracks = 8usize;
    let mut noise = 200usize;
    let mut rng_seed = 42u64;
    let mut format = OutputFormat::Text;
    let mut json_out: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--tracks" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--tracks expects a count\n{}", usage(program)))?;
                tracks = value
                    .parse()
                    .map_err(|_| format!("Invalid track count '{value}'"))?;
            }
            "--noise" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--noise expects a count\n{}", usage(program)))?;
                noise = value
                    .parse()
                    .map_err(|_| format!("Invalid noise count '{value}'"))?;
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--seed expects a value\n{}", usage(program)))?;
                rng_seed = value
                    .parse()
                    .map_err(|_| format!("Invalid RNG seed '{value}'"))?;
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--format expects a value\n{}", usage(program)))?;
                format = OutputFormat::from_str(&value)?;
            }
            "--json-out" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--json-out expects a path\n{}", usage(program)))?;
                json_out = Some(PathBuf::from(value));
            }
            other => {
                return Err(format!("Unknown option '{other}'\n{}", usage(program)));
            }
        }
    }

    Ok(CliConfig {
        tracks,
        noise,
        rng_seed,
        format,
        json_out,
    })
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--tracks n] [--noise n] [--seed s] [--format text|json|both] \\\n         [--json-out report.json]\n\n\
Generates a synthetic event (helical tracks plus uniform noise), runs the\n\
triplet seed finder on it and reports the seeds found.\n\
Examples:\n  {program} --tracks 12 --noise 500 --format both\n  {program} --seed 7 --json-out event7.json\n"
    )
}
