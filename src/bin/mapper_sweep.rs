//! Mapper Sweep: Landmark/Observer Complexes on a Synthetic Roster
//!
//! This binary walks the full pipeline on a seeded, clustered stand-in
//! for one week of receiver statistics.
//!
//! ## Protocol
//!
//! 1. Draw five performance tiers as Gaussian blobs in statistic space
//! 2. Standardize the statistic columns
//! 3. Fit the cover and the centroid × player visibility matrix
//! 4. Report both complexes at a few thresholds
//! 5. Run the parallel sweep and summarize the filtrations
//!
//! Usage: `mapper_sweep [seed] [config.json]`

use std::env;
use std::fs;
use std::process::ExitCode;

use clutch_mapper::{
    standardize,
    synthetic::gaussian_blobs,
    CancellationToken,
    ClutchMapper,
    MapperConfig,
    MapperResult,
    Orientation,
};
use ndarray::array;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mapper_sweep failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> MapperResult<()> {
    let args: Vec<String> = env::args().collect();
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2018);
    let config = match args.get(2) {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                clutch_mapper::MapperError::invalid_config(format!("cannot read {path}: {e}"))
            })?;
            MapperConfig::from_json(&text)?
        }
        None => MapperConfig::default(),
    };

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Clutch Mapper: Landmark/Observer Witness Complexes");
    println!("═══════════════════════════════════════════════════════════════\n");

    // Tier centers: receptions, yards, touchdowns, targets
    let tiers = array![
        [2.0, 20.0, 0.0, 4.0],
        [4.0, 45.0, 0.2, 6.0],
        [6.0, 70.0, 0.5, 8.0],
        [8.0, 100.0, 0.8, 11.0],
        [10.0, 140.0, 1.5, 13.0]
    ];
    let per_tier = 8;

    println!("Roster Parameters:");
    println!("  Tiers = {}", tiers.nrows());
    println!("  Players per tier = {}", per_tier);
    println!("  Seed = {}", seed);
    println!();

    let (stats, labels) = gaussian_blobs(tiers.view(), per_tier, 1.5, seed)?;
    let scaled = standardize(stats.view())?;

    let mapper = ClutchMapper::fit(scaled.view(), &labels, config)?;

    println!("Cover:");
    for (i, set) in mapper.cover().sets().iter().enumerate() {
        println!(
            "  Landmark {}: tier {}, {} players, radius = {:.3}",
            i,
            set.label,
            set.members.len(),
            set.radius
        );
    }
    println!(
        "  Max landmark-observer distance = {:.3}\n",
        mapper.visibility().max_distance()
    );

    let max_d = mapper.visibility().max_distance();
    for fraction in [0.1, 0.25, 0.5] {
        let t = max_d * fraction;
        let complexes = mapper.complexes_at(t)?;
        for orientation in Orientation::BOTH {
            let complex = complexes.get(orientation);
            println!(
                "  t = {:6.3} {:>8}: counts = {:?}, components = {}, χ = {}",
                t,
                orientation,
                complex.dimension_counts(),
                complex.component_count(),
                complex.euler_characteristic()
            );
        }
    }

    println!("\n══════════════════════════════════════════════════════════════");
    println!("  Threshold Sweep");
    println!("══════════════════════════════════════════════════════════════\n");

    let token = CancellationToken::new();
    let filtration = mapper.sweep(&token)?;

    println!("  Thresholds evaluated = {}", filtration.thresholds.len());
    for orientation in Orientation::BOTH {
        let f = filtration.get(orientation);
        println!(
            "  {:>8} filtration: {} simplices, last birth = {:.3}, monotone = {}",
            orientation,
            f.len(),
            f.max_birth().unwrap_or(0.0),
            f.is_monotone()
        );
    }

    let mid = mapper.complex_at(max_d * 0.25, Orientation::LandmarkIndexed)?;
    let json = serde_json::to_string(&mid)?;
    println!("\nLandmark complex at t = {:.3}:\n{}", mid.threshold, json);

    Ok(())
}
