//! CLI binary for Park Scan
//!
//! Runs recorded dash-camera sessions through the library and reports the
//! parking spot candidates found along each drive.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use glob::glob;
use park_scan::{
    assemble_frames, read_detections, read_frame_timestamps, read_gps_log, run_session,
    write_poses_csv, AxisOrder, SessionOptions, SessionReport, TrackIndex,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

struct SessionFiles {
    gps: String,
    frames: String,
    detections: String,
}

fn process_session(
    dir: &Path,
    files: &SessionFiles,
    options: SessionOptions,
) -> Result<SessionReport> {
    let gps_path = dir.join(&files.gps);
    let samples = read_gps_log(&gps_path)
        .with_context(|| format!("reading GPS log {}", gps_path.display()))?;
    let track = TrackIndex::new(samples)
        .with_context(|| format!("building track from {}", gps_path.display()))?;

    let frames_path = dir.join(&files.frames);
    let timestamps = read_frame_timestamps(&frames_path)
        .with_context(|| format!("reading frame timestamps {}", frames_path.display()))?;

    let detections_path = dir.join(&files.detections);
    let detections = read_detections(&detections_path)
        .with_context(|| format!("reading detections {}", detections_path.display()))?;

    let frames = assemble_frames(&timestamps, &detections);
    Ok(run_session(&track, &frames, options)?)
}

fn print_summary(report: &SessionReport) {
    println!("  Frames processed: {}", report.frames_processed);
    println!("  Frames outside GPS track: {}", report.skipped_frames);
    println!("  Object markers: {}", report.object_markers.len());
    println!("  Parking spots: {}", report.spots.len());
    for spot in &report.spots {
        println!(
            "    {:.7}, {:.7} (t={:.3}s)",
            spot.latitude, spot.longitude, spot.timestamp
        );
    }
}

fn main() -> Result<()> {
    let matches = Command::new("Park Scan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find free parking spots along a recorded drive from GPS, frame timestamps and car detections.")
        .arg(
            Arg::new("sessions")
                .help("Session directories to process (supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and per-frame details")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .help("Gap between consecutive parked cars that counts as a free spot, in metres")
                .value_name("METRES")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("legacy-haversine")
                .long("legacy-haversine")
                .help("Measure gaps with latitude and longitude swapped, as the first field recordings were evaluated")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("bearing-offset")
                .long("bearing-offset")
                .help("Direction of detections relative to the vehicle heading, degrees clockwise (default: 90)")
                .value_name("DEGREES")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON file with session options (requires the 'json' feature)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Print parking spots as CSV to stdout")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full session report as JSON to stdout (requires the 'json' feature)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gps-file")
                .long("gps-file")
                .help("GPS log file name inside each session directory")
                .value_name("NAME")
                .default_value("gps.txt"),
        )
        .arg(
            Arg::new("frames-file")
                .long("frames-file")
                .help("Frame timestamp file name inside each session directory")
                .value_name("NAME")
                .default_value("camera1.tfd"),
        )
        .arg(
            Arg::new("detections-file")
                .long("detections-file")
                .help("Detection table file name inside each session directory")
                .value_name("NAME")
                .default_value("detections.csv"),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    let default_directive = if debug { "park_scan=debug" } else { "park_scan=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut options = match matches.get_one::<String>("config") {
        #[cfg(feature = "json")]
        Some(path) => SessionOptions::load(Path::new(path))
            .with_context(|| format!("loading options from {path}"))?,
        #[cfg(not(feature = "json"))]
        Some(_) => anyhow::bail!("--config requires park_scan to be built with the 'json' feature"),
        None => SessionOptions::default(),
    };
    if let Some(&threshold) = matches.get_one::<f64>("threshold") {
        options.gap.threshold_m = threshold;
    }
    if matches.get_flag("legacy-haversine") {
        options.gap.axis_order = AxisOrder::Legacy;
    }
    if let Some(&degrees) = matches.get_one::<f64>("bearing-offset") {
        options.bearing_offset_rad = degrees.to_radians();
    }
    debug!(?options, "Session options");

    let print_csv = matches.get_flag("csv");
    let print_json = matches.get_flag("json");
    if print_json && !cfg!(feature = "json") {
        anyhow::bail!("--json requires park_scan to be built with the 'json' feature");
    }

    let files = SessionFiles {
        gps: matches
            .get_one::<String>("gps-file")
            .cloned()
            .unwrap_or_else(|| "gps.txt".to_string()),
        frames: matches
            .get_one::<String>("frames-file")
            .cloned()
            .unwrap_or_else(|| "camera1.tfd".to_string()),
        detections: matches
            .get_one::<String>("detections-file")
            .cloned()
            .unwrap_or_else(|| "detections.csv".to_string()),
    };

    let patterns: Vec<&String> = matches
        .get_many::<String>("sessions")
        .map(|values| values.collect())
        .unwrap_or_default();

    // Collect all session directories
    let mut session_dirs: Vec<PathBuf> = Vec::new();
    for pattern in &patterns {
        let paths: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        debug!("Glob pattern '{pattern}' matched {} paths", paths.len());
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![PathBuf::from(pattern)]
        };

        for path in paths {
            if !path.is_dir() {
                eprintln!("Warning: Not a session directory: {path:?}");
                continue;
            }
            session_dirs.push(path);
        }
    }

    if session_dirs.is_empty() {
        eprintln!("Error: No session directories found to process.");
        eprintln!("Input patterns were: {patterns:?}");
        std::process::exit(1);
    }

    let mut failed = 0;
    for (index, dir) in session_dirs.iter().enumerate() {
        if index > 0 && !print_csv && !print_json {
            println!();
        }

        info!("Processing session {}", dir.display());
        match process_session(dir, &files, options) {
            Ok(report) => {
                if print_csv {
                    write_poses_csv(io::stdout().lock(), &report.spots)?;
                } else if print_json {
                    #[cfg(feature = "json")]
                    park_scan::write_report_json(io::stdout().lock(), &report)?;
                } else {
                    println!("Session: {}", dir.display());
                    print_summary(&report);
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {e:#}", dir.display());
                eprintln!("Continuing with next session...");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "Error: {} of {} sessions failed.",
            failed,
            session_dirs.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
