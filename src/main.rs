use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;

use yagicalc::feedline::MatchNetwork;
use yagicalc::geometry::AntennaGeometry;
use yagicalc::optimize::{auto_tune, AutoTuneRequest};
use yagicalc::perf::estimate;
use yagicalc::refdata::ReferenceTables;
use yagicalc::web::{run_server, Config};

#[derive(Parser)]
#[command(name = "yagicalc")]
#[command(about = "Yagi-Uda antenna design and evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a geometry file and print the performance report
    Calc { geometry: String },
    /// Generate a starting design from a request file
    Autotune { request: String },
    /// Run the HTTP API server
    Serve {
        /// YAML config file; defaults apply when omitted
        config: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { geometry } => calc(&geometry),
        Commands::Autotune { request } => autotune(&request),
        Commands::Serve { config } => serve(config.as_deref()),
    }
}

fn calc(path: &str) -> ExitCode {
    let yaml = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let geometry: AntennaGeometry = match serde_yaml::from_str(&yaml) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tables = ReferenceTables::default();
    match estimate(&tables, &geometry, &MatchNetwork::Direct) {
        Ok(result) => {
            println!(
                "{} elements @ {:.3} MHz, {:.0} ft up",
                geometry.num_elements, geometry.frequency_mhz, geometry.height_ft
            );
            println!("  SWR            {:.2}:1", result.swr);
            println!("  Gain           {:.1} dBi", result.gain.final_gain_dbi);
            println!("  Front/back     {:.1} dB", result.front_to_back_db);
            println!("  Front/side     {:.1} dB", result.front_to_side_db);
            println!(
                "  Beamwidth      {:.0}h / {:.0}v deg",
                result.beamwidth_h_deg, result.beamwidth_v_deg
            );
            println!(
                "  Bandwidth      {:.0} kHz (1.5:1) / {:.0} kHz (2:1)",
                result.bandwidth_15_khz, result.bandwidth_20_khz
            );
            println!("  Efficiency     {:.0}%", result.efficiency_pct);
            println!("  Takeoff angle  {:.1} deg", result.takeoff_angle_deg);
            if let Some(stacked) = result.stacked {
                println!(
                    "  Stacked        {} bays, {:.1} dBi (+{:.1} dB)",
                    stacked.antennas, stacked.gain_dbi, stacked.increase_db
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid geometry: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn autotune(path: &str) -> ExitCode {
    let yaml = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let request: AutoTuneRequest = match serde_yaml::from_str(&yaml) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tables = ReferenceTables::default();
    match auto_tune(&tables, &request) {
        Ok(result) => {
            println!(
                "{} elements @ {:.3} MHz, boom {:.0}\"",
                result.geometry.num_elements,
                result.geometry.frequency_mhz,
                result.geometry.boom_length_in()
            );
            for e in &result.geometry.elements {
                println!(
                    "  {:<9} {:>7.2}\" @ {:>6.1}\"",
                    e.role.to_string(),
                    e.length_in,
                    e.position_in
                );
            }
            println!(
                "Predicted: SWR {:.2}:1, gain {:.1} dBi, F/B {:.1} dB",
                result.performance.swr,
                result.performance.gain.final_gain_dbi,
                result.performance.front_to_back_db
            );
            println!(
                "Gamma: bar {:.1}\", insertion {:.1}\" ({:.0} pF)",
                result.gamma.hardware.bar_position_in,
                result.gamma.hardware.insertion_depth_in,
                result.gamma.capacitance_pf
            );
            for d in result
                .diagnostics
                .iter()
                .chain(&result.gamma.diagnostics)
            {
                println!("  note: {}", d);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Auto-tune failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(config_path: Option<&str>) -> ExitCode {
    let config = match config_path {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
