use anyhow::Result;
use ferrosim_common::SimulationConfig;
use ferrosim_engine::SimulationController;
use log::{error, info, trace, warn};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    info!("Starting Ferrosim Engine (CPU Parallel)...");

    // --- Load Configuration ---
    let config = SimulationConfig::load("config.toml")?;

    info!("Using {} Rayon threads.", rayon::current_num_threads());

    // --- Initialize Simulation ---
    info!("Initializing {0}x{0} field...", config.grid.size);
    let mut sim = match config.grid.seed {
        Some(seed) => {
            info!("Fixed seed {} (runs are reproducible).", seed);
            SimulationController::with_seed(config.grid.size, config.params, seed)?
        }
        None => SimulationController::new(config.grid.size, config.params)?,
    };

    let total_generations = config.run.generations;
    let record_interval = config.run.record_interval;
    info!(
        "Recording snapshot every {} generations ({} total generations).",
        record_interval, total_generations
    );

    // --- Initial Snapshot (generation 0) ---
    sim.record_snapshot(config.output.save_field_in_snapshot);

    info!("Starting simulation loop for {} generations...", total_generations);
    let start_time = Instant::now();
    let mut previous_print_time = start_time;

    sim.start();
    for generation in 0..total_generations {
        if !sim.is_running() {
            warn!("Simulation paused externally at generation {}; stopping loop.", generation);
            break;
        }

        let step_start_time = Instant::now();
        sim.step();
        let step_duration = step_start_time.elapsed();

        // Print status periodically
        let current_time = Instant::now();
        let print_interval_secs = 5.0;
        let should_print_status =
            current_time.duration_since(previous_print_time).as_secs_f64() >= print_interval_secs;
        let is_record_step = (generation + 1) % record_interval == 0;
        let is_last_step = generation == total_generations - 1;

        if should_print_status || is_record_step || is_last_step {
            info!(
                "Generation [{}/{}] (t = {:.2}) | Step Time: {:6.2} ms | Elapsed: {:.2} s",
                generation + 1,
                total_generations,
                sim.sim_time(),
                step_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = current_time;

            if is_record_step || is_last_step {
                sim.record_snapshot(config.output.save_field_in_snapshot);
            }
        } else {
            trace!(
                "Generation [{}/{}] completed in {:.2} ms",
                generation + 1,
                total_generations,
                step_duration.as_secs_f64() * 1000.0
            );
        }
    }
    sim.pause();

    let total_duration = start_time.elapsed();
    info!(
        "Simulation finished in {:.3} seconds ({:.3} minutes).",
        total_duration.as_secs_f64(),
        total_duration.as_secs_f64() / 60.0
    );

    // --- Save Recorded Data ---
    if config.output.save_snapshots {
        let output_format = config.output.format.as_deref().unwrap_or("json");
        let snapshots = sim.recorded_snapshots();

        match output_format {
            "json" => save_snapshots_json(&config, snapshots),
            "bincode" => {
                let filename = format!("{}_snapshots.bin", config.output.base_filename);
                match File::create(&filename) {
                    Ok(file) => match bincode::serialize_into(file, snapshots) {
                        Ok(_) => info!("All snapshots saved to {} (binary format)", filename),
                        Err(e) => error!("Error serializing snapshots to bincode: {}", e),
                    },
                    Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
                }
            }
            "messagepack" => {
                let filename = format!("{}_snapshots.msgpack", config.output.base_filename);
                match &mut File::create(&filename) {
                    Ok(file) => match rmp_serde::encode::write(file, snapshots) {
                        Ok(_) => info!("All snapshots saved to {} (MessagePack format)", filename),
                        Err(e) => error!("Error serializing snapshots to MessagePack: {}", e),
                    },
                    Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
                }
            }
            _ => {
                error!("Unknown output format: {}. Using JSON instead.", output_format);
                save_snapshots_json(&config, snapshots);
            }
        }
    } else {
        info!("Skipping saving snapshots as per config (save_snapshots is false).");
    }

    // Save the final field if requested (separate from full snapshots)
    if config.output.save_final_field_csv {
        let filename = format!("{}_final_field.csv", config.output.base_filename);
        match save_field_csv(&sim, &filename) {
            Ok(()) => info!("Final field saved to {}", filename),
            Err(e) => error!("Error saving CSV file '{}': {}", filename, e),
        }
    } else {
        info!("Skipping saving final field as per config.");
    }

    info!("Simulation Complete.");
    Ok(())
}

fn save_snapshots_json(config: &SimulationConfig, snapshots: &[ferrosim_common::FieldSnapshot]) {
    let filename = format!("{}_snapshots.json", config.output.base_filename);
    match File::create(&filename) {
        Ok(mut file) => match serde_json::to_string(snapshots) {
            Ok(json_string) => {
                if let Err(e) = file.write_all(json_string.as_bytes()) {
                    error!("Error writing snapshot JSON to file '{}': {}", filename, e);
                } else {
                    info!("All snapshots saved to {} ({} bytes)", filename, json_string.len());
                }
            }
            Err(e) => error!("Error serializing snapshots to JSON: {}", e),
        },
        Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
    }
}

fn save_field_csv(sim: &SimulationController, filename: &str) -> Result<()> {
    let size = sim.size();
    let cells = sim.current_state().current();
    let mut writer = csv::Writer::from_path(filename)?;
    writer.write_record(["x", "y", "fe3", "fe2", "dormant", "active"])?;
    for y in 0..size {
        for x in 0..size {
            let cell = cells[y * size + x];
            writer.write_record(&[
                x.to_string(),
                y.to_string(),
                format!("{:.6}", cell.fe3),
                format!("{:.6}", cell.fe2),
                format!("{:.6}", cell.dormant),
                format!("{:.6}", cell.active),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
