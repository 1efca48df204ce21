// src/main.rs
//
// CLI driver for slab energy-loss runs.
//
// Examples:
//
//   cargo run --release -- 10 0.01 10 runs/proton_al.txt \
//         material=aluminum projectile=proton
//       -> 10 MeV proton through 0.01 cm of aluminum, 10 Euler steps.
//
//   cargo run --release -- 50 0.2 500 runs/muon_cu.txt plot=runs/muon_cu.png
//       -> material and projectile chosen interactively, PNG chart saved
//          next to the table.
//
// Outputs:
//   <output_file>              three-column depth profile (cm, MeV, MeV/cm)
//   <output_file>.config.json  run parameters, for provenance
//   plot=FILE.png              optional chart of the profile

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use bethe_sim::config::RunConfig;
use bethe_sim::output::write_table;
use bethe_sim::params::{MaterialKind, ParticleKind, RunParams};
use bethe_sim::stepper::{run_simulation_with_report, Sample, SimError};
use bethe_sim::visualisation::{save_profile_plot, show_python_plot};

/// Interactive selections are retried this many times before giving up.
const MAX_ATTEMPTS: usize = 3;

const DEFAULT_PYPLOT: &str = "scripts/plot_profile.py";

fn print_usage(program: &str) {
    eprintln!(
        r#"Usage:
  {program} <initial_energy(MeV)> <thickness(cm)> <steps> <output_file>
           [material=aluminum|copper] [projectile=proton|alpha|muon]
           [plot=FILE.png] [pyplot=SCRIPT]

Notes:
  - Energy, thickness and steps must all be strictly positive.
  - Without material=/projectile=, the choice is prompted on stdin
    (at most {MAX_ATTEMPTS} attempts each).
  - pyplot= overrides the python script offered after the run
    (default: {DEFAULT_PYPLOT}).
"#
    );
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn sim_to_io(e: SimError) -> io::Error {
    match e {
        SimError::Sink(io) => io,
        other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
    }
}

fn read_menu_choice<T: Copy>(prompt: &str, options: &[T]) -> Option<T> {
    print!("{prompt}");
    io::stdout().flush().ok()?;
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer).ok()?;
    match buffer.trim().parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1]),
        _ => None,
    }
}

fn prompt_material() -> Option<MaterialKind> {
    println!("Choose target material:");
    for (i, kind) in MaterialKind::ALL.iter().enumerate() {
        println!("{}. {kind}", i + 1);
    }
    read_menu_choice("Enter choice (1 or 2): ", &MaterialKind::ALL)
}

fn prompt_projectile() -> Option<ParticleKind> {
    println!("Choose projectile:");
    for (i, kind) in ParticleKind::ALL.iter().enumerate() {
        println!("{}. {kind}", i + 1);
    }
    read_menu_choice("Enter choice (1, 2 or 3): ", &ParticleKind::ALL)
}

fn select_with_retries<T>(what: &str, mut ask: impl FnMut() -> Option<T>) -> io::Result<T> {
    for attempt in 0..MAX_ATTEMPTS {
        if attempt >= 1 {
            eprintln!("! Try again. Attempt: {}/{}", attempt + 1, MAX_ATTEMPTS);
        }
        if let Some(choice) = ask() {
            return Ok(choice);
        }
    }
    Err(invalid_input(format!(
        "too many attempts at choosing a {what}"
    )))
}

fn yes_or_no(answer: &str) -> bool {
    matches!(answer.trim_start().chars().next(), Some('y') | Some('Y'))
}

fn main() -> io::Result<()> {
    let argv: Vec<String> = env::args().collect();
    let program = argv
        .first()
        .map(String::as_str)
        .unwrap_or("bethe-sim")
        .to_string();

    let mut positional: Vec<&str> = Vec::new();
    let mut material_override: Option<MaterialKind> = None;
    let mut projectile_override: Option<ParticleKind> = None;
    let mut plot_path: Option<String> = None;
    let mut pyplot_script: Option<String> = None;

    for arg in argv.iter().skip(1) {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage(&program);
            return Ok(());
        }

        if let Some(v) = arg.strip_prefix("material=") {
            match MaterialKind::from_arg(v) {
                Some(k) => material_override = Some(k),
                None => eprintln!("Warning: unknown material '{v}', will ask interactively"),
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("projectile=") {
            match ParticleKind::from_arg(v) {
                Some(k) => projectile_override = Some(k),
                None => eprintln!("Warning: unknown projectile '{v}', will ask interactively"),
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("plot=") {
            plot_path = Some(v.to_string());
            continue;
        }
        if let Some(v) = arg.strip_prefix("pyplot=") {
            pyplot_script = Some(v.to_string());
            continue;
        }

        positional.push(arg);
    }

    if positional.len() != 4 {
        print_usage(&program);
        return Err(invalid_input(format!(
            "expected 4 positional arguments, got {}",
            positional.len()
        )));
    }

    let initial_energy: f64 = positional[0]
        .parse()
        .map_err(|_| invalid_input(format!("could not parse initial energy '{}'", positional[0])))?;
    let thickness: f64 = positional[1]
        .parse()
        .map_err(|_| invalid_input(format!("could not parse thickness '{}'", positional[1])))?;
    let steps: usize = positional[2]
        .parse()
        .map_err(|_| invalid_input(format!("could not parse step count '{}'", positional[2])))?;
    let out_path = PathBuf::from(positional[3]);

    let run = RunParams::new(initial_energy, thickness, steps)
        .map_err(|e| invalid_input(e.to_string()))?;

    let material_kind = match material_override {
        Some(k) => k,
        None => select_with_retries("target material", prompt_material)?,
    };
    let projectile_kind = match projectile_override {
        Some(k) => k,
        None => select_with_retries("projectile", prompt_projectile)?,
    };
    let material = material_kind.properties();
    let particle = projectile_kind.properties();

    println!("--- bethe-sim run config ---");
    println!(
        "target:     {} (Z={} A={} rho={} g/cm^3 I={} eV)",
        material.kind, material.z, material.a, material.rho, material.i_ev
    );
    println!(
        "projectile: {} (z={} m={} MeV/c^2)",
        particle.kind, particle.z, particle.m
    );
    println!(
        "run:        T0={} MeV thickness={} cm steps={} (step={:.6e} cm)",
        run.initial_energy_mev,
        run.thickness_cm,
        run.step_count,
        run.step_cm()
    );
    println!("----------------------------");

    let mut samples: Vec<Sample> = Vec::with_capacity(run.step_count);
    let report =
        run_simulation_with_report(&material, &particle, &run, &mut samples).map_err(sim_to_io)?;

    write_table(&out_path, &samples)?;
    println!("Data saved at '{}'", out_path.display());

    let config_path = out_path.with_extension("config.json");
    RunConfig::from_run(&material, &particle, &run, &out_path.to_string_lossy())
        .write_to_path(&config_path)?;

    if report.range_exhausted {
        println!(
            "Projectile ranged out inside the slab (last sampled depth {:.6} cm).",
            report.final_distance_cm
        );
    } else {
        println!(
            "Projectile exits the slab with {:.6} MeV after {} steps.",
            report.final_kinetic_energy_mev, report.steps_emitted
        );
    }

    if let Some(plot_file) = plot_path {
        if let Err(e) = save_profile_plot(&samples, &plot_file) {
            eprintln!("Could not save plot: {e}");
        } else {
            println!("Saved plot to {plot_file}");
        }
    }

    print!("Do you wish to see a python plot? (y/n): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    if yes_or_no(&answer) {
        let script = pyplot_script.as_deref().unwrap_or(DEFAULT_PYPLOT);
        if let Err(e) = show_python_plot(script, &out_path.to_string_lossy()) {
            eprintln!("Could not run the python plot: {e}");
        }
    }

    Ok(())
}
