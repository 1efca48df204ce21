// src/visualisation.rs

use plotters::prelude::*;
use std::io;
use std::process::Command;

use crate::stepper::Sample;

/// Plot kinetic energy and stopping power versus depth as a PNG.
/// Both curves share one axis; the y-range spans both series.
pub fn save_profile_plot(
    samples: &[Sample],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if samples.is_empty() {
        return Ok(()); // nothing to plot
    }

    let x_min = samples.first().unwrap().distance_cm;
    let mut x_max = samples.last().unwrap().distance_cm;
    // A single-step run has a degenerate x-range; widen it so the axes
    // still draw.
    if (x_max - x_min).abs() < 1e-30 {
        x_max = x_min + 1.0;
    }

    // --- global y-range over both series ---
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in samples {
        for v in [s.kinetic_energy_mev, s.stopping_power_mev_per_cm] {
            if v.is_finite() {
                if v < y_min {
                    y_min = v;
                }
                if v > y_max {
                    y_max = v;
                }
            }
        }
    }

    // Handle pathological case (all zero or NaN)
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    } else if (y_max - y_min).abs() < 1e-30 {
        let delta = if y_max.abs() < 1e-30 {
            1.0
        } else {
            0.1 * y_max.abs()
        };
        y_min -= delta;
        y_max += delta;
    } else {
        // add a 10% margin around the data range
        let margin = 0.1 * (y_max - y_min);
        y_min -= margin;
        y_max += margin;
    }

    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Energy loss across the slab", ("sans-serif", 30))
        .set_left_and_bottom_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("depth (cm)")
        .y_desc("T (MeV)  /  dE/dx (MeV/cm)")
        .x_labels(10)
        .y_labels(10)
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.distance_cm, s.kinetic_energy_mev)),
            &BLUE,
        ))?
        .label("kinetic energy (MeV)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(
            samples
                .iter()
                .map(|s| (s.distance_cm, s.stopping_power_mev_per_cm)),
            &RED,
        ))?
        .label("stopping power (MeV/cm)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Hand the output table to an external Python plotting script
/// (matplotlib) for an interactive view.
pub fn show_python_plot(script: &str, data_file: &str) -> io::Result<()> {
    let status = Command::new("python3").args([script, data_file]).status()?;

    if !status.success() {
        eprintln!("python3 exited with status {:?}", status);
    }

    Ok(())
}
