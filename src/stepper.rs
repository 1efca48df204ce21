// src/stepper.rs
//
// Fixed-step explicit Euler integration of the energy loss across the slab.
//
// One step: evaluate the stopping power at the current kinetic energy,
// clamp it to >= 0, emit a sample, then advance
//     T  <- max(0, T - dE/dx * step)
//     x  <- x + step
// The step size is caller-chosen (thickness / step_count) and never
// adapted: accuracy is entirely the caller's trade-off, which keeps the
// output a pure function of the inputs. Large steps visibly under-resolve
// the Bragg peak; that is expected behaviour, not something to correct
// with adaptive stepping.

use std::error::Error;
use std::fmt;
use std::io;

use crate::bethe::{max_energy_transfer, relativistic_factors, stopping_power};
use crate::constants::ELECTRON_MASS_MEV;
use crate::params::{Material, Particle, RunParams};

/// One row of the simulated depth profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub distance_cm: f64,
    pub kinetic_energy_mev: f64,
    pub stopping_power_mev_per_cm: f64,
}

/// Write-only destination for samples, accepted in emission order.
/// The integrator never reads back, retries or reorders.
pub trait SampleSink {
    fn emit(&mut self, sample: &Sample) -> io::Result<()>;
}

/// Collecting sink for in-memory runs and tests.
impl SampleSink for Vec<Sample> {
    fn emit(&mut self, sample: &Sample) -> io::Result<()> {
        self.push(*sample);
        Ok(())
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Number of samples handed to the sink (= step_count).
    pub steps_emitted: usize,
    /// Distance of the last emitted sample (cm). Strictly less than the
    /// slab thickness; the post-increment distance that reaches the far
    /// face is never emitted.
    pub final_distance_cm: f64,
    /// Kinetic energy after the last energy update (MeV).
    pub final_kinetic_energy_mev: f64,
    /// True if the projectile ranged out (kinetic energy reached 0)
    /// inside the slab.
    pub range_exhausted: bool,
}

#[derive(Debug)]
pub enum SimError {
    /// The stopping-power formula produced a non-finite value that no
    /// clamp rule covers. Nothing is emitted past this point; the
    /// offending state is carried for diagnosis.
    NonFiniteStoppingPower {
        distance_cm: f64,
        kinetic_energy_mev: f64,
    },
    /// The sink refused a sample.
    Sink(io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NonFiniteStoppingPower {
                distance_cm,
                kinetic_energy_mev,
            } => write!(
                f,
                "non-finite stopping power at x = {distance_cm} cm, T = {kinetic_energy_mev} MeV"
            ),
            SimError::Sink(e) => write!(f, "output sink error: {e}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimError::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(e: io::Error) -> Self {
        SimError::Sink(e)
    }
}

/// Integrate the energy loss across the slab, streaming one sample per
/// step into `sink`, in increasing distance order.
///
/// Material and particle parameters are fixed for the whole run. Once the
/// kinetic energy is clamped to 0 the stopping power is defined as exactly
/// 0 for every remaining step (the beta^2 = 0 division is never evaluated).
pub fn run_simulation_with_report(
    material: &Material,
    particle: &Particle,
    run: &RunParams,
    sink: &mut dyn SampleSink,
) -> Result<RunReport, SimError> {
    let step = run.step_cm();
    let mass_ratio = ELECTRON_MASS_MEV / particle.m;

    let mut distance = 0.0;
    let mut kinetic_energy = run.initial_energy_mev;
    let mut last_distance = 0.0;

    for _ in 0..run.step_count {
        let sp = if kinetic_energy > 0.0 {
            let factors = relativistic_factors(kinetic_energy, particle.m);
            let w_max = max_energy_transfer(factors, mass_ratio);
            let linear = material.rho
                * stopping_power(
                    particle.z,
                    material.z,
                    material.a,
                    factors,
                    w_max,
                    material.i_ev,
                );
            // Check finiteness before the clamp: max() would quietly turn
            // a NaN into 0.
            if !linear.is_finite() {
                return Err(SimError::NonFiniteStoppingPower {
                    distance_cm: distance,
                    kinetic_energy_mev: kinetic_energy,
                });
            }
            linear.max(0.0)
        } else {
            0.0
        };

        sink.emit(&Sample {
            distance_cm: distance,
            kinetic_energy_mev: kinetic_energy,
            stopping_power_mev_per_cm: sp,
        })?;
        last_distance = distance;

        kinetic_energy = (kinetic_energy - sp * step).max(0.0);
        distance += step;
    }

    Ok(RunReport {
        steps_emitted: run.step_count,
        final_distance_cm: last_distance,
        final_kinetic_energy_mev: kinetic_energy,
        range_exhausted: kinetic_energy == 0.0,
    })
}

/// Convenience wrapper: run and collect the whole profile in memory.
pub fn run_simulation(
    material: &Material,
    particle: &Particle,
    run: &RunParams,
) -> Result<Vec<Sample>, SimError> {
    let mut samples = Vec::with_capacity(run.step_count);
    run_simulation_with_report(material, particle, run, &mut samples)?;
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MaterialKind, ParticleKind, RunParams};

    #[test]
    fn report_agrees_with_collected_samples() {
        let material = MaterialKind::Aluminum.properties();
        let particle = ParticleKind::Proton.properties();
        let run = RunParams::new(10.0, 0.01, 10).unwrap();

        let mut samples = Vec::new();
        let report =
            run_simulation_with_report(&material, &particle, &run, &mut samples).unwrap();

        assert_eq!(report.steps_emitted, 10);
        assert_eq!(samples.len(), 10);
        assert_eq!(report.final_distance_cm, samples.last().unwrap().distance_cm);
        assert!(!report.range_exhausted);
        assert!(report.final_kinetic_energy_mev > 0.0);
        assert!(report.final_kinetic_energy_mev < run.initial_energy_mev);
    }

    #[test]
    fn wrapper_and_streaming_runs_emit_the_same_sequence() {
        let material = MaterialKind::Copper.properties();
        let particle = ParticleKind::Muon.properties();
        let run = RunParams::new(50.0, 0.2, 25).unwrap();

        let collected = run_simulation(&material, &particle, &run).unwrap();
        let mut streamed = Vec::new();
        run_simulation_with_report(&material, &particle, &run, &mut streamed).unwrap();
        assert_eq!(collected, streamed);
    }

    #[test]
    fn ranged_out_projectile_is_flagged() {
        let material = MaterialKind::Aluminum.properties();
        let particle = ParticleKind::Proton.properties();
        let run = RunParams::new(0.5, 0.1, 50).unwrap();

        let mut samples = Vec::new();
        let report =
            run_simulation_with_report(&material, &particle, &run, &mut samples).unwrap();
        assert!(report.range_exhausted);
        assert_eq!(report.final_kinetic_energy_mev, 0.0);
        assert_eq!(samples.len(), 50);
    }
}
