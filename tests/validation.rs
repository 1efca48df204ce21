// tests/validation.rs
//
// Integration-style validation tests (physics sanity checks and the
// contract of the stepping loop).
// Run with: cargo test
// Or only these tests: cargo test --test validation

use bethe_sim::params::{MaterialKind, ParticleKind, RunParams};
use bethe_sim::stepper::{run_simulation, run_simulation_with_report, Sample};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn proton_in_aluminum(
    initial_energy: f64,
    thickness: f64,
    steps: usize,
) -> (Vec<Sample>, bethe_sim::stepper::RunReport) {
    let material = MaterialKind::Aluminum.properties();
    let particle = ParticleKind::Proton.properties();
    let run = RunParams::new(initial_energy, thickness, steps).unwrap();
    let mut samples = Vec::new();
    let report = run_simulation_with_report(&material, &particle, &run, &mut samples)
        .expect("simulation should not fail on valid inputs");
    (samples, report)
}

#[test]
fn ten_mev_proton_through_thin_aluminum_slab() {
    // 10 MeV proton, 0.01 cm of aluminum, 10 steps.
    let (samples, report) = proton_in_aluminum(10.0, 0.01, 10);

    assert_eq!(samples.len(), 10);
    assert_eq!(report.steps_emitted, 10);

    assert_eq!(samples[0].distance_cm, 0.0);
    assert_eq!(samples[0].kinetic_energy_mev, 10.0);
    assert!(
        approx_eq(samples[9].distance_cm, 0.009, 1e-12),
        "last sampled depth should be 0.009 cm, got {}",
        samples[9].distance_cm
    );

    // Kinetic energy strictly decreases while the proton is moving.
    for pair in samples.windows(2) {
        assert!(
            pair[1].kinetic_energy_mev < pair[0].kinetic_energy_mev,
            "kinetic energy should strictly decrease across the slab"
        );
    }

    // dE/dx at entry ~92.5 MeV/cm (PDG-consistent value for this formula),
    // rising as the proton slows.
    assert!(approx_eq(
        samples[0].stopping_power_mev_per_cm,
        92.46661213856689,
        1e-6
    ));
    assert!(samples[9].stopping_power_mev_per_cm > samples[0].stopping_power_mev_per_cm);

    // Last emitted sample sits at 0.009 cm with ~9.14 MeV left; the exit
    // energy after the final update is ~9.04 MeV.
    assert!(approx_eq(samples[9].kinetic_energy_mev, 9.14210582, 1e-6));
    assert!(!report.range_exhausted);
    assert!(approx_eq(report.final_kinetic_energy_mev, 9.04293557424819, 1e-6));
}

#[test]
fn distances_form_an_arithmetic_sequence_from_zero() {
    let (samples, _) = proton_in_aluminum(30.0, 0.3, 7);
    let step = 0.3 / 7.0;

    assert_eq!(samples.len(), 7);
    assert_eq!(samples[0].distance_cm, 0.0);
    for (i, pair) in samples.windows(2).enumerate() {
        let diff = pair[1].distance_cm - pair[0].distance_cm;
        assert!(
            approx_eq(diff, step, 1e-12),
            "distance increment {i} should equal the step size, got {diff}"
        );
        assert!(pair[1].distance_cm > pair[0].distance_cm);
    }
    // Nothing at or beyond the far face of the slab.
    assert!(samples.last().unwrap().distance_cm < 0.3);
}

#[test]
fn emitted_energies_and_stopping_powers_are_never_negative() {
    // An energy low enough to hit the formula's breakdown region on the
    // way down: the clamps must keep every emitted value at >= 0.
    let (samples, _) = proton_in_aluminum(2.0, 0.05, 200);
    for s in &samples {
        assert!(s.kinetic_energy_mev >= 0.0);
        assert!(s.stopping_power_mev_per_cm >= 0.0);
        assert!(s.kinetic_energy_mev.is_finite());
        assert!(s.stopping_power_mev_per_cm.is_finite());
    }
}

#[test]
fn kinetic_energy_is_non_increasing() {
    let material = MaterialKind::Copper.properties();
    let particle = ParticleKind::Alpha.properties();
    let run = RunParams::new(20.0, 0.01, 100).unwrap();
    let samples = run_simulation(&material, &particle, &run).unwrap();

    for pair in samples.windows(2) {
        assert!(
            pair[1].kinetic_energy_mev <= pair[0].kinetic_energy_mev,
            "energy loss must never reverse"
        );
    }
}

#[test]
fn stopped_projectile_reports_exact_zeros_for_the_rest_of_the_slab() {
    // 0.5 MeV proton stops within the first step of a 0.1 cm slab.
    let (samples, report) = proton_in_aluminum(0.5, 0.1, 50);

    assert_eq!(samples.len(), 50);
    assert!(samples[0].kinetic_energy_mev > 0.0);
    assert!(samples[0].stopping_power_mev_per_cm > 0.0);

    for s in &samples[1..] {
        assert_eq!(s.kinetic_energy_mev, 0.0);
        assert_eq!(s.stopping_power_mev_per_cm, 0.0);
    }

    assert!(report.range_exhausted);
    assert_eq!(report.final_kinetic_energy_mev, 0.0);
}

#[test]
fn single_step_run_emits_one_sample_at_the_slab_entrance() {
    let (samples, report) = proton_in_aluminum(10.0, 0.5, 1);

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].distance_cm, 0.0);
    assert_eq!(samples[0].kinetic_energy_mev, 10.0);

    // The full thickness is used as the step for the energy update even
    // though only the entrance sample is emitted.
    assert!(report.final_kinetic_energy_mev < 10.0);
    assert_eq!(report.final_distance_cm, 0.0);
}

#[test]
fn identical_inputs_give_bit_identical_output() {
    let material = MaterialKind::Copper.properties();
    let particle = ParticleKind::Muon.properties();
    let run = RunParams::new(75.0, 1.5, 333).unwrap();

    let first = run_simulation(&material, &particle, &run).unwrap();
    let second = run_simulation(&material, &particle, &run).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.distance_cm.to_bits(), b.distance_cm.to_bits());
        assert_eq!(a.kinetic_energy_mev.to_bits(), b.kinetic_energy_mev.to_bits());
        assert_eq!(
            a.stopping_power_mev_per_cm.to_bits(),
            b.stopping_power_mev_per_cm.to_bits()
        );
    }
}

#[test]
fn every_material_particle_pair_runs_cleanly() {
    for material_kind in MaterialKind::ALL {
        for particle_kind in ParticleKind::ALL {
            let material = material_kind.properties();
            let particle = particle_kind.properties();
            let run = RunParams::new(25.0, 0.05, 64).unwrap();
            let samples = run_simulation(&material, &particle, &run)
                .unwrap_or_else(|e| panic!("{material_kind}/{particle_kind}: {e}"));
            assert_eq!(samples.len(), 64);
            for s in &samples {
                assert!(s.kinetic_energy_mev >= 0.0);
                assert!(s.stopping_power_mev_per_cm >= 0.0);
            }
        }
    }
}
