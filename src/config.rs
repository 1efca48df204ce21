use serde::Serialize;
use serde_json;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::params::{Material, Particle, RunParams};

#[derive(Serialize)]
pub struct RunConfig {
    pub material: MaterialConfig,
    pub projectile: ProjectileConfig,
    pub numerics: NumericsConfig,
    pub run: RunInfo,
}

#[derive(Serialize)]
pub struct MaterialConfig {
    pub name: String,
    pub z: u32,
    pub a: u32,
    pub rho_g_per_cm3: f64,
    pub i_ev: f64,
}

#[derive(Serialize)]
pub struct ProjectileConfig {
    pub name: String,
    pub z: u32,
    pub mass_mev: f64,
}

#[derive(Serialize)]
pub struct NumericsConfig {
    pub initial_energy_mev: f64,
    pub thickness_cm: f64,
    pub steps: usize,
    /// Fixed step size (cm): thickness / steps.
    pub step_cm: f64,
}

#[derive(Serialize)]
pub struct RunInfo {
    pub binary: String,
    pub output_table: String,
}

impl RunConfig {
    /// Snapshot of a run's inputs, for provenance next to the output table.
    pub fn from_run(
        material: &Material,
        particle: &Particle,
        run: &RunParams,
        output_table: &str,
    ) -> Self {
        Self {
            material: MaterialConfig {
                name: material.kind.as_str().to_string(),
                z: material.z,
                a: material.a,
                rho_g_per_cm3: material.rho,
                i_ev: material.i_ev,
            },
            projectile: ProjectileConfig {
                name: particle.kind.as_str().to_string(),
                z: particle.z,
                mass_mev: particle.m,
            },
            numerics: NumericsConfig {
                initial_energy_mev: run.initial_energy_mev,
                thickness_cm: run.thickness_cm,
                steps: run.step_count,
                step_cm: run.step_cm(),
            },
            run: RunInfo {
                binary: "bethe-sim".to_string(),
                output_table: output_table.to_string(),
            },
        }
    }

    pub fn write_to_path(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
