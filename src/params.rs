// src/params.rs
//
// Target materials, projectiles and validated run parameters.
//
// Materials and projectiles form small closed sets: a tagged kind enum
// resolves to an immutable parameter struct, fixed for the whole run.
// Selection, prompting and retries live in the binary, not here.

use std::error::Error;
use std::fmt;

/// Target material parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub z: u32,    // atomic number
    pub a: u32,    // atomic mass (g/mol)
    pub rho: f64,  // density (g/cm^3)
    pub i_ev: f64, // mean excitation energy (eV)
}

/// Projectile parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub z: u32, // charge number
    pub m: f64, // rest mass (MeV/c^2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Aluminum,
    Copper,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 2] = [MaterialKind::Aluminum, MaterialKind::Copper];

    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aluminum" | "aluminium" | "al" => Some(Self::Aluminum),
            "copper" | "cu" => Some(Self::Copper),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aluminum => "aluminum",
            Self::Copper => "copper",
        }
    }

    /// Fixed parameter set for this material.
    pub fn properties(&self) -> Material {
        match self {
            Self::Aluminum => Material {
                kind: *self,
                z: 13,
                a: 27,
                rho: 2.7,
                i_ev: 166.0,
            },
            Self::Copper => Material {
                kind: *self,
                z: 29,
                a: 63,
                rho: 8.96,
                i_ev: 322.0,
            },
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialKind::Aluminum => write!(f, "Aluminum"),
            MaterialKind::Copper => write!(f, "Copper"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Proton,
    Alpha,
    Muon,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 3] =
        [ParticleKind::Proton, ParticleKind::Alpha, ParticleKind::Muon];

    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "proton" | "p" => Some(Self::Proton),
            "alpha" | "a" => Some(Self::Alpha),
            "muon" | "mu" => Some(Self::Muon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proton => "proton",
            Self::Alpha => "alpha",
            Self::Muon => "muon",
        }
    }

    /// Fixed parameter set for this projectile.
    pub fn properties(&self) -> Particle {
        match self {
            Self::Proton => Particle {
                kind: *self,
                z: 1,
                m: 938.272,
            },
            Self::Alpha => Particle {
                kind: *self,
                z: 2,
                m: 3727.379,
            },
            Self::Muon => Particle {
                kind: *self,
                z: 1,
                m: 105.658,
            },
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleKind::Proton => write!(f, "Proton"),
            ParticleKind::Alpha => write!(f, "Alpha particle"),
            ParticleKind::Muon => write!(f, "Muon"),
        }
    }
}

/// Numeric run parameters, validated strictly positive at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParams {
    pub initial_energy_mev: f64,
    pub thickness_cm: f64,
    pub step_count: usize,
}

impl RunParams {
    pub fn new(
        initial_energy_mev: f64,
        thickness_cm: f64,
        step_count: usize,
    ) -> Result<Self, ParamError> {
        if !(initial_energy_mev > 0.0) {
            return Err(ParamError::NonPositiveEnergy(initial_energy_mev));
        }
        if !(thickness_cm > 0.0) {
            return Err(ParamError::NonPositiveThickness(thickness_cm));
        }
        if step_count == 0 {
            return Err(ParamError::ZeroSteps);
        }
        Ok(Self {
            initial_energy_mev,
            thickness_cm,
            step_count,
        })
    }

    /// Step size: thickness / step_count (cm). Positive by construction.
    pub fn step_cm(&self) -> f64 {
        self.thickness_cm / self.step_count as f64
    }
}

/// Rejected run parameters. Raised before integration starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    NonPositiveEnergy(f64),
    NonPositiveThickness(f64),
    ZeroSteps,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NonPositiveEnergy(e) => {
                write!(f, "initial kinetic energy must be positive, got {e} MeV")
            }
            ParamError::NonPositiveThickness(t) => {
                write!(f, "slab thickness must be positive, got {t} cm")
            }
            ParamError::ZeroSteps => write!(f, "number of steps must be positive"),
        }
    }
}

impl Error for ParamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_arg_names() {
        for kind in MaterialKind::ALL {
            assert_eq!(MaterialKind::from_arg(kind.as_str()), Some(kind));
        }
        for kind in ParticleKind::ALL {
            assert_eq!(ParticleKind::from_arg(kind.as_str()), Some(kind));
        }
        assert_eq!(MaterialKind::from_arg("Cu"), Some(MaterialKind::Copper));
        assert_eq!(MaterialKind::from_arg("iron"), None);
        assert_eq!(ParticleKind::from_arg("electron"), None);
    }

    #[test]
    fn parameter_tables_are_physical() {
        for kind in MaterialKind::ALL {
            let m = kind.properties();
            assert!(m.z > 0 && m.a > 0, "{kind}: Z and A must be positive");
            assert!(m.rho > 0.0 && m.i_ev > 0.0);
        }
        for kind in ParticleKind::ALL {
            let p = kind.properties();
            assert!(p.z > 0 && p.m > 0.0);
        }
        // spot-check the tabulated values
        let al = MaterialKind::Aluminum.properties();
        assert_eq!((al.z, al.a), (13, 27));
        let p = ParticleKind::Proton.properties();
        assert_eq!(p.m, 938.272);
    }

    #[test]
    fn run_params_reject_non_positive_inputs() {
        assert!(RunParams::new(10.0, 0.01, 10).is_ok());
        assert_eq!(
            RunParams::new(0.0, 0.01, 10),
            Err(ParamError::NonPositiveEnergy(0.0))
        );
        assert_eq!(
            RunParams::new(10.0, -1.0, 10),
            Err(ParamError::NonPositiveThickness(-1.0))
        );
        assert_eq!(RunParams::new(10.0, 0.01, 0), Err(ParamError::ZeroSteps));
        // NaN is not a valid energy either
        assert!(RunParams::new(f64::NAN, 0.01, 10).is_err());
    }

    #[test]
    fn step_size_is_thickness_over_steps() {
        let run = RunParams::new(10.0, 0.01, 10).unwrap();
        assert_eq!(run.step_cm(), 0.001);
        let run = RunParams::new(10.0, 0.5, 1).unwrap();
        assert_eq!(run.step_cm(), 0.5);
    }
}
