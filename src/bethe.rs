// src/bethe.rs
//
// Pure relativistic-kinematics and Bethe--Bloch stopping-power functions.
// No shared state: everything is a function of the current (particle,
// material, kinetic energy) triple, so each piece can be tested directly
// against textbook values without running the stepping loop.

use crate::constants::{ELECTRON_MASS_MEV, EV_PER_MEV, K_BETHE};

/// Lorentz factor and velocity of a projectile, derived from its kinetic
/// energy and rest mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativisticFactors {
    pub gamma: f64,
    pub gamma_sq: f64,
    pub beta_sq: f64,
}

/// Compute gamma, gamma^2 and beta^2 for a projectile of the given kinetic
/// energy and rest mass (both MeV).
///
/// gamma = (T + m) / m >= 1 for T >= 0, so the beta^2 expression never
/// divides by zero; at T = 0 this returns exactly (1, 1, 0).
#[inline]
pub fn relativistic_factors(kinetic_energy: f64, rest_mass: f64) -> RelativisticFactors {
    debug_assert!(rest_mass > 0.0, "rest mass must be positive");
    let total_energy = kinetic_energy + rest_mass;
    let gamma = total_energy / rest_mass;
    let gamma_sq = gamma * gamma;
    let beta_sq = 1.0 - 1.0 / gamma_sq;
    RelativisticFactors {
        gamma,
        gamma_sq,
        beta_sq,
    }
}

/// Maximum kinetic energy transferable to a single electron in one
/// collision (MeV).
///
/// `mass_ratio` is m_e / M for projectile rest mass M. The denominator
/// 1 + 2*gamma*(m_e/M) + (m_e/M)^2 is >= 1 for gamma >= 1 and
/// mass_ratio > 0, so the division is well defined for every physically
/// valid input.
#[inline]
pub fn max_energy_transfer(factors: RelativisticFactors, mass_ratio: f64) -> f64 {
    let denom = 1.0 + 2.0 * factors.gamma * mass_ratio + mass_ratio * mass_ratio;
    (2.0 * ELECTRON_MASS_MEV * factors.beta_sq * factors.gamma_sq) / denom
}

/// Mean mass stopping power from the Bethe--Bloch formula (MeV cm^2/g).
/// Multiply by the material density for the linear stopping power in
/// MeV/cm.
///
/// Requires beta_sq > 0: a stopped projectile must be special-cased by the
/// caller, not fed through this expression. Below a few tens of keV per
/// nucleon the logarithm goes negative and the formula breaks down; the
/// stepping loop clamps the result to >= 0 rather than treating it as
/// energy gain.
pub fn stopping_power(
    z_proj: u32,
    z_target: u32,
    a_target: u32,
    factors: RelativisticFactors,
    w_max: f64,
    i_ev: f64,
) -> f64 {
    debug_assert!(factors.beta_sq > 0.0, "stopping power needs beta^2 > 0");
    debug_assert!(a_target > 0 && i_ev > 0.0);

    let i_mev = i_ev / EV_PER_MEV;
    let i_sq = i_mev * i_mev;
    let z_sq = (z_proj * z_proj) as f64;

    let prefactor =
        (K_BETHE * z_sq * z_target as f64) / (a_target as f64 * factors.beta_sq);
    let log_arg =
        (2.0 * ELECTRON_MASS_MEV * factors.beta_sq * factors.gamma_sq * w_max) / i_sq;

    prefactor * (0.5 * log_arg.ln() - factors.beta_sq)
}
