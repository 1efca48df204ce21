// src/constants.rs
//
// Physical constants for the Bethe--Bloch stopping-power calculation.
// Unit conventions used across the crate:
//   energy   MeV
//   length   cm
//   density  g/cm^3
//   mean excitation energy  eV (tabulated), converted to MeV at use

/// Electron rest mass (MeV/c^2).
pub const ELECTRON_MASS_MEV: f64 = 0.511;

/// Coefficient K = 4 pi N_A r_e^2 m_e c^2 of the Bethe--Bloch formula
/// (MeV mol^-1 cm^2).
pub const K_BETHE: f64 = 0.307;

/// Electronvolts per MeV.
///
/// Mean excitation energies are tabulated in eV while every other energy in
/// the stopping-power formula is in MeV. The excitation energy enters the
/// logarithm squared, so its conversion contributes a factor of
/// (1/EV_PER_MEV)^2 = 1e-12 to the argument, which is what keeps the
/// argument dimensionless.
pub const EV_PER_MEV: f64 = 1.0e6;
