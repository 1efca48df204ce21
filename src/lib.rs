// src/lib.rs

pub mod bethe;
pub mod config;
pub mod constants;
pub mod output;
pub mod params;
pub mod stepper;
pub mod visualisation;
