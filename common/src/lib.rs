//! Common utilities for physics simulations
//!
//! This crate provides the physical constants and logging setup shared by
//! the lensing engine and its frame drivers.

pub mod logging;

/// Physical constants used in simulations (SI units)
pub mod constants {
    /// Gravitational constant in m³·kg⁻¹·s⁻²
    pub const G: f64 = 6.67430e-11;

    /// Speed of light in m/s
    pub const C: f64 = 299_792_458.0;

    /// Schwarzschild radius coefficient: 2G/c²
    pub const SCHWARZSCHILD_COEFF: f64 = 2.0 * G / (C * C);
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn solar_mass_has_three_kilometre_horizon() {
        let rs = SCHWARZSCHILD_COEFF * 1.989e30;
        assert!((rs - 2954.0).abs() < 5.0, "rs = {rs}");
    }
}
