use yaml_rust::Yaml;

use crate::errors::{ConfigError, RiemannError};
use crate::physical_quantities::{Primitive, State};
use crate::utils::yaml_f64;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AdiabaticIndex {
    gamma: f64,
    gamma_inv: f64,
    odgm1: f64,
    odgp1: f64,
}

impl From<f64> for AdiabaticIndex {
    fn from(value: f64) -> Self {
        AdiabaticIndex {
            gamma: value,
            gamma_inv: 1. / value,
            odgm1: 1. / (value - 1.),
            odgp1: 1. / (value + 1.),
        }
    }
}

impl AdiabaticIndex {
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn gamma_inv(&self) -> f64 {
        self.gamma_inv
    }

    /// (gamma + 1) / (2 gamma)
    pub fn gp1d2g(&self) -> f64 {
        0.5 * (self.gamma + 1.) * self.gamma_inv
    }

    /// (gamma - 1) / (2 gamma)
    pub fn gm1d2g(&self) -> f64 {
        0.5 * (self.gamma - 1.) * self.gamma_inv
    }

    /// (gamma - 1) / (gamma + 1)
    pub fn gm1dgp1(&self) -> f64 {
        (self.gamma - 1.) * self.odgp1
    }

    /// 1 / (gamma - 1)
    pub fn odgm1(&self) -> f64 {
        self.odgm1
    }

    /// 2 / (gamma - 1)
    pub fn tdgm1(&self) -> f64 {
        2. * self.odgm1
    }

    /// 2 / (gamma + 1)
    pub fn tdgp1(&self) -> f64 {
        2. * self.odgp1
    }
}

/// Polytropic ideal gas law `p = (gamma - 1) rho e`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasLaw {
    gamma: AdiabaticIndex,
}

impl GasLaw {
    pub fn new(gamma: f64) -> Result<Self, ConfigError> {
        if !(gamma > 1.) || !gamma.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "gamma".to_string(),
                value: gamma.to_string(),
            });
        }
        Ok(Self {
            gamma: gamma.into(),
        })
    }

    /// Reads the adiabatic index from the `gamma` key (defaults to 5/3).
    pub fn init(cfg: &Yaml) -> Result<Self, ConfigError> {
        let gamma = yaml_f64(cfg, "gamma")?.unwrap_or(5. / 3.);
        Self::new(gamma)
    }

    pub fn gamma(&self) -> &AdiabaticIndex {
        &self.gamma
    }

    /// Specific internal energy
    pub fn gas_internal_energy_from_pressure(&self, pressure: f64, density_inv: f64) -> f64 {
        pressure * density_inv * self.gamma.odgm1()
    }

    pub fn gas_pressure_from_internal_energy(&self, internal_energy: f64, density: f64) -> f64 {
        (self.gamma.gamma - 1.) * internal_energy * density
    }

    /// `sqrt(gamma p / rho)`.
    pub fn sound_speed(&self, primitives: &State<Primitive>) -> Result<f64, RiemannError> {
        if !(primitives.density() > 0.) {
            return Err(RiemannError::domain("density", primitives.density()));
        }
        if !(primitives.pressure() >= 0.) {
            return Err(RiemannError::domain("pressure", primitives.pressure()));
        }
        Ok(self.sound_speed_unchecked(primitives.pressure(), 1. / primitives.density()))
    }

    pub(crate) fn sound_speed_unchecked(&self, pressure: f64, density_inv: f64) -> f64 {
        (self.gamma.gamma * pressure * density_inv).sqrt()
    }
}
