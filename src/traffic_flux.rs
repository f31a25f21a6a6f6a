use crate::errors::RiemannError;

/// The LWR traffic flux `f(q) = v_max q (1 - q)` for a normalized density `q` in `[0, 1]`.
///
/// None of the methods guard against densities outside `[0, 1]`, the solvers
/// validate their input states before using them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficFlux {
    v_max: f64,
}

impl TrafficFlux {
    pub fn new(v_max: f64) -> Result<Self, RiemannError> {
        if !(v_max > 0.) || !v_max.is_finite() {
            return Err(RiemannError::domain("speed limit", v_max));
        }
        Ok(Self { v_max })
    }

    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    pub fn flux(&self, q: f64) -> f64 {
        self.v_max * q * (1. - q)
    }

    /// Velocity of the cars at density `q`.
    pub fn velocity(&self, q: f64) -> f64 {
        self.v_max * (1. - q)
    }

    /// `f'(q)`
    pub fn characteristic_speed(&self, q: f64) -> f64 {
        self.v_max * (1. - 2. * q)
    }

    /// Inverse of `f'`: the density carried by the characteristic with speed `xi`.
    pub fn density_at_speed(&self, xi: f64) -> f64 {
        0.5 * (1. - xi / self.v_max)
    }

    /// Maximal flux, reached at `q = 1/2`.
    pub fn capacity(&self) -> f64 {
        0.25 * self.v_max
    }

    /// Maximal flux that can leave a cell with density `q` (sending function).
    pub fn demand(&self, q: f64) -> f64 {
        if q <= 0.5 {
            self.flux(q)
        } else {
            self.capacity()
        }
    }

    /// Maximal flux that can enter a cell with density `q` (receiving function).
    pub fn supply(&self, q: f64) -> f64 {
        if q <= 0.5 {
            self.capacity()
        } else {
            self.flux(q)
        }
    }

    fn discriminant(&self, flux: f64) -> f64 {
        (1. - flux / self.capacity()).max(0.).sqrt()
    }

    /// Root of `f(q) = flux` with `q <= 1/2`.
    pub fn free_flow_density(&self, flux: f64) -> f64 {
        0.5 * (1. - self.discriminant(flux))
    }

    /// Root of `f(q) = flux` with `q >= 1/2`.
    pub fn congested_density(&self, flux: f64) -> f64 {
        0.5 * (1. + self.discriminant(flux))
    }

    pub(crate) fn check_density(q: f64) -> Result<(), RiemannError> {
        if (0. ..=1.).contains(&q) {
            Ok(())
        } else {
            Err(RiemannError::domain("traffic density", q))
        }
    }
}
