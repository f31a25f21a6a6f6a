use std::{
    marker::PhantomData,
    ops::{Mul, Sub},
};

use glam::DVec3;

use crate::{errors::RiemannError, gas_law::GasLaw};

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Primitive;
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Conserved;

/// A state of the Euler equations: a scalar, a vector and a scalar quantity.
///
/// For primitives these are density, velocity and pressure, for conserved
/// quantities density, momentum density and total energy density.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct State<T>(f64, DVec3, f64, PhantomData<T>);

impl<T> Sub for State<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, self.1 - rhs.1, self.2 - rhs.2, PhantomData)
    }
}

impl<T> Mul<State<T>> for f64 {
    type Output = State<T>;

    fn mul(self, rhs: State<T>) -> Self::Output {
        State::<T>(self * rhs.0, self * rhs.1, self * rhs.2, PhantomData)
    }
}

impl State<Primitive> {
    pub fn new(density: f64, velocity: DVec3, pressure: f64) -> Self {
        Self(density, velocity, pressure, PhantomData)
    }

    /// Primitives with only a velocity component along the x-axis.
    pub fn new_1d(density: f64, velocity: f64, pressure: f64) -> Self {
        Self::new(density, velocity * DVec3::X, pressure)
    }

    pub fn density(&self) -> f64 {
        self.0
    }

    pub fn velocity(&self) -> DVec3 {
        self.1
    }

    pub fn pressure(&self) -> f64 {
        self.2
    }

    pub fn from_conserved(conserved: &State<Conserved>, eos: &GasLaw) -> Self {
        let density = conserved.density();
        let velocity = conserved.momentum() / density;
        let internal_energy = conserved.internal_energy();
        let pressure = eos.gas_pressure_from_internal_energy(internal_energy, density);
        Self::new(density, velocity, pressure)
    }

    pub fn boost(&self, velocity: DVec3) -> Self {
        Self::new(self.density(), self.velocity() + velocity, self.pressure())
    }

    /// Checks that density and pressure are strictly positive and the velocity finite.
    pub fn check_physical(&self) -> Result<(), RiemannError> {
        if !(self.density() > 0.) || !self.density().is_finite() {
            return Err(RiemannError::domain("density", self.density()));
        }
        if !(self.pressure() > 0.) || !self.pressure().is_finite() {
            return Err(RiemannError::domain("pressure", self.pressure()));
        }
        if !self.velocity().is_finite() {
            return Err(RiemannError::domain("velocity", self.velocity().x));
        }
        Ok(())
    }

    /// The Euler flux through a face with normal along the x-axis.
    pub fn flux(&self, eos: &GasLaw) -> State<Conserved> {
        let v = self.velocity().x;
        let rho_v = self.density() * v;
        let energy = self.density()
            * (eos.gas_internal_energy_from_pressure(self.pressure(), 1. / self.density())
                + 0.5 * self.velocity().length_squared());
        State::<Conserved>::new(
            rho_v,
            rho_v * self.velocity() + self.pressure() * DVec3::X,
            (energy + self.pressure()) * v,
        )
    }
}

impl State<Conserved> {
    pub fn new(density: f64, momentum: DVec3, energy: f64) -> Self {
        Self(density, momentum, energy, PhantomData)
    }

    pub fn density(&self) -> f64 {
        self.0
    }

    pub fn momentum(&self) -> DVec3 {
        self.1
    }

    pub fn energy(&self) -> f64 {
        self.2
    }

    /// returns the specific internal energy e defined by: E = E_kin + E_therm = E_kin + rho * e
    pub fn internal_energy(&self) -> f64 {
        let rho_inv = 1. / self.density();
        let thermal_energy = self.energy() - 0.5 * self.momentum().length_squared() * rho_inv;
        thermal_energy * rho_inv
    }

    pub fn from_primitives(primitives: &State<Primitive>, eos: &GasLaw) -> Self {
        let density = primitives.density();
        let momentum = density * primitives.velocity();
        let energy = 0.5 * momentum.dot(primitives.velocity())
            + density * eos.gas_internal_energy_from_pressure(primitives.pressure(), 1. / density);
        Self::new(density, momentum, energy)
    }

    pub fn flux(&self, eos: &GasLaw) -> State<Conserved> {
        State::<Primitive>::from_conserved(self, eos).flux(eos)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use glam::DVec3;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::{Conserved, Primitive};
    use crate::{gas_law::GasLaw, physical_quantities::State};

    #[test]
    fn test_conversions() {
        let primitives = State::<Primitive>::new(
            0.75,
            DVec3 {
                x: 0.4,
                y: 0.,
                z: 0.,
            },
            0.8,
        );
        let eos = GasLaw::new(5. / 3.).unwrap();
        let conserved = State::<Conserved>::from_primitives(&primitives, &eos);
        let primitives_new = State::<Primitive>::from_conserved(&conserved, &eos);

        assert_approx_eq!(
            f64,
            conserved.energy(),
            0.5 * 0.75 * 0.16 + 1.5 * 0.8,
            epsilon = 1e-12
        );
        assert_approx_eq!(f64, primitives.density(), primitives_new.density());
        assert_approx_eq!(f64, primitives.velocity().x, primitives_new.velocity().x);
        assert_approx_eq!(f64, primitives.velocity().y, primitives_new.velocity().y);
        assert_approx_eq!(f64, primitives.velocity().z, primitives_new.velocity().z);
        assert_approx_eq!(
            f64,
            primitives.pressure(),
            primitives_new.pressure(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_conversions_random() {
        let mut rng = StdRng::seed_from_u64(42);
        let eos = GasLaw::new(1.4).unwrap();
        for _ in 0..1000 {
            let primitives = State::<Primitive>::new(
                rng.gen_range(1e-3..1e3),
                DVec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                ),
                rng.gen_range(1e-3..1e3),
            );
            let conserved = State::<Conserved>::from_primitives(&primitives, &eos);
            let primitives_new = State::<Primitive>::from_conserved(&conserved, &eos);

            assert_approx_eq!(
                f64,
                primitives.density(),
                primitives_new.density(),
                epsilon = 1e-12 * primitives.density()
            );
            assert!((primitives.velocity() - primitives_new.velocity()).length() < 1e-9);
            assert_approx_eq!(
                f64,
                primitives.pressure(),
                primitives_new.pressure(),
                epsilon = 1e-6 * primitives.pressure().max(1.)
            );
        }
    }

    #[test]
    fn test_flux() {
        let eos = GasLaw::new(1.4).unwrap();
        let primitives = State::<Primitive>::new(2., DVec3::new(3., 1., 0.), 5.);
        let flux = primitives.flux(&eos);
        assert_approx_eq!(f64, flux.density(), 6.);
        assert_approx_eq!(f64, flux.momentum().x, 2. * 9. + 5.);
        assert_approx_eq!(f64, flux.momentum().y, 6.);
        assert_approx_eq!(f64, flux.momentum().z, 0.);
        // E = p / (gamma - 1) + rho |v|^2 / 2 = 12.5 + 10
        assert_approx_eq!(f64, flux.energy(), (22.5 + 5.) * 3., epsilon = 1e-12);

        let conserved = State::<Conserved>::from_primitives(&primitives, &eos);
        let flux_conserved = conserved.flux(&eos);
        assert_approx_eq!(f64, flux_conserved.energy(), flux.energy(), epsilon = 1e-12);
    }

    #[test]
    fn test_check_physical() {
        assert!(State::<Primitive>::new_1d(1., 0., 1.).check_physical().is_ok());
        assert!(State::<Primitive>::new_1d(-1., 0., 1.).check_physical().is_err());
        assert!(State::<Primitive>::new_1d(1., 0., 0.).check_physical().is_err());
        assert!(State::<Primitive>::new_1d(1., f64::NAN, 1.).check_physical().is_err());
    }
}
