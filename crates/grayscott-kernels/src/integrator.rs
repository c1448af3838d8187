//! Explicit one-step time integrators.
//!
//! Each scheme returns the increment `delta` for one step; the caller
//! adds it to the state. The derivative is any `Fn(&Field, f64) -> Field`
//! returning `a * f(y)` for a trial state `y` and stage weight `a`,
//! typically a closure over the Laplacian and reaction term of the
//! current timestep (see [`ReactionKinetics`](crate::ReactionKinetics)).
//! Taking the weight lets the derivative write each stage in one pass.
//!
//! Arithmetic is plain `f64` throughout. NaN and infinity are not
//! special-cased and propagate into the result.

use std::fmt;
use std::str::FromStr;

use grayscott_core::Field;

/// Time integration scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Integrator {
    /// Explicit Euler, order 1: `delta = dt * f(y)`.
    #[default]
    Euler,
    /// Explicit midpoint, order 2:
    /// `k1 = dt/2 * f(y)`, `delta = dt * f(y + k1)`.
    Midpoint,
    /// Classical fourth-order Runge-Kutta.
    Rk4,
}

impl Integrator {
    /// Compute the increment for one step of size `dt` from state `y`.
    ///
    /// `f(x, a)` must return `a * f(x)`; it is called [`stages`](Self::stages)
    /// times.
    pub fn advance<F>(&self, y: &Field, dt: f64, f: F) -> Field
    where
        F: Fn(&Field, f64) -> Field,
    {
        match self {
            Self::Euler => f(y, dt),
            Self::Midpoint => {
                let k1 = f(y, dt * 0.5);
                f(&y.add_scaled(&k1, 1.0), dt)
            }
            Self::Rk4 => {
                let k1 = f(y, dt);
                let k2 = f(&y.add_scaled(&k1, 0.5), dt);
                let k3 = f(&y.add_scaled(&k2, 0.5), dt);
                let k4 = f(&y.add_scaled(&k3, 1.0), dt);

                let mut delta = k1;
                for (((d, &b), &c), &e) in delta
                    .as_mut_slice()
                    .iter_mut()
                    .zip(k2.as_slice())
                    .zip(k3.as_slice())
                    .zip(k4.as_slice())
                {
                    *d = (*d + 2.0 * b + 2.0 * c + e) / 6.0;
                }
                delta
            }
        }
    }

    /// Global order of accuracy.
    pub fn order(&self) -> u32 {
        match self {
            Self::Euler => 1,
            Self::Midpoint => 2,
            Self::Rk4 => 4,
        }
    }

    /// Derivative evaluations per step.
    pub fn stages(&self) -> u32 {
        match self {
            Self::Euler => 1,
            Self::Midpoint => 2,
            Self::Rk4 => 4,
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euler => write!(f, "euler"),
            Self::Midpoint => write!(f, "midpoint"),
            Self::Rk4 => write!(f, "rk4"),
        }
    }
}

impl FromStr for Integrator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" | "exp_euler" => Ok(Self::Euler),
            "midpoint" => Ok(Self::Midpoint),
            "rk4" | "runge-kutta" => Ok(Self::Rk4),
            other => Err(format!(
                "unknown integrator '{other}', expected euler, midpoint or rk4"
            )),
        }
    }
}
