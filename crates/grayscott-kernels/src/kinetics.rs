//! Gray-Scott reaction terms.
//!
//! ```text
//! du/dt = Du ∇²u - u v² + F (1 - u)
//! dv/dt = Dv ∇²v + u v² - (F + k) v
//! ```
//!
//! The Laplacians and the `u v²` term are computed once per timestep and
//! held fixed while an integrator evaluates the rate at trial states.

use grayscott_core::Field;

use crate::parameters::ParameterField;

/// Diffusion coefficients plus the pointwise rate functions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactionKinetics {
    /// Diffusion rate of U.
    pub du: f64,
    /// Diffusion rate of V.
    pub dv: f64,
}

impl ReactionKinetics {
    /// Create kinetics with the given diffusion rates.
    pub fn new(du: f64, dv: f64) -> Self {
        Self { du, dv }
    }

    /// Elementwise `u ⊙ v ⊙ v`.
    pub fn uvv(u: &Field, v: &Field) -> Field {
        u.zip_map(v, |a, b| a * b * b)
    }

    /// Elementwise `u ⊙ v ⊙ v` into a caller-owned buffer.
    pub fn uvv_into(u: &Field, v: &Field, out: &mut Field) {
        for ((o, &a), &b) in out
            .as_mut_slice()
            .iter_mut()
            .zip(u.as_slice())
            .zip(v.as_slice())
        {
            *o = a * b * b;
        }
    }

    /// `du * lap_u - uvv + feed * (1 - u)`, evaluated at trial state `u`.
    pub fn u_rate(&self, u: &Field, lap_u: &Field, uvv: &Field, params: &ParameterField) -> Field {
        self.u_rate_scaled(u, lap_u, uvv, params, 1.0)
    }

    /// `scale * u_rate(..)` written in a single pass.
    pub fn u_rate_scaled(
        &self,
        u: &Field,
        lap_u: &Field,
        uvv: &Field,
        params: &ParameterField,
        scale: f64,
    ) -> Field {
        let (lap, uvv) = (lap_u.as_slice(), uvv.as_slice());
        u.map_indexed(|i, x| scale * (self.du * lap[i] - uvv[i] + params.feed_at(i) * (1.0 - x)))
    }

    /// `dv * lap_v + uvv - (feed + kill) * v`, evaluated at trial state `v`.
    pub fn v_rate(&self, v: &Field, lap_v: &Field, uvv: &Field, params: &ParameterField) -> Field {
        self.v_rate_scaled(v, lap_v, uvv, params, 1.0)
    }

    /// `scale * v_rate(..)` written in a single pass.
    pub fn v_rate_scaled(
        &self,
        v: &Field,
        lap_v: &Field,
        uvv: &Field,
        params: &ParameterField,
        scale: f64,
    ) -> Field {
        let (lap, uvv) = (lap_v.as_slice(), uvv.as_slice());
        v.map_indexed(|i, x| {
            scale * (self.dv * lap[i] + uvv[i] - (params.feed_at(i) + params.kill_at(i)) * x)
        })
    }

    /// Bind the timestep's Laplacian and reaction term into the weighted
    /// derivative of U consumed by an [`Integrator`](crate::Integrator).
    pub fn bind_u<'a>(
        &'a self,
        lap_u: &'a Field,
        uvv: &'a Field,
        params: &'a ParameterField,
    ) -> impl Fn(&Field, f64) -> Field + 'a {
        move |u, scale| self.u_rate_scaled(u, lap_u, uvv, params, scale)
    }

    /// Bind the timestep's Laplacian and reaction term into the weighted
    /// derivative of V.
    pub fn bind_v<'a>(
        &'a self,
        lap_v: &'a Field,
        uvv: &'a Field,
        params: &'a ParameterField,
    ) -> impl Fn(&Field, f64) -> Field + 'a {
        move |v, scale| self.v_rate_scaled(v, lap_v, uvv, params, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(n: usize, v: f64) -> Field {
        Field::filled(n, v).unwrap()
    }

    #[test]
    fn uvv_products() {
        let u = f(2, 0.5);
        let v = f(2, 0.25);
        assert_eq!(ReactionKinetics::uvv(&u, &v), f(2, 0.5 * 0.25 * 0.25));

        let mut out = f(2, 9.0);
        ReactionKinetics::uvv_into(&u, &v, &mut out);
        assert_eq!(out, f(2, 0.03125));
    }

    #[test]
    fn unreacted_state_is_stationary() {
        // U = 1, V = 0: no reaction, feed term vanishes, no diffusion.
        let k = ReactionKinetics::new(2e-5, 1e-5);
        let params = ParameterField::Uniform {
            feed: 0.04,
            kill: 0.06,
        };
        let u = f(3, 1.0);
        let v = f(3, 0.0);
        let zero = f(3, 0.0);
        let uvv = ReactionKinetics::uvv(&u, &v);
        assert_eq!(k.u_rate(&u, &zero, &uvv, &params), zero);
        assert_eq!(k.v_rate(&v, &zero, &uvv, &params), zero);
    }

    #[test]
    fn rates_match_formula() {
        let k = ReactionKinetics::new(0.2, 0.1);
        let params = ParameterField::Uniform {
            feed: 0.04,
            kill: 0.06,
        };
        let u = f(1, 0.5);
        let v = f(1, 0.25);
        let lap = f(1, 2.0);
        let uvv = ReactionKinetics::uvv(&u, &v);
        let r = 0.5 * 0.25 * 0.25;

        let du = k.u_rate(&u, &lap, &uvv, &params).get(0, 0);
        assert!((du - (0.2 * 2.0 - r + 0.04 * 0.5)).abs() < 1e-15);

        let dv = k.v_rate(&v, &lap, &uvv, &params).get(0, 0);
        assert!((dv - (0.1 * 2.0 + r - 0.1 * 0.25)).abs() < 1e-15);
    }

    #[test]
    fn ramped_parameters_are_read_per_cell() {
        let k = ReactionKinetics::new(0.0, 0.0);
        let params = ParameterField::build(0.0, 0.0, 0.1, 0.2, 2).unwrap();
        let u = f(2, 0.0);
        let zero = f(2, 0.0);
        // u_rate = feed * (1 - 0) = feed
        let du = k.u_rate(&u, &zero, &zero, &params);
        assert_eq!(du.row(0), &[0.1, 0.1]);
        assert_eq!(du.row(1), &[0.0, 0.0]);

        // v_rate = -(feed + kill) * v with v = 1
        let v = f(2, 1.0);
        let dv = k.v_rate(&v, &zero, &zero, &params);
        assert_eq!(dv.get(0, 0), -0.1);
        assert_eq!(dv.get(0, 1), -(0.1 + 0.2));
        assert_eq!(dv.get(1, 1), -0.2);
    }

    #[test]
    fn bound_derivative_only_varies_with_its_argument() {
        let k = ReactionKinetics::new(0.1, 0.05);
        let params = ParameterField::Uniform {
            feed: 0.03,
            kill: 0.06,
        };
        let lap = f(2, 0.5);
        let uvv = f(2, 0.01);
        let du = k.bind_u(&lap, &uvv, &params);
        let a = du(&f(2, 0.2), 1.0);
        let b = du(&f(2, 0.2), 1.0);
        assert_eq!(a, b);
        assert_eq!(a, k.u_rate(&f(2, 0.2), &lap, &uvv, &params));

        let dv = k.bind_v(&lap, &uvv, &params);
        assert_eq!(dv(&f(2, 0.3), 1.0), k.v_rate(&f(2, 0.3), &lap, &uvv, &params));
    }

    #[test]
    fn weighted_rate_equals_scaled_rate() {
        let k = ReactionKinetics::new(0.16, 0.08);
        let params = ParameterField::build(0.02, 0.05, 0.06, 0.07, 3).unwrap();
        let u = Field::from_fn(3, |r, c| 0.9 - 0.05 * (r + c) as f64).unwrap();
        let v = Field::from_fn(3, |r, c| 0.01 * (r * 3 + c) as f64).unwrap();
        let lap = Field::from_fn(3, |r, c| (r as f64 - c as f64) * 0.3).unwrap();
        let uvv = ReactionKinetics::uvv(&u, &v);

        for dt in [0.5, 1.0, 0.125] {
            let du = k.bind_u(&lap, &uvv, &params);
            assert_eq!(du(&u, dt), k.u_rate(&u, &lap, &uvv, &params).scaled(dt));
            let dv = k.bind_v(&lap, &uvv, &params);
            assert_eq!(dv(&v, dt), k.v_rate(&v, &lap, &uvv, &params).scaled(dt));
        }
    }
}
