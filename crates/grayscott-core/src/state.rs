//! Two-species grid state and emitted snapshots.

use std::fmt;

use crate::error::StateError;
use crate::field::Field;

/// One of the two chemical species of the Gray-Scott model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    /// The substrate, replenished by the feed rate.
    U,
    /// The autocatalyst, removed by the feed plus kill rate.
    V,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U => write!(f, "u"),
            Self::V => write!(f, "v"),
        }
    }
}

/// Concentrations of both species on a shared `n x n` torus.
///
/// The two fields always have identical side lengths; construction
/// rejects mismatched shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct GridState {
    u: Field,
    v: Field,
}

impl GridState {
    /// Pair two fields, checking that their shapes agree.
    pub fn new(u: Field, v: Field) -> Result<Self, StateError> {
        if u.n() != v.n() {
            return Err(StateError::ShapeMismatch { u: u.n(), v: v.n() });
        }
        Ok(Self { u, v })
    }

    /// The unreacted steady state: `U = 1` and `V = 0` everywhere.
    pub fn baseline(n: usize) -> Result<Self, StateError> {
        Ok(Self {
            u: Field::filled(n, 1.0)?,
            v: Field::zeros(n)?,
        })
    }

    /// Side length shared by both species.
    pub fn n(&self) -> usize {
        self.u.n()
    }

    /// Concentration of U.
    pub fn u(&self) -> &Field {
        &self.u
    }

    /// Concentration of V.
    pub fn v(&self) -> &Field {
        &self.v
    }

    /// Field of the requested species.
    pub fn species(&self, species: Species) -> &Field {
        match species {
            Species::U => &self.u,
            Species::V => &self.v,
        }
    }

    /// Mutable access to both fields at once.
    ///
    /// Borrowing both together keeps the shapes in lockstep: callers
    /// can write cells but cannot swap in a field of another size.
    pub fn fields_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (self.u.as_mut_slice(), self.v.as_mut_slice())
    }

    /// Add per-species increments in place.
    pub fn apply(&mut self, delta_u: &Field, delta_v: &Field) {
        self.u.add_assign(delta_u);
        self.v.add_assign(delta_v);
    }

    /// Split into the owned U and V fields.
    pub fn into_fields(self) -> (Field, Field) {
        (self.u, self.v)
    }
}

/// A copy of one species' field at a given timestep.
///
/// Ownership moves to the sink; the simulation keeps no reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Timestep after which the field was captured.
    pub timestep: u64,
    /// Output frame number (`timestep / out_freq`).
    pub frame: u64,
    /// Which species `field` holds.
    pub species: Species,
    /// The captured concentrations.
    pub field: Field,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_unreacted() {
        let s = GridState::baseline(4).unwrap();
        assert!(s.u().as_slice().iter().all(|&x| x == 1.0));
        assert!(s.v().as_slice().iter().all(|&x| x == 0.0));
        assert_eq!(s.n(), 4);
    }

    #[test]
    fn mismatched_species_rejected() {
        let u = Field::zeros(3).unwrap();
        let v = Field::zeros(4).unwrap();
        assert_eq!(
            GridState::new(u, v),
            Err(StateError::ShapeMismatch { u: 3, v: 4 })
        );
    }

    #[test]
    fn apply_adds_both_increments() {
        let mut s = GridState::baseline(2).unwrap();
        let du = Field::filled(2, -0.25).unwrap();
        let dv = Field::filled(2, 0.25).unwrap();
        s.apply(&du, &dv);
        assert_eq!(s.species(Species::U), &Field::filled(2, 0.75).unwrap());
        assert_eq!(s.species(Species::V), &Field::filled(2, 0.25).unwrap());
    }

    #[test]
    fn species_display() {
        assert_eq!(Species::U.to_string(), "u");
        assert_eq!(Species::V.to_string(), "v");
    }
}
