#![allow(non_snake_case)]

//! Composable, time-dependent Hamiltonians for driven Rydberg atom arrays.
//!
//! Hamiltonians are sums of operator terms whose coefficients are either
//! constants or functions of a parameter vector and time. Interaction terms
//! are built from atom positions with [`rydberg_interaction`], drive terms
//! from laser pulse parameters with [`rydberg_drive`], and the two are added
//! with [`combine`] or `+`:
//!
//! ```
//! use rydberg_pulse::{ Coefficient, rydberg_drive, rydberg_interaction };
//!
//! let coords = [[0.0, 0.0], [0.0, 5.0], [5.0, 0.0]];
//! let H_int = rydberg_interaction(coords, None, 862690.0, None).unwrap();
//! let amp = Coefficient::callable(|p, t| p[0] * t.sin());
//! let H_drive = rydberg_drive(amp, 0.5, 0.0, vec![0_usize, 1, 2]).unwrap();
//! let H = (H_int + H_drive).unwrap();
//! let h = H.call(&[vec![1.2]], 0.3).unwrap().matrix();
//! assert_eq!(h.dim(), (8, 8));
//! ```

pub mod error;
pub mod config;
pub mod wires;
pub mod observable;
pub mod coefficient;
pub mod pulse;
pub mod hamiltonians;

pub use error::{ Error, MergeWarning, Result };
pub use config::{ DEFAULT_INTERACTION_COEFF, InteractionConfig };
pub use wires::{ Wire, Wires };
pub use observable::{ BasisProjector, DenseOperator, Observable };
pub use coefficient::{ CoeffFn, Coefficient };
pub use pulse::Pulse;
pub use hamiltonians::{
    Combined,
    EvaluatedOperator,
    HBuild,
    Hamiltonian,
    ParametrizedHamiltonian,
    Register,
    RydbergHamiltonian,
    Summand,
    Term,
    combine,
    combine_all,
    rydberg_drive,
    rydberg_interaction,
    rydberg_interaction_with,
};
