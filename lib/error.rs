//! Error and warning types.

use thiserror::Error;
use crate::wires::{ Wire, Wires };

/// Errors produced while constructing, combining, or evaluating Hamiltonians.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Coefficients and observables must pair up one-to-one.
    #[error("got {coeffs} coefficients for {ops} observables")]
    LengthMismatch { coeffs: usize, ops: usize },

    /// An interaction register was given a wire list of the wrong length.
    #[error(
        "The length of the wires and the register must match: \
        got {wires} wires for {atoms} atoms"
    )]
    WireRegisterMismatch { wires: usize, atoms: usize },

    /// The same wire was assigned to two atoms.
    #[error("wire {0} appears more than once in the register")]
    DuplicateWire(Wire),

    /// Atom coordinates must all be 2D or all be 3D.
    #[error("atom {index} has a {dim}-dimensional coordinate; expected {expected}")]
    InvalidCoordinate { index: usize, dim: usize, expected: &'static str },

    /// An atom coordinate is NaN or infinite.
    #[error("atom {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Two atoms sit on top of each other, making the 1/r^6 coupling diverge.
    #[error("atoms on wires {0} and {1} are at zero separation")]
    CoincidentAtoms(Wire, Wire),

    /// Both operands of an addition carry an interaction term.
    #[error(
        "We cannot add two Hamiltonians with an interaction term. \
        Use a single interaction term to describe the full Rydberg ensemble."
    )]
    MultipleInteractions,

    /// Neither operand of an addition is a Hamiltonian.
    #[error("no Hamiltonian addition applies to a {lhs} and a {rhs}")]
    IncompatibleOperands { lhs: &'static str, rhs: &'static str },

    /// A drive was given no wires to act on.
    #[error("a drive term needs at least one wire")]
    NoWires,

    /// Evaluation received the wrong number of parameter entries.
    #[error("expected {expected} parameter entries (one per callable coefficient), got {got}")]
    ParamCount { expected: usize, got: usize },

    /// A dense operator's shape does not fit its wires.
    #[error("a {rows}x{cols} matrix cannot act on {nwires} wires")]
    MatrixShape { rows: usize, cols: usize, nwires: usize },

    /// A basis projector needs exactly one bit per wire.
    #[error("a projector with {bits} bits cannot act on {nwires} wires")]
    ProjectorShape { bits: usize, nwires: usize },

    /// A matrix was requested on a wire order that misses some of the
    /// operator's wires.
    #[error("wire order {order:?} does not contain operator wires {wires:?}")]
    MissingWires { order: Wires, wires: Wires },

    /// An interaction coefficient or cutoff distance is zero, negative, or
    /// not finite.
    #[error("`{name}` must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal conditions detected while combining Hamiltonians.
///
/// These never abort a merge; they are returned alongside the result and
/// logged through `tracing`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MergeWarning {
    /// A pulse drives wires that no interaction term couples.
    #[error(
        "The wires of the laser fields are not present in the Rydberg ensemble: \
        pulse {pulse} acts on {uncovered:?}, which the interaction term does not couple"
    )]
    UncoveredPulseWires { pulse: usize, uncovered: Wires },
}
