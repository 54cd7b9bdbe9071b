//! Laser drive records.

use crate::{
    coefficient::Coefficient,
    wires::Wires,
};

/// Amplitude, detuning, and phase of a laser field addressing a set of wires.
///
/// A `Pulse` is a plain record: it does not contribute terms to a Hamiltonian
/// by itself, but is carried alongside the terms produced by
/// [`rydberg_drive`][crate::hamiltonians::rydberg_drive] for consumers that
/// need the drive parameters. Equality compares all four fields; callable
/// parameters compare by identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    amplitude: Coefficient,
    detuning: Coefficient,
    phase: Coefficient,
    wires: Wires,
}

impl Pulse {
    /// Create a new `Pulse`.
    pub fn new<A, D, P, W>(amplitude: A, detuning: D, phase: P, wires: W) -> Self
    where
        A: Into<Coefficient>,
        D: Into<Coefficient>,
        P: Into<Coefficient>,
        W: Into<Wires>,
    {
        Self {
            amplitude: amplitude.into(),
            detuning: detuning.into(),
            phase: phase.into(),
            wires: wires.into(),
        }
    }

    pub fn amplitude(&self) -> &Coefficient { &self.amplitude }

    pub fn detuning(&self) -> &Coefficient { &self.detuning }

    pub fn phase(&self) -> &Coefficient { &self.phase }

    /// Wires addressed by the drive.
    pub fn wires(&self) -> &Wires { &self.wires }

    /// Return `true` if any of the drive parameters is callable.
    pub fn is_parametrized(&self) -> bool {
        self.amplitude.is_callable()
            || self.detuning.is_callable()
            || self.phase.is_callable()
    }
}
