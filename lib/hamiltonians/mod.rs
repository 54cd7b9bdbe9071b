//! Parametrized Hamiltonians and the rules for adding them together.

use std::ops::Add;
use ndarray::{ self as nd, s };
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    error::{ Error, MergeWarning, Result },
    observable::Observable,
    wires::Wires,
};

pub mod parametrized;
pub use parametrized::{ EvaluatedOperator, ParametrizedHamiltonian, Term };

pub mod rydberg;
pub use rydberg::{
    Register,
    RydbergHamiltonian,
    rydberg_drive,
    rydberg_interaction,
    rydberg_interaction_with,
};

/// Basic requirements for anything that can be rendered as a Hamiltonian
/// matrix.
///
/// All matrices are taken on [`Self::get_wires`] in ascending label order,
/// with the lowest label as the most significant qubit.
pub trait HBuild {
    /// Return a reference to the wires spanned by the Hamiltonian.
    fn get_wires(&self) -> &Wires;

    /// Build a time-independent Hamiltonian matrix, if possible.
    fn build_static(&self) -> Option<nd::Array2<C64>>;

    /// Build the Hamiltonian matrix at a given time.
    fn build_at(&self, params: &[Vec<f64>], t: f64) -> Result<nd::Array2<C64>>;

    /// Build the Hamiltonian as a 3D array, with the last axis corresponding
    /// to time.
    fn build(&self, params: &[Vec<f64>], time: &nd::Array1<f64>)
        -> Result<nd::Array3<C64>>
    {
        let n: usize = 1 << self.get_wires().len();
        let mut H: nd::Array3<C64> = nd::Array3::zeros((n, n, time.len()));
        for (k, t) in time.iter().enumerate() {
            self.build_at(params, *t)?.move_into(H.slice_mut(s![.., .., k]));
        }
        Ok(H)
    }
}

/// Result of adding Hamiltonians: a plain [`ParametrizedHamiltonian`] unless a
/// [`RydbergHamiltonian`] was involved.
#[derive(Clone, Debug, PartialEq)]
pub enum Hamiltonian {
    Parametrized(ParametrizedHamiltonian),
    Rydberg(RydbergHamiltonian),
}

impl Hamiltonian {
    pub fn is_rydberg(&self) -> bool { matches!(self, Self::Rydberg(_)) }

    /// Return the underlying parametrized Hamiltonian.
    pub fn as_parametrized(&self) -> &ParametrizedHamiltonian {
        match self {
            Self::Parametrized(h) => h,
            Self::Rydberg(h) => h.base(),
        }
    }

    pub fn into_rydberg(self) -> Option<RydbergHamiltonian> {
        match self {
            Self::Rydberg(h) => Some(h),
            Self::Parametrized(_) => None,
        }
    }

    pub fn into_parametrized(self) -> ParametrizedHamiltonian {
        match self {
            Self::Parametrized(h) => h,
            Self::Rydberg(h) => h.into_base(),
        }
    }
}

impl HBuild for Hamiltonian {
    fn get_wires(&self) -> &Wires { self.as_parametrized().wires() }

    fn build_static(&self) -> Option<nd::Array2<C64>> {
        self.as_parametrized().build_static()
    }

    fn build_at(&self, params: &[Vec<f64>], t: f64) -> Result<nd::Array2<C64>> {
        self.as_parametrized().build_at(params, t)
    }
}

/// Operand of a Hamiltonian addition.
#[derive(Clone, Debug, PartialEq)]
pub enum Summand {
    Rydberg(RydbergHamiltonian),
    Parametrized(ParametrizedHamiltonian),
    /// A plain operator. Scalar products and linear combinations are split
    /// into their weighted terms.
    Observable(Observable),
    /// An operator with a constant weight.
    Weighted(f64, Observable),
}

impl Summand {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rydberg(_) => "RydbergHamiltonian",
            Self::Parametrized(_) => "ParametrizedHamiltonian",
            Self::Observable(op) => op.name(),
            Self::Weighted(..) => "weighted Observable",
        }
    }

    fn is_hamiltonian(&self) -> bool {
        matches!(self, Self::Rydberg(_) | Self::Parametrized(_))
    }

    /// Decompose into Hamiltonian terms.
    pub fn into_terms(self) -> Vec<Term> {
        match self {
            Self::Rydberg(h) => h.into_base().into_terms().collect(),
            Self::Parametrized(h) => h.into_terms().collect(),
            Self::Observable(Observable::SProd(c, op)) => vec![Term::new(c, *op)],
            Self::Observable(Observable::Sum(terms))
                => terms.into_iter().map(Term::from).collect(),
            Self::Observable(op) => vec![Term::new(1.0, op)],
            Self::Weighted(c, op) => vec![Term::new(c, op)],
        }
    }
}

impl From<RydbergHamiltonian> for Summand {
    fn from(h: RydbergHamiltonian) -> Self { Self::Rydberg(h) }
}

impl From<&RydbergHamiltonian> for Summand {
    fn from(h: &RydbergHamiltonian) -> Self { Self::Rydberg(h.clone()) }
}

impl From<ParametrizedHamiltonian> for Summand {
    fn from(h: ParametrizedHamiltonian) -> Self { Self::Parametrized(h) }
}

impl From<&ParametrizedHamiltonian> for Summand {
    fn from(h: &ParametrizedHamiltonian) -> Self { Self::Parametrized(h.clone()) }
}

impl From<Hamiltonian> for Summand {
    fn from(h: Hamiltonian) -> Self {
        match h {
            Hamiltonian::Parametrized(h) => Self::Parametrized(h),
            Hamiltonian::Rydberg(h) => Self::Rydberg(h),
        }
    }
}

impl From<Observable> for Summand {
    fn from(op: Observable) -> Self { Self::Observable(op) }
}

impl From<&Observable> for Summand {
    fn from(op: &Observable) -> Self { Self::Observable(op.clone()) }
}

impl From<(f64, Observable)> for Summand {
    fn from(cop: (f64, Observable)) -> Self { Self::Weighted(cop.0, cop.1) }
}

/// Output of a Hamiltonian addition, with any non-fatal warnings raised while
/// merging.
#[derive(Clone, Debug, PartialEq)]
pub struct Combined<H = Hamiltonian> {
    pub hamiltonian: H,
    pub warnings: Vec<MergeWarning>,
}

impl<H> Combined<H> {
    pub(crate) fn clean(hamiltonian: H) -> Self {
        Self { hamiltonian, warnings: Vec::new() }
    }

    pub(crate) fn log_warnings(&self) {
        self.warnings.iter().for_each(|w| warn!("{}", w));
    }

    pub(crate) fn map<F, G>(self, f: F) -> Combined<G>
    where F: FnOnce(H) -> G
    {
        Combined { hamiltonian: f(self.hamiltonian), warnings: self.warnings }
    }
}

fn combine_quiet(lhs: Summand, rhs: Summand) -> Result<Combined> {
    match (lhs, rhs) {
        (Summand::Rydberg(a), rhs) => {
            a.merge_right(rhs).map(|c| c.map(Hamiltonian::Rydberg))
        },
        (lhs, Summand::Rydberg(b)) => {
            b.merge_left(lhs).map(|c| c.map(Hamiltonian::Rydberg))
        },
        (lhs, rhs) if lhs.is_hamiltonian() || rhs.is_hamiltonian() => {
            let h = ParametrizedHamiltonian::from_terms(
                lhs.into_terms().into_iter().chain(rhs.into_terms()));
            Ok(Combined::clean(Hamiltonian::Parametrized(h)))
        },
        (lhs, rhs) => Err(
            Error::IncompatibleOperands { lhs: lhs.kind(), rhs: rhs.kind() }),
    }
}

/// Add two operands, at least one of which must be a Hamiltonian.
///
/// The result is a [`RydbergHamiltonian`] if either operand is one, and a
/// [`ParametrizedHamiltonian`] otherwise. Terms are concatenated left then
/// right, after which callable-coefficient terms are moved behind all fixed
/// ones. Merge warnings are both returned and logged.
pub fn combine<L, R>(lhs: L, rhs: R) -> Result<Combined>
where
    L: Into<Summand>,
    R: Into<Summand>,
{
    let lhs = lhs.into();
    let rhs = rhs.into();
    debug!(lhs = lhs.kind(), rhs = rhs.kind(), "combining Hamiltonian terms");
    let combined = combine_quiet(lhs, rhs)?;
    combined.log_warnings();
    Ok(combined)
}

/// Add a sequence of operands left to right, starting from the empty
/// Hamiltonian.
///
/// Warnings raised at more than one step are reported once.
pub fn combine_all<I, T>(summands: I) -> Result<Combined>
where
    I: IntoIterator<Item = T>,
    T: Into<Summand>,
{
    let mut acc: Combined
        = Combined::clean(
            Hamiltonian::Parametrized(ParametrizedHamiltonian::default()));
    for summand in summands.into_iter() {
        let Combined { hamiltonian, warnings }
            = combine_quiet(acc.hamiltonian.into(), summand.into())?;
        acc.hamiltonian = hamiltonian;
        warnings.into_iter()
            .for_each(|w| if !acc.warnings.contains(&w) { acc.warnings.push(w); });
    }
    acc.log_warnings();
    Ok(acc)
}

impl<T> Add<T> for ParametrizedHamiltonian
where T: Into<Summand>
{
    type Output = Result<Hamiltonian>;

    fn add(self, rhs: T) -> Self::Output {
        combine(self, rhs).map(|c| c.hamiltonian)
    }
}

impl<'a, T> Add<T> for &'a ParametrizedHamiltonian
where T: Into<Summand>
{
    type Output = Result<Hamiltonian>;

    fn add(self, rhs: T) -> Self::Output {
        combine(self, rhs).map(|c| c.hamiltonian)
    }
}

impl<T> Add<T> for RydbergHamiltonian
where T: Into<Summand>
{
    type Output = Result<RydbergHamiltonian>;

    fn add(self, rhs: T) -> Self::Output {
        let combined = self.merge_right(rhs.into())?;
        combined.log_warnings();
        Ok(combined.hamiltonian)
    }
}

impl<'a, T> Add<T> for &'a RydbergHamiltonian
where T: Into<Summand>
{
    type Output = Result<RydbergHamiltonian>;

    fn add(self, rhs: T) -> Self::Output { self.clone() + rhs }
}

impl Add<RydbergHamiltonian> for Observable {
    type Output = Result<RydbergHamiltonian>;

    fn add(self, rhs: RydbergHamiltonian) -> Self::Output {
        let combined = rhs.merge_left(self.into())?;
        combined.log_warnings();
        Ok(combined.hamiltonian)
    }
}

impl<'a> Add<&'a RydbergHamiltonian> for &'a Observable {
    type Output = Result<RydbergHamiltonian>;

    fn add(self, rhs: &'a RydbergHamiltonian) -> Self::Output {
        self.clone() + rhs.clone()
    }
}
