//! A sum of operators weighted by fixed and parametrized coefficients.

use itertools::{ Either, Itertools };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    coefficient::Coefficient,
    error::{ Error, Result },
    hamiltonians::HBuild,
    observable::Observable,
    wires::Wires,
};

/// A single weighted operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub coeff: Coefficient,
    pub op: Observable,
}

impl Term {
    /// Create a new `Term`.
    pub fn new<C>(coeff: C, op: Observable) -> Self
    where C: Into<Coefficient>
    {
        Self { coeff: coeff.into(), op }
    }
}

impl<C> From<(C, Observable)> for Term
where C: Into<Coefficient>
{
    fn from(term: (C, Observable)) -> Self { Self::new(term.0, term.1) }
}

/// Hamiltonian `H(p, t) = Σ_i c_i O_i + Σ_j f_j(p_j, t) O_j`.
///
/// Coefficients and operators are kept in two parallel lists in which every
/// fixed coefficient precedes every callable one; construction applies a
/// stable partition, so terms keep their relative order within each group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParametrizedHamiltonian {
    coeffs: Vec<Coefficient>,
    ops: Vec<Observable>,
    n_fixed: usize,
    wires: Wires,
}

impl ParametrizedHamiltonian {
    /// Create a new `ParametrizedHamiltonian` from paired coefficients and
    /// operators.
    pub fn new(coeffs: Vec<Coefficient>, ops: Vec<Observable>) -> Result<Self> {
        if coeffs.len() != ops.len() {
            return Err(
                Error::LengthMismatch { coeffs: coeffs.len(), ops: ops.len() });
        }
        Ok(
            Self::from_terms(
                coeffs.into_iter().zip(ops).map(|(coeff, op)| Term { coeff, op })
            )
        )
    }

    /// Create a new `ParametrizedHamiltonian` from a sequence of terms.
    pub fn from_terms<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let (fixed, parametrized): (Vec<Term>, Vec<Term>)
            = terms.into_iter()
            .map(Into::<Term>::into)
            .partition_map(|t| {
                if t.coeff.is_callable() { Either::Right(t) } else { Either::Left(t) }
            });
        let n_fixed = fixed.len();
        let (coeffs, ops): (Vec<Coefficient>, Vec<Observable>)
            = fixed.into_iter().chain(parametrized)
            .map(|Term { coeff, op }| (coeff, op))
            .unzip();
        let wires: Wires
            = ops.iter().map(|op| op.wires()).collect::<Vec<_>>()
            .iter().collect();
        Self { coeffs, ops, n_fixed, wires }
    }

    /// All coefficients, fixed first.
    pub fn coeffs(&self) -> &[Coefficient] { &self.coeffs }

    /// All operators, in the same order as [`Self::coeffs`].
    pub fn ops(&self) -> &[Observable] { &self.ops }

    pub fn coeffs_fixed(&self) -> &[Coefficient] { &self.coeffs[..self.n_fixed] }

    pub fn ops_fixed(&self) -> &[Observable] { &self.ops[..self.n_fixed] }

    pub fn coeffs_parametrized(&self) -> &[Coefficient] {
        &self.coeffs[self.n_fixed..]
    }

    pub fn ops_parametrized(&self) -> &[Observable] { &self.ops[self.n_fixed..] }

    /// Union of all operator wires, in first-seen order.
    pub fn wires(&self) -> &Wires { &self.wires }

    /// Number of terms.
    pub fn len(&self) -> usize { self.coeffs.len() }

    pub fn is_empty(&self) -> bool { self.coeffs.is_empty() }

    /// Number of callable coefficients, i.e. the number of parameter entries
    /// expected on evaluation.
    pub fn num_parametrized(&self) -> usize { self.coeffs.len() - self.n_fixed }

    /// Iterate over `(coefficient, operator)` pairs.
    pub fn terms(&self) -> impl Iterator<Item = (&Coefficient, &Observable)> + '_ {
        self.coeffs.iter().zip(self.ops.iter())
    }

    /// Consume `self` and return its terms in order.
    pub fn into_terms(self) -> impl Iterator<Item = Term> {
        self.coeffs.into_iter().zip(self.ops)
            .map(|(coeff, op)| Term { coeff, op })
    }

    /// Return the fixed part as a single operator: the additive zero if there
    /// are no fixed terms, a scalar product if there is one, and a linear
    /// combination otherwise.
    pub fn H_fixed(&self) -> Observable {
        let terms: Vec<(f64, Observable)>
            = self.coeffs_fixed().iter().zip(self.ops_fixed())
            .filter_map(|(c, op)| c.as_fixed().map(|c| (c, op.clone())))
            .collect();
        match <[(f64, Observable); 1]>::try_from(terms) {
            Ok([(c, op)]) => Observable::s_prod(c, op),
            Err(terms) => Observable::Sum(terms),
        }
    }

    /// Evaluate the parametrized part at `(params, t)` as a linear combination.
    pub fn H_parametrized(&self, params: &[Vec<f64>], t: f64)
        -> Result<Observable>
    {
        self.check_params(params)?;
        Ok(
            Observable::Sum(
                self.coeffs_parametrized().iter()
                    .zip(params)
                    .map(|(c, p)| c.eval(p, t))
                    .zip(self.ops_parametrized().iter().cloned())
                    .collect()
            )
        )
    }

    /// Evaluate every coefficient at `(params, t)`, where `params` holds one
    /// entry per callable coefficient, in order.
    pub fn call(&self, params: &[Vec<f64>], t: f64) -> Result<EvaluatedOperator> {
        self.check_params(params)?;
        let values
            = self.coeffs_fixed().iter()
            .map(|c| c.eval(&[], t))
            .chain(
                self.coeffs_parametrized().iter()
                    .zip(params)
                    .map(|(c, p)| c.eval(p, t))
            );
        let terms: Vec<(f64, Observable)>
            = values.zip(self.ops.iter().cloned()).collect();
        Ok(EvaluatedOperator { terms, wires: self.wires.clone() })
    }

    fn check_params(&self, params: &[Vec<f64>]) -> Result<()> {
        let expected = self.num_parametrized();
        if params.len() != expected {
            return Err(Error::ParamCount { expected, got: params.len() });
        }
        Ok(())
    }
}

impl HBuild for ParametrizedHamiltonian {
    fn get_wires(&self) -> &Wires { &self.wires }

    fn build_static(&self) -> Option<nd::Array2<C64>> {
        (self.num_parametrized() == 0)
            .then(|| {
                Observable::Sum(
                    self.terms()
                        .filter_map(|(c, op)| c.as_fixed().map(|c| (c, op.clone())))
                        .collect()
                )
            })
            .map(|h| h.embed(&self.wires.sorted()))
    }

    fn build_at(&self, params: &[Vec<f64>], t: f64) -> Result<nd::Array2<C64>> {
        Ok(self.call(params, t)?.matrix())
    }
}

/// A Hamiltonian with every coefficient evaluated to a number.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedOperator {
    terms: Vec<(f64, Observable)>,
    wires: Wires,
}

impl EvaluatedOperator {
    /// Evaluated `(coefficient, operator)` pairs.
    pub fn terms(&self) -> &[(f64, Observable)] { &self.terms }

    pub fn wires(&self) -> &Wires { &self.wires }

    /// Return the operator as a linear combination.
    pub fn to_observable(&self) -> Observable { Observable::Sum(self.terms.clone()) }

    /// Matrix representation on [`Self::wires`] sorted by label, so that the
    /// result does not depend on the order in which terms were added.
    pub fn matrix(&self) -> nd::Array2<C64> {
        self.to_observable().embed(&self.wires.sorted())
    }

    /// Matrix representation on an arbitrary wire order containing
    /// [`Self::wires`].
    pub fn matrix_on(&self, order: &Wires) -> Result<nd::Array2<C64>> {
        self.to_observable().matrix_on(order)
    }
}
