//! Matrix-representable operators on labeled wires.
//!
//! An [`Observable`] is a small symbolic expression tree over single-qubit
//! Pauli and number operators, dense matrices, products, scalar products, and
//! linear combinations. Every observable knows the wires it touches and can be
//! rendered as a dense matrix on any wire order containing them, with the first
//! wire in the order taken as the most significant qubit. Without an explicit
//! order, wires are taken in ascending label order.

use ndarray::{ self as nd, linalg::kron };
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::{
    error::{ Error, Result },
    wires::{ Wire, Wires },
};

/// An operator acting on a set of wires.
#[derive(Clone, Debug, PartialEq)]
pub enum Observable {
    /// Identity on the given wires.
    Identity(Wires),
    /// Pauli-X.
    PauliX(Wire),
    /// Pauli-Y.
    PauliY(Wire),
    /// Pauli-Z.
    PauliZ(Wire),
    /// Occupation of the excited level, |1⟩⟨1| = (I - Z) / 2.
    Number(Wire),
    /// Computational basis projector |b⟩⟨b|, one bit per wire.
    Projector(BasisProjector),
    /// Dense operator on the given wires.
    Matrix(DenseOperator),
    /// Operator product, applied right to left. On disjoint wires this is the
    /// tensor product.
    Prod(Vec<Observable>),
    /// Scalar multiple.
    SProd(f64, Box<Observable>),
    /// Linear combination. The empty sum is the additive zero.
    Sum(Vec<(f64, Observable)>),
}

impl Observable {
    /// The additive zero.
    pub fn zero() -> Self { Self::Sum(Vec::new()) }

    /// Return `true` if `self` is the empty sum.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Sum(terms) if terms.is_empty())
    }

    /// Construct a dense operator. See [`DenseOperator::new`].
    pub fn from_matrix<W>(matrix: nd::Array2<C64>, wires: W) -> Result<Self>
    where W: Into<Wires>
    {
        DenseOperator::new(matrix, wires).map(Self::Matrix)
    }

    /// Construct a basis projector. See [`BasisProjector::new`].
    pub fn projector<B, W>(bits: B, wires: W) -> Result<Self>
    where
        B: IntoIterator<Item = bool>,
        W: Into<Wires>,
    {
        BasisProjector::new(bits, wires).map(Self::Projector)
    }

    /// Scalar product `c * op`.
    pub fn s_prod(c: f64, op: Observable) -> Self {
        Self::SProd(c, Box::new(op))
    }

    /// Operator product `self @ other`, flattening nested products.
    pub fn prod(self, other: Observable) -> Self {
        let mut factors = match self {
            Self::Prod(f) => f,
            op => vec![op],
        };
        match other {
            Self::Prod(f) => factors.extend(f),
            op => factors.push(op),
        }
        Self::Prod(factors)
    }

    /// Linear combination of `coeffs` and `ops`, zipped.
    pub fn linear_combination<C, O>(coeffs: C, ops: O) -> Self
    where
        C: IntoIterator<Item = f64>,
        O: IntoIterator<Item = Observable>,
    {
        Self::Sum(coeffs.into_iter().zip(ops).collect())
    }

    /// Short name of the variant, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity(_) => "Identity",
            Self::PauliX(_) => "PauliX",
            Self::PauliY(_) => "PauliY",
            Self::PauliZ(_) => "PauliZ",
            Self::Number(_) => "Number",
            Self::Projector(..) => "Projector",
            Self::Matrix(..) => "Matrix",
            Self::Prod(_) => "Prod",
            Self::SProd(..) => "SProd",
            Self::Sum(_) => "Sum",
        }
    }

    /// Wires touched by the operator, in first-seen order.
    pub fn wires(&self) -> Wires {
        match self {
            Self::Identity(w) => w.clone(),
            Self::Projector(p) => p.wires.clone(),
            Self::Matrix(m) => m.wires.clone(),
            Self::PauliX(w) | Self::PauliY(w) | Self::PauliZ(w) | Self::Number(w)
                => Wires::from(*w),
            Self::Prod(factors)
                => factors.iter().map(|op| op.wires()).collect::<Vec<_>>()
                    .iter().collect(),
            Self::SProd(_, op) => op.wires(),
            Self::Sum(terms)
                => terms.iter().map(|(_, op)| op.wires()).collect::<Vec<_>>()
                    .iter().collect(),
        }
    }

    /// Matrix representation on the operator's own wires, sorted by label.
    pub fn matrix(&self) -> nd::Array2<C64> {
        self.embed(&self.wires().sorted())
    }

    /// Matrix representation on the Hilbert space spanned by `order`, which
    /// must contain every wire of the operator.
    pub fn matrix_on(&self, order: &Wires) -> Result<nd::Array2<C64>> {
        let wires = self.wires();
        if !order.contains_wires(&wires) {
            return Err(Error::MissingWires { order: order.clone(), wires });
        }
        Ok(self.embed(order))
    }

    // assumes `order` covers all of `self.wires()`
    pub(crate) fn embed(&self, order: &Wires) -> nd::Array2<C64> {
        let n = order.len();
        match self {
            Self::Identity(_) => nd::Array2::eye(1 << n),
            Self::PauliX(w) => single_site(&pauli_x(), *w, order),
            Self::PauliY(w) => single_site(&pauli_y(), *w, order),
            Self::PauliZ(w) => single_site(&pauli_z(), *w, order),
            Self::Number(w) => single_site(&number(), *w, order),
            Self::Projector(p) => multi_site(&p.local_matrix(), &p.wires, order),
            Self::Matrix(m) => multi_site(&m.matrix, &m.wires, order),
            Self::Prod(factors) => {
                factors.iter()
                    .fold(
                        nd::Array2::eye(1 << n),
                        |acc: nd::Array2<C64>, op| acc.dot(&op.embed(order)),
                    )
            },
            Self::SProd(c, op) => op.embed(order) * C64::from(*c),
            Self::Sum(terms) => {
                terms.iter()
                    .fold(
                        nd::Array2::zeros((1 << n, 1 << n)),
                        |acc: nd::Array2<C64>, (c, op)| {
                            acc + op.embed(order) * C64::from(*c)
                        },
                    )
            },
        }
    }
}

/// A dense `2^n x 2^n` operator on `n` wires.
///
/// Only constructed through [`DenseOperator::new`], so the shape always fits
/// the wires.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseOperator {
    matrix: nd::Array2<C64>,
    wires: Wires,
}

impl DenseOperator {
    /// Create a new `DenseOperator`, checking that the matrix is square with
    /// side `2^n` for `n` wires.
    pub fn new<W>(matrix: nd::Array2<C64>, wires: W) -> Result<Self>
    where W: Into<Wires>
    {
        let wires = wires.into();
        let (rows, cols) = matrix.dim();
        if rows != cols || rows != 1 << wires.len() {
            return Err(Error::MatrixShape { rows, cols, nwires: wires.len() });
        }
        Ok(Self { matrix, wires })
    }

    /// The matrix, with the first of [`Self::wires`] as the most significant
    /// qubit.
    pub fn matrix(&self) -> nd::ArrayView2<'_, C64> { self.matrix.view() }

    pub fn wires(&self) -> &Wires { &self.wires }
}

/// A computational basis projector |b⟩⟨b| with one bit per wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasisProjector {
    bits: Vec<bool>,
    wires: Wires,
}

impl BasisProjector {
    /// Create a new `BasisProjector`, checking that there is one bit per wire.
    pub fn new<B, W>(bits: B, wires: W) -> Result<Self>
    where
        B: IntoIterator<Item = bool>,
        W: Into<Wires>,
    {
        let bits: Vec<bool> = bits.into_iter().collect();
        let wires = wires.into();
        if bits.len() != wires.len() {
            return Err(Error::ProjectorShape { bits: bits.len(), nwires: wires.len() });
        }
        Ok(Self { bits, wires })
    }

    /// Basis state bits, in wire order.
    pub fn bits(&self) -> &[bool] { &self.bits }

    pub fn wires(&self) -> &Wires { &self.wires }

    fn local_matrix(&self) -> nd::Array2<C64> {
        let idx: usize
            = self.bits.iter().fold(0, |acc, b| (acc << 1) | usize::from(*b));
        let dim = 1 << self.bits.len();
        nd::Array2::from_shape_fn((dim, dim), |(r, c)| {
            if r == idx && c == idx { C64::one() } else { C64::zero() }
        })
    }
}

pub(crate) fn pauli_x() -> nd::Array2<C64> {
    nd::array![
        [C64::zero(), C64::one() ],
        [C64::one(),  C64::zero()],
    ]
}

pub(crate) fn pauli_y() -> nd::Array2<C64> {
    nd::array![
        [C64::zero(), -C64::i()   ],
        [C64::i(),     C64::zero()],
    ]
}

pub(crate) fn pauli_z() -> nd::Array2<C64> {
    nd::array![
        [C64::one(),   C64::zero()],
        [C64::zero(), -C64::one() ],
    ]
}

pub(crate) fn number() -> nd::Array2<C64> {
    nd::array![
        [C64::zero(), C64::zero()],
        [C64::zero(), C64::one() ],
    ]
}

/// Embed a single-qubit operator at `wire` as `I ⊗ op ⊗ I`.
fn single_site(op: &nd::Array2<C64>, wire: Wire, order: &Wires)
    -> nd::Array2<C64>
{
    let n = order.len();
    let k = order.get_index_of(&wire).expect("wire checked by caller");
    let eye1: nd::Array2<C64> = nd::Array2::eye(1 << k);
    let eye2: nd::Array2<C64> = nd::Array2::eye(1 << (n - k - 1));
    kron(&kron(&eye1, op), &eye2)
}

/// Embed an operator on arbitrary (possibly non-adjacent, permuted) wires by
/// matching computational basis indices.
fn multi_site(op: &nd::Array2<C64>, wires: &Wires, order: &Wires)
    -> nd::Array2<C64>
{
    let n = order.len();
    let m = wires.len();
    let pos: Vec<usize>
        = wires.positions_in(order).expect("wires checked by caller");
    let op_mask: usize
        = pos.iter().map(|p| 1 << (n - 1 - p)).fold(0, |acc, b| acc | b);
    let sub = |idx: usize| -> usize {
        pos.iter().enumerate()
            .fold(0, |acc, (k, p)| {
                acc | (((idx >> (n - 1 - p)) & 1) << (m - 1 - k))
            })
    };
    let dim = 1 << n;
    nd::Array2::from_shape_fn((dim, dim), |(r, c)| {
        if (r ^ c) & !op_mask == 0 { op[[sub(r), sub(c)]] } else { C64::zero() }
    })
}
