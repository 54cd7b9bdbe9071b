//! Hamiltonians for driven Rydberg atom arrays.
//!
//! A [`RydbergHamiltonian`] is a [`ParametrizedHamiltonian`] that additionally
//! remembers where its terms came from: the atom [`Register`] of an
//! interaction term, and the [`Pulse`]s of any drive terms. These are kept
//! consistent under addition: at most one interaction term may be present in
//! any sum, and pulses are accumulated in order.

use std::ops::Deref;
use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    coefficient::Coefficient,
    config::{ DEFAULT_INTERACTION_COEFF, InteractionConfig },
    error::{ Error, MergeWarning, Result },
    hamiltonians::{
        Combined,
        HBuild,
        Summand,
        parametrized::{ ParametrizedHamiltonian, Term },
    },
    observable::Observable,
    pulse::Pulse,
    wires::{ Wire, Wires },
};

/* Register *******************************************************************/

/// Positions of an ensemble of atoms, with one wire assigned to each atom.
#[derive(Clone, Debug, PartialEq)]
pub struct Register {
    coords: nd::Array2<f64>,
    wires: Wires,
}

impl Register {
    /// Create a new `Register` with wires `0..N`.
    ///
    /// Coordinates must be all 2D or all 3D, and finite.
    pub fn new<I, P>(coords: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[f64]>,
    {
        let coords = Self::collect_coords(coords)?;
        let wires = Wires::from(0..coords.nrows());
        Ok(Self { coords, wires })
    }

    /// Create a new `Register` with explicit wire labels, one per atom.
    pub fn with_wires<I, P, W>(coords: I, wires: W) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[f64]>,
        W: IntoIterator<Item = Wire>,
    {
        let coords = Self::collect_coords(coords)?;
        let wires: Vec<Wire> = wires.into_iter().collect();
        if wires.len() != coords.nrows() {
            return Err(Error::WireRegisterMismatch {
                wires: wires.len(),
                atoms: coords.nrows(),
            });
        }
        let wires = Wires::try_unique(wires)?;
        Ok(Self { coords, wires })
    }

    fn collect_coords<I, P>(coords: I) -> Result<nd::Array2<f64>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[f64]>,
    {
        let rows: Vec<Vec<f64>>
            = coords.into_iter().map(|r| r.as_ref().to_vec()).collect();
        let dim: usize = rows.first().map_or(2, |r| r.len());
        for (index, r) in rows.iter().enumerate() {
            if !(2..=3).contains(&r.len()) {
                return Err(Error::InvalidCoordinate {
                    index,
                    dim: r.len(),
                    expected: "2 or 3",
                });
            }
            if r.len() != dim {
                return Err(Error::InvalidCoordinate {
                    index,
                    dim: r.len(),
                    expected: "the same dimension as the first atom",
                });
            }
            if !r.iter().all(|x| x.is_finite()) {
                return Err(Error::NonFiniteCoordinate { index });
            }
        }
        Ok(nd::Array2::from_shape_fn((rows.len(), dim), |(i, k)| rows[i][k]))
    }

    /// Atom coordinates as an `N x d` array.
    pub fn coords(&self) -> nd::ArrayView2<'_, f64> { self.coords.view() }

    /// Wire labels, in atom order.
    pub fn wires(&self) -> &Wires { &self.wires }

    /// Number of atoms.
    pub fn len(&self) -> usize { self.coords.nrows() }

    pub fn is_empty(&self) -> bool { self.coords.nrows() == 0 }

    /// Spatial dimension of the coordinates.
    pub fn dim(&self) -> usize { self.coords.ncols() }

    /// Euclidean distance between atoms `i` and `j`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.coords.row(i).iter().zip(self.coords.row(j))
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

/* Hamiltonian ****************************************************************/

/// A [`ParametrizedHamiltonian`] built from Rydberg interaction and drive
/// terms.
///
/// Derefs to the underlying [`ParametrizedHamiltonian`].
#[derive(Clone, Debug, PartialEq)]
pub struct RydbergHamiltonian {
    base: ParametrizedHamiltonian,
    register: Option<Register>,
    coupled: Wires,
    interaction_coeff: f64,
    pulses: Vec<Pulse>,
}

impl Deref for RydbergHamiltonian {
    type Target = ParametrizedHamiltonian;

    fn deref(&self) -> &Self::Target { &self.base }
}

impl AsRef<ParametrizedHamiltonian> for RydbergHamiltonian {
    fn as_ref(&self) -> &ParametrizedHamiltonian { &self.base }
}

impl From<ParametrizedHamiltonian> for RydbergHamiltonian {
    fn from(base: ParametrizedHamiltonian) -> Self { Self::new(base) }
}

impl RydbergHamiltonian {
    /// Create a new `RydbergHamiltonian` with no register, no pulses, and the
    /// default interaction coefficient.
    pub fn new(base: ParametrizedHamiltonian) -> Self {
        Self {
            base,
            register: None,
            coupled: Wires::default(),
            interaction_coeff: DEFAULT_INTERACTION_COEFF,
            pulses: Vec::new(),
        }
    }

    /// Attach an interaction register, treating every one of its atoms as
    /// coupled.
    pub fn with_register(mut self, register: Register) -> Self {
        self.coupled = register.wires().clone();
        self.register = Some(register);
        self
    }

    /// Restrict the coupled wires to those carrying an interaction term.
    fn with_coupled(mut self, coupled: Wires) -> Self {
        self.coupled = coupled;
        self
    }

    /// Set the interaction coefficient, in units of frequency times length^6.
    pub fn with_interaction_coeff(mut self, interaction_coeff: f64) -> Self {
        self.interaction_coeff = interaction_coeff;
        self
    }

    /// Replace the pulse records.
    pub fn with_pulses<I>(mut self, pulses: I) -> Self
    where I: IntoIterator<Item = Pulse>
    {
        self.pulses = pulses.into_iter().collect();
        self
    }

    pub fn base(&self) -> &ParametrizedHamiltonian { &self.base }

    pub fn into_base(self) -> ParametrizedHamiltonian { self.base }

    /// The atom register of the interaction term, if there is one.
    pub fn register(&self) -> Option<&Register> { self.register.as_ref() }

    /// Wires of the register that take part in at least one interaction term.
    ///
    /// Atoms whose every partner lies beyond the cutoff distance are absent.
    /// Empty without a register.
    pub fn coupled_wires(&self) -> &Wires { &self.coupled }

    pub fn interaction_coeff(&self) -> f64 { self.interaction_coeff }

    /// Drive records, in the order their terms were added.
    pub fn pulses(&self) -> &[Pulse] { &self.pulses }

    /// Check every pulse against the interaction term and report those
    /// addressing wires that it does not couple. Always empty without a
    /// register.
    pub fn coverage_warnings(&self) -> Vec<MergeWarning> {
        if self.register.is_none() { return Vec::new(); }
        self.pulses.iter().enumerate()
            .filter_map(|(pulse, p)| {
                let uncovered = p.wires().difference(&self.coupled);
                (!uncovered.is_empty())
                    .then_some(MergeWarning::UncoveredPulseWires { pulse, uncovered })
            })
            .collect()
    }

    fn finish(self) -> Combined<Self> {
        let warnings = self.coverage_warnings();
        debug!(
            nterms = self.len(),
            npulses = self.pulses.len(),
            has_register = self.register.is_some(),
            nwarnings = warnings.len(),
            "merged Rydberg Hamiltonian"
        );
        Combined { hamiltonian: self, warnings }
    }

    fn merge_pair(lhs: Self, rhs: Self) -> Result<Combined<Self>> {
        let Self {
            base: base_l,
            register: register_l,
            coupled: coupled_l,
            interaction_coeff: coeff_l,
            pulses: mut pulses,
        } = lhs;
        let Self {
            base: base_r,
            register: register_r,
            coupled: coupled_r,
            interaction_coeff: coeff_r,
            pulses: pulses_r,
        } = rhs;
        let (register, coupled, interaction_coeff)
            = match (register_l, register_r) {
                (Some(_), Some(_)) => { return Err(Error::MultipleInteractions); },
                (Some(r), None) => (Some(r), coupled_l, coeff_l),
                (None, Some(r)) => (Some(r), coupled_r, coeff_r),
                (None, None) => (None, Wires::default(), DEFAULT_INTERACTION_COEFF),
            };
        pulses.extend(pulses_r);
        let base
            = ParametrizedHamiltonian::from_terms(
                base_l.into_terms().chain(base_r.into_terms()));
        Ok(Self { base, register, coupled, interaction_coeff, pulses }.finish())
    }

    /// `self + rhs`.
    pub(crate) fn merge_right(self, rhs: Summand) -> Result<Combined<Self>> {
        match rhs {
            Summand::Rydberg(rhs) => Self::merge_pair(self, rhs),
            other => {
                let Self { base, register, coupled, interaction_coeff, pulses } = self;
                let base
                    = ParametrizedHamiltonian::from_terms(
                        base.into_terms().chain(other.into_terms()));
                Ok(Self { base, register, coupled, interaction_coeff, pulses }.finish())
            },
        }
    }

    /// `lhs + self`.
    pub(crate) fn merge_left(self, lhs: Summand) -> Result<Combined<Self>> {
        match lhs {
            Summand::Rydberg(lhs) => Self::merge_pair(lhs, self),
            other => {
                let Self { base, register, coupled, interaction_coeff, pulses } = self;
                let base
                    = ParametrizedHamiltonian::from_terms(
                        other.into_terms().into_iter().chain(base.into_terms()));
                Ok(Self { base, register, coupled, interaction_coeff, pulses }.finish())
            },
        }
    }
}

impl HBuild for RydbergHamiltonian {
    fn get_wires(&self) -> &Wires { self.base.wires() }

    fn build_static(&self) -> Option<nd::Array2<C64>> {
        self.base.build_static()
    }

    fn build_at(&self, params: &[Vec<f64>], t: f64) -> Result<nd::Array2<C64>> {
        self.base.build_at(params, t)
    }
}

/* Constructors ***************************************************************/

/// Build the van der Waals interaction term of an atom register,
/// `Σ_{i<j} C6 / r_ij^6 n_i n_j`, where `n` is the Rydberg occupation.
///
/// Wires default to `0..N`. Pairs farther apart than `max_distance` are
/// dropped. `interaction_coeff` and `max_distance` must be positive and
/// finite. The returned Hamiltonian carries the register and no pulses.
pub fn rydberg_interaction<I, P>(
    register: I,
    wires: Option<Vec<Wire>>,
    interaction_coeff: f64,
    max_distance: Option<f64>,
) -> Result<RydbergHamiltonian>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[f64]>,
{
    InteractionConfig { interaction_coeff, max_distance }.validate()?;
    let register
        = match wires {
            Some(wires) => Register::with_wires(register, wires)?,
            None => Register::new(register)?,
        };
    let mut terms: Vec<Term> = Vec::new();
    for (i, j) in (0..register.len()).tuple_combinations() {
        let r = register.distance(i, j);
        let (wi, wj) = (register.wires()[i], register.wires()[j]);
        if r == 0.0 { return Err(Error::CoincidentAtoms(wi, wj)); }
        if max_distance.is_some_and(|rmax| r > rmax) { continue; }
        terms.push(
            Term::new(
                interaction_coeff / r.powi(6),
                Observable::Number(wi).prod(Observable::Number(wj)),
            )
        );
    }
    debug!(
        natoms = register.len(),
        nterms = terms.len(),
        interaction_coeff,
        "built Rydberg interaction term"
    );
    let base = ParametrizedHamiltonian::from_terms(terms);
    let coupled = base.wires().clone();
    Ok(
        RydbergHamiltonian::new(base)
            .with_register(register)
            .with_coupled(coupled)
            .with_interaction_coeff(interaction_coeff)
    )
}

/// Like [`rydberg_interaction`], but taking the interaction coefficient and
/// cutoff distance from a config.
pub fn rydberg_interaction_with<I, P>(
    register: I,
    wires: Option<Vec<Wire>>,
    config: &InteractionConfig,
) -> Result<RydbergHamiltonian>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[f64]>,
{
    rydberg_interaction(
        register, wires, config.interaction_coeff, config.max_distance)
}

/// Build the drive term of a laser field acting identically on all of `wires`,
/// ```text
/// H_d = Σ_w Ω (cos φ X_w - sin φ Y_w) - Δ Σ_w Z_w
/// ```
/// where each of the amplitude `Ω`, detuning `Δ`, and phase `φ` may be
/// constant or callable.
///
/// The detuning term keeps `detuning` as its coefficient. With a constant
/// phase, the amplitude term keeps `amplitude` as its coefficient and folds the
/// phase into the operator; with a callable phase it is split into separate X
/// and Y terms whose coefficients both evaluate `amplitude` and `phase` on the
/// same parameter entry. The result carries a single [`Pulse`] and no
/// register.
pub fn rydberg_drive<A, D, P, W>(
    amplitude: A,
    detuning: D,
    phase: P,
    wires: W,
) -> Result<RydbergHamiltonian>
where
    A: Into<Coefficient>,
    D: Into<Coefficient>,
    P: Into<Coefficient>,
    W: Into<Wires>,
{
    let amplitude: Coefficient = amplitude.into();
    let detuning: Coefficient = detuning.into();
    let phase: Coefficient = phase.into();
    let wires: Wires = wires.into();
    if wires.is_empty() { return Err(Error::NoWires); }

    let sum_over
        = |f: &dyn Fn(Wire) -> Vec<(f64, Observable)>| -> Observable {
            Observable::Sum(wires.iter().flat_map(|w| f(*w)).collect())
        };
    let mut terms: Vec<Term> = Vec::with_capacity(3);
    terms.push(
        Term::new(
            detuning.clone(),
            sum_over(&|w| vec![(-1.0, Observable::PauliZ(w))]),
        )
    );
    match &phase {
        Coefficient::Fixed(ph) => {
            let (sin, cos) = ph.sin_cos();
            terms.push(
                Term::new(
                    amplitude.clone(),
                    sum_over(&|w| {
                        vec![
                            (cos, Observable::PauliX(w)),
                            (-sin, Observable::PauliY(w)),
                        ]
                    }),
                )
            );
        },
        Coefficient::Callable(_) => {
            terms.push(
                Term::new(
                    amplitude.zip_with(&phase, |a, ph| a * ph.cos()),
                    sum_over(&|w| vec![(1.0, Observable::PauliX(w))]),
                )
            );
            terms.push(
                Term::new(
                    amplitude.zip_with(&phase, |a, ph| -a * ph.sin()),
                    sum_over(&|w| vec![(1.0, Observable::PauliY(w))]),
                )
            );
        },
    }
    debug!(
        nwires = wires.len(),
        nterms = terms.len(),
        "built Rydberg drive term"
    );
    let pulse = Pulse::new(amplitude, detuning, phase, wires);
    Ok(
        RydbergHamiltonian::new(ParametrizedHamiltonian::from_terms(terms))
            .with_pulses([pulse])
    )
}
