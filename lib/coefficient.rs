//! Fixed and time-parametrized term coefficients.

use std::{ fmt, sync::Arc };

/// Signature of a parametrized coefficient: `f(params, t)`.
pub type CoeffFn = dyn Fn(&[f64], f64) -> f64 + Send + Sync;

/// Weight of a single Hamiltonian term.
///
/// Callables are shared, so cloning a `Coefficient` (or a Hamiltonian holding
/// one) never copies the underlying function. Two callable coefficients
/// compare equal only if they share the same function.
#[derive(Clone)]
pub enum Coefficient {
    /// Constant weight.
    Fixed(f64),
    /// Weight computed from parameters and time.
    Callable(Arc<CoeffFn>),
}

impl fmt::Debug for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(c) => write!(f, "Fixed({:?})", c),
            Self::Callable(g) => write!(f, "Callable({:p})", Arc::as_ptr(g)),
        }
    }
}

impl PartialEq for Coefficient {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Callable(f), Self::Callable(g)) => Arc::ptr_eq(f, g),
            _ => false,
        }
    }
}

impl PartialEq<f64> for Coefficient {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Self::Fixed(c) if c == other)
    }
}

impl From<f64> for Coefficient {
    fn from(c: f64) -> Self { Self::Fixed(c) }
}

impl From<i32> for Coefficient {
    fn from(c: i32) -> Self { Self::Fixed(c.into()) }
}

impl From<Arc<CoeffFn>> for Coefficient {
    fn from(f: Arc<CoeffFn>) -> Self { Self::Callable(f) }
}

impl Coefficient {
    /// Create a new `Coefficient::Callable`.
    pub fn callable<F>(f: F) -> Self
    where F: Fn(&[f64], f64) -> f64 + Send + Sync + 'static
    {
        Self::Callable(Arc::new(f))
    }

    /// Return `true` for `Callable`.
    pub fn is_callable(&self) -> bool { matches!(self, Self::Callable(_)) }

    /// Return the constant value of a `Fixed` coefficient.
    pub fn as_fixed(&self) -> Option<f64> {
        match self {
            Self::Fixed(c) => Some(*c),
            Self::Callable(_) => None,
        }
    }

    /// Evaluate at `(params, t)`; fixed coefficients ignore both.
    pub fn eval(&self, params: &[f64], t: f64) -> f64 {
        match self {
            Self::Fixed(c) => *c,
            Self::Callable(f) => f(params, t),
        }
    }

    /// Return `true` if both coefficients refer to the same callable.
    pub fn same_callable(&self, other: &Self) -> bool {
        self.is_callable() && self == other
    }

    /// Combine two coefficients pointwise; the result is callable if either
    /// input is.
    pub(crate) fn zip_with<F>(&self, other: &Self, f: F) -> Self
    where F: Fn(f64, f64) -> f64 + Send + Sync + 'static
    {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => Self::Fixed(f(*a, *b)),
            _ => {
                let a = self.clone();
                let b = other.clone();
                Self::callable(move |p, t| f(a.eval(p, t), b.eval(p, t)))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callable_equality_is_by_identity() {
        let f = Coefficient::callable(|p, t| p[0] * t);
        let g = Coefficient::callable(|p, t| p[0] * t);
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
        assert!(f.same_callable(&f.clone()));
        assert_eq!(Coefficient::from(2), 2.0);
        assert!(!Coefficient::from(2.0).same_callable(&Coefficient::from(2.0)));
    }

    #[test]
    fn zip_with_preserves_fixedness() {
        let a = Coefficient::from(2.0);
        let b = Coefficient::callable(|p, t| p[0] + t);
        assert_eq!(a.zip_with(&a, |x, y| x - y), 0.0);
        let ab = a.zip_with(&b, |x, y| x * y);
        assert!(ab.is_callable());
        assert_eq!(ab.eval(&[1.0], 0.5), 3.0);
    }
}
