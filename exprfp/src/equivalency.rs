//! Traits and checkers for deciding equivalence of expressions through their fingerprints.

use exprfp_base::{KeyedMapper, Mode};
use rand::{SeedableRng as _, rngs::StdRng};

use crate::{
    error::{Error, Result},
    expr::Expr,
    params::EqvParams,
};

/// Defines an equivalence relation between two entities.
///
/// Deciding the relation may fail, e.g. if one of the entities divides by zero.
pub trait EqvRelation<L, R = L> {
    fn equivalent(lhs: &L, rhs: &R) -> Result<bool>;
}

impl<L, R, E: EqvRelation<L, R>> EqvRelation<Vec<L>, Vec<R>> for E {
    /// Collections are equivalent if they have the same length and their elements are pairwise
    /// equivalent.
    fn equivalent(lhs: &Vec<L>, rhs: &Vec<R>) -> Result<bool> {
        if lhs.len() != rhs.len() {
            return Err(Error::LengthMismatch(lhs.len(), rhs.len()));
        }
        for (lhs, rhs) in std::iter::zip(lhs, rhs) {
            if !<E as EqvRelation<L, R>>::equivalent(lhs, rhs)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<L, R, E: EqvRelation<L, R>> EqvRelation<Box<L>, Box<R>> for E {
    fn equivalent(lhs: &Box<L>, rhs: &Box<R>) -> Result<bool> {
        <E as EqvRelation<L, R>>::equivalent(lhs.as_ref(), rhs.as_ref())
    }
}

/// Equivalence of expressions with the same shape, regardless of which variable or parameter
/// occupies each leaf.
#[derive(Debug)]
pub struct StructuralEqv;

/// Equivalence of expressions under the ring laws, with leaves identified by their identifier.
#[derive(Debug)]
pub struct AlgebraicEqv;

impl EqvRelation<Expr> for StructuralEqv {
    fn equivalent(lhs: &Expr, rhs: &Expr) -> Result<bool> {
        equivalent(lhs, rhs, Mode::Structural)
    }
}

impl EqvRelation<Expr> for AlgebraicEqv {
    fn equivalent(lhs: &Expr, rhs: &Expr) -> Result<bool> {
        equivalent(lhs, rhs, Mode::Algebraic)
    }
}

/// Returns true if both expressions have the same fingerprint under the given mode.
///
/// Truly equivalent expressions always compare equal. Non-equivalent expressions compare equal
/// on a collision of the fixed leaf assignment. Since that assignment is affine in the leaf
/// identifier, it collides on every integer-linear relation between identifiers, e.g.
/// `var10 - var3` and `var20 - var13`. [`EquivalenceChecker`] with trials rules those out.
pub fn equivalent(lhs: &Expr, rhs: &Expr, mode: Mode) -> Result<bool> {
    let (l, r) = (lhs.fingerprint(mode)?, rhs.fingerprint(mode)?);
    log::debug!("{mode} fingerprints: {lhs:?} = {l}, {rhs:?} = {r}");
    Ok(l == r)
}

/// Equivalence check hardened with extra random leaf assignments.
///
/// The memoized fingerprints are compared first. If they agree, both expressions are evaluated
/// under [`EqvParams::trials`] independent [`KeyedMapper`]s and are reported equivalent only if
/// every evaluation agrees. With `t` trials a false positive needs `t + 1` independent collisions.
#[derive(Clone, Debug, Default)]
pub struct EquivalenceChecker {
    params: EqvParams,
}

impl EquivalenceChecker {
    pub fn new(params: impl Into<EqvParams>) -> Self {
        Self {
            params: params.into(),
        }
    }

    pub fn params(&self) -> &EqvParams {
        &self.params
    }

    pub fn check(&self, lhs: &Expr, rhs: &Expr, mode: Mode) -> Result<bool> {
        if !equivalent(lhs, rhs, mode)? {
            return Ok(false);
        }
        let mut rng = StdRng::seed_from_u64(self.params.seed());
        for trial in 0..self.params.trials() {
            let mapper = KeyedMapper::random(&mut rng);
            let (l, r) = (lhs.evaluate(&mapper, mode)?, rhs.evaluate(&mapper, mode)?);
            if l != r {
                log::debug!(
                    "Fixed assignment collided; trial #{trial} separates {lhs:?} and {rhs:?}"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}
