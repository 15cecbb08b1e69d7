//! Collections of expressions grouped by fingerprint.

use std::{collections::HashMap, fmt, ops::Index};

use exprfp_base::{Felt, Mode};

use crate::{error::Result, expr::Expr};

/// Index of an expression inside an [`ExprSystem`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

impl ExprId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An append-only set of expressions that can be partitioned into equivalence classes.
#[derive(Clone, Debug, Default)]
pub struct ExprSystem {
    exprs: Vec<Expr>,
}

impl ExprSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an expression and returns its id. Ids are handed out in insertion order.
    pub fn push(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.exprs.len());
        self.exprs.push(expr);
        id
    }

    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &Expr)> {
        self.exprs.iter().enumerate().map(|(n, e)| (ExprId(n), e))
    }

    /// Partitions the system by fingerprint.
    ///
    /// Classes are ordered by their first member and members are kept in insertion order. Fails
    /// on the first expression that cannot be fingerprinted.
    pub fn classes(&self, mode: Mode) -> Result<Vec<Vec<ExprId>>> {
        let mut index: HashMap<Felt, usize> = HashMap::new();
        let mut classes: Vec<Vec<ExprId>> = vec![];
        for (id, expr) in self.iter() {
            let fp = expr.fingerprint(mode)?;
            match index.get(&fp) {
                Some(&class) => classes[class].push(id),
                None => {
                    index.insert(fp, classes.len());
                    classes.push(vec![id]);
                }
            }
        }
        log::debug!(
            "{} expressions form {} {mode} classes",
            self.len(),
            classes.len()
        );
        Ok(classes)
    }

    /// Returns the first member with the same fingerprint as `expr`.
    pub fn find_equivalent(&self, expr: &Expr, mode: Mode) -> Result<Option<ExprId>> {
        let target = expr.fingerprint(mode)?;
        for (id, member) in self.iter() {
            if member.fingerprint(mode)? == target {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

impl Index<ExprId> for ExprSystem {
    type Output = Expr;

    fn index(&self, id: ExprId) -> &Self::Output {
        &self.exprs[id.0]
    }
}

impl FromIterator<Expr> for ExprSystem {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        Self {
            exprs: iter.into_iter().collect(),
        }
    }
}

impl Extend<Expr> for ExprSystem {
    fn extend<I: IntoIterator<Item = Expr>>(&mut self, iter: I) {
        self.exprs.extend(iter)
    }
}
