use std::fmt::Display;

use im_rc::OrdSet;

use crate::options::DEFAULT_WIDTH;
use crate::syntax::*;

use super::unify::Subst;

/// C
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Constraint {
    /// the two types must be made identical
    Equal(Type, Type),
    /// the two types must be made consistent, i.e., equal up to `?`
    Consistent(Type, Type),
}

/// A conjunction of constraints. Order is irrelevant and duplicates
/// collapse; iteration follows the structural order on constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraints(pub(super) OrdSet<Constraint>);

impl Constraint {
    pub fn pretty<'b, D, A>(&'b self, pp: &'b D) -> pretty::DocBuilder<'b, D, A>
    where
        D: pretty::DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        let (t1, rel, t2) = match self {
            Constraint::Equal(t1, t2) => (t1, "=", t2),
            Constraint::Consistent(t1, t2) => (t1, "~", t2),
        };

        pp.intersperse(vec![t1.pretty(pp), pp.text(rel), t2.pretty(pp)], pp.line())
            .group()
    }

    pub fn and(self, other: Constraint) -> Constraints {
        Constraints(OrdSet::unit(self).update(other))
    }

    pub fn subst(self, a: TypeVariable, t: &Type) -> Constraint {
        match self {
            Constraint::Equal(t1, t2) => Constraint::Equal(t1.subst(a, t), t2.subst(a, t)),
            Constraint::Consistent(t1, t2) => {
                Constraint::Consistent(t1.subst(a, t), t2.subst(a, t))
            }
        }
    }

    pub fn apply(self, theta: &Subst) -> Constraint {
        match self {
            Constraint::Equal(t1, t2) => Constraint::Equal(t1.apply(theta), t2.apply(theta)),
            Constraint::Consistent(t1, t2) => {
                Constraint::Consistent(t1.apply(theta), t2.apply(theta))
            }
        }
    }
}

impl Constraints {
    pub fn pretty<'b, D, A>(&'b self, pp: &'b D) -> pretty::DocBuilder<'b, D, A>
    where
        D: pretty::DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        if self.0.is_empty() {
            pp.text("ε")
        } else {
            pp.intersperse(
                self.0.iter().map(|c| c.pretty(pp)),
                pp.text("⋀").enclose(pp.space(), pp.space()),
            )
        }
    }

    pub fn epsilon() -> Constraints {
        Constraints(OrdSet::new())
    }

    pub fn and(&mut self, c: Constraint) {
        self.0.insert(c);
    }

    pub fn and_many(&mut self, other: Constraints) {
        self.0.extend(other.0);
    }

    pub fn apply(self, theta: &Subst) -> Constraints {
        Constraints(self.0.into_iter().map(|c| c.apply(theta)).collect())
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pp = pretty::BoxAllocator;
        let doc = self.pretty::<_, ()>(&pp);
        doc.1.render_fmt(DEFAULT_WIDTH, f)
    }
}

impl Display for Constraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pp = pretty::BoxAllocator;
        let doc = self.pretty::<_, ()>(&pp);
        doc.1.render_fmt(DEFAULT_WIDTH, f)
    }
}

impl From<Constraint> for Constraints {
    fn from(c: Constraint) -> Self {
        Constraints(OrdSet::unit(c))
    }
}

impl IntoIterator for Constraints {
    type Item = Constraint;
    type IntoIter = im_rc::ordset::ConsumingIter<Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
