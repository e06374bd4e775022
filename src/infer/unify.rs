use std::fmt::Display;

use log::trace;

use crate::syntax::*;

use super::constraint::{Constraint, Constraints};
use super::{TypeError, TypeInference};

/// theta
///
/// Bindings are kept in the order they were solved in. A binding's type may
/// mention variables solved later, never ones solved earlier, so it is
/// applied as a left-to-right fold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subst(pub(super) Vec<(TypeVariable, Type)>);

impl Subst {
    pub fn empty() -> Self {
        Subst(Vec::new())
    }

    pub fn extend(mut self, a: TypeVariable, t: Type) -> Self {
        self.0.push((a, t));
        self
    }
}

impl Type {
    pub fn apply(self, theta: &Subst) -> Type {
        theta.0.iter().fold(self, |t, (a, t_a)| t.subst(*a, t_a))
    }
}

impl Display for Subst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;

        for (i, (a, t)) in self.0.iter().enumerate() {
            write!(f, "{}↦{}", a, t)?;

            if i < self.0.len() - 1 {
                write!(f, ", ")?;
            }
        }

        write!(f, "}}")
    }
}

impl TypeInference {
    /// Solves `constraints`, returning the bindings in solve order.
    ///
    /// Each step rewrites one constraint from the worklist by the first rule
    /// that applies; rules (1)-(6) handle consistency, (7)-(10) equality.
    /// Any constraint no rule covers is unsatisfiable. A failed occurs check
    /// is reported the same way as any other unsatisfiable constraint.
    pub fn unify(&mut self, constraints: Constraints) -> Result<Subst, TypeError> {
        use Constraint::*;
        use Type::*;

        let mut theta = Subst::empty();
        // popped from the back, so the smallest constraint goes first
        let mut worklist: Vec<Constraint> = constraints.into_iter().collect();
        worklist.reverse();

        while let Some(c) = worklist.pop() {
            trace!("unify({})", c);

            match c {
                // (1)
                Consistent(t1, t2) if t1.is_atomic() && t1 == t2 => (),
                // (2)
                Consistent(Dyn(), _) | Consistent(_, Dyn()) => (),
                // (3)
                Consistent(Fun(t11, t12), Fun(t21, t22)) => {
                    worklist.push(Consistent(*t12, *t22));
                    worklist.push(Consistent(*t11, *t21));
                }
                // (4)
                Consistent(t, Var(a)) if !t.is_var() => worklist.push(Consistent(Var(a), t)),
                // (5)
                Consistent(Var(a), t) if t.is_atomic() => worklist.push(Equal(Var(a), t)),
                // (6)
                Consistent(Var(a), Fun(t1, t2)) if !t1.occurs(a) && !t2.occurs(a) => {
                    let k1 = Var(self.fresh_variable());
                    let k2 = Var(self.fresh_variable());

                    worklist.push(Consistent(k2.clone(), *t2));
                    worklist.push(Consistent(k1.clone(), *t1));
                    worklist.push(Equal(Var(a), Type::fun(k1, k2)));
                }
                // (7)
                Equal(t1, t2) if t1.is_atomic() && t1 == t2 => (),
                // (8)
                Equal(Fun(t11, t12), Fun(t21, t22))
                    if t11.is_static()
                        && t12.is_static()
                        && t21.is_static()
                        && t22.is_static() =>
                {
                    worklist.push(Equal(*t12, *t22));
                    worklist.push(Equal(*t11, *t21));
                }
                // (9)
                Equal(t, Var(a)) if t.is_static() && !t.is_var() => {
                    worklist.push(Equal(Var(a), t))
                }
                // (10)
                Equal(Var(a), t) if !t.occurs(a) => {
                    trace!("  {} ↦ {}", a, t);

                    worklist = worklist.into_iter().map(|c| c.subst(a, &t)).collect();
                    theta = theta.extend(a, t);
                }
                // (11)
                c => return Err(TypeError::CannotUnify(c)),
            }
        }

        Ok(theta)
    }
}
