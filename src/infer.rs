use im_rc::HashMap;

use log::debug;
use thiserror::Error;

use crate::syntax::*;

pub mod constraint;
pub mod generalize;
pub mod unify;

pub use constraint::{Constraint, Constraints};
pub use unify::Subst;

/// Why an expression has no type. The first error aborts inference.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unbound variable {0}")]
    UnboundVariable(Variable),
    #[error("cannot apply a value of type {0}")]
    NotApplicable(Type),
    #[error("cannot unify {0}")]
    CannotUnify(Constraint),
}

// Gamma
#[derive(Clone, Debug, Default)]
pub struct Ctx(HashMap<Variable, Type>);

impl Ctx {
    pub fn empty() -> Self {
        Ctx(HashMap::new())
    }

    pub fn extend(&self, x: Variable, t: Type) -> Self {
        Ctx(self.0.update(x, t))
    }

    pub fn lookup(&self, x: &Variable) -> Option<&Type> {
        self.0.get(x)
    }
}

/// One inference request. Owns the counters for fresh type variables and
/// type parameters, so separate requests never share names.
#[derive(Debug, Default)]
pub struct TypeInference {
    next_variable: usize,
    next_parameter: usize,
}

impl TypeInference {
    pub fn new() -> TypeInference {
        TypeInference {
            next_variable: 0,
            next_parameter: 0,
        }
    }

    fn fresh_variable(&mut self) -> TypeVariable {
        let next = self.next_variable;
        self.next_variable += 1;
        TypeVariable(next)
    }

    fn fresh_parameter(&mut self) -> TypeParameter {
        let next = self.next_parameter;
        self.next_parameter += 1;
        TypeParameter(next)
    }

    /// Returns the type of `e` in `ctx`, along with the constraints that
    /// must hold for it to be well typed.
    pub fn generate_constraints(
        &mut self,
        ctx: &Ctx,
        e: &Expr,
    ) -> Result<(Type, Constraints), TypeError> {
        match e {
            Expr::Const(c) => Ok((c.into(), Constraints::epsilon())),
            Expr::Var(x) => {
                let t = ctx
                    .lookup(x)
                    .ok_or_else(|| TypeError::UnboundVariable(x.clone()))?;
                Ok((t.clone(), Constraints::epsilon()))
            }
            Expr::BOp(op, e1, e2) => {
                let (t1, mut cs) = self.generate_constraints(ctx, e1)?;
                let (t2, cs2) = self.generate_constraints(ctx, e2)?;
                cs.and_many(cs2);

                let (t_dom, t_cod) = op.signature();
                cs.and(Constraint::Consistent(t1, t_dom.clone()));
                cs.and(Constraint::Consistent(t2, t_dom));

                Ok((t_cod, cs))
            }
            Expr::Lam(x, t, e) => {
                let t_dom = match t {
                    None => Type::Var(self.fresh_variable()),
                    Some(t) => t.clone(),
                };

                let (t_cod, cs) =
                    self.generate_constraints(&ctx.extend(x.clone(), t_dom.clone()), e)?;

                Ok((Type::fun(t_dom, t_cod), cs))
            }
            Expr::App(e_fun, e_arg) => {
                let (t_fun, mut cs) = self.generate_constraints(ctx, e_fun)?;
                let (t_arg, cs_arg) = self.generate_constraints(ctx, e_arg)?;
                cs.and_many(cs_arg);

                let (t_res, cs_res) = self.cod(&t_fun)?;
                cs.and_many(cs_res);
                cs.and_many(self.dom(&t_fun, &t_arg)?);

                Ok((t_res, cs))
            }
        }
    }

    /// The result type of applying something of type `t_fun`.
    fn cod(&mut self, t_fun: &Type) -> Result<(Type, Constraints), TypeError> {
        match t_fun {
            Type::Dyn() => Ok((Type::Dyn(), Constraints::epsilon())),
            Type::Fun(_t_dom, t_cod) => Ok((*t_cod.clone(), Constraints::epsilon())),
            Type::Var(a) => {
                let k1 = Type::Var(self.fresh_variable());
                let k2 = Type::Var(self.fresh_variable());
                Ok((
                    k2.clone(),
                    Constraint::Equal(Type::Var(*a), Type::fun(k1, k2)).into(),
                ))
            }
            Type::Base(_) | Type::Param(_) => Err(TypeError::NotApplicable(t_fun.clone())),
        }
    }

    /// What it takes to pass something of type `t_arg` to something of type
    /// `t_fun`.
    fn dom(&mut self, t_fun: &Type, t_arg: &Type) -> Result<Constraints, TypeError> {
        match t_fun {
            Type::Dyn() => Ok(Constraint::Consistent(Type::Dyn(), t_arg.clone()).into()),
            Type::Fun(t_dom, _t_cod) => {
                Ok(Constraint::Consistent(*t_dom.clone(), t_arg.clone()).into())
            }
            Type::Var(a) => {
                let k1 = Type::Var(self.fresh_variable());
                let k2 = Type::Var(self.fresh_variable());
                Ok(
                    Constraint::Equal(Type::Var(*a), Type::fun(k1.clone(), k2))
                        .and(Constraint::Consistent(k1, t_arg.clone())),
                )
            }
            Type::Base(_) | Type::Param(_) => Err(TypeError::NotApplicable(t_fun.clone())),
        }
    }

    /// Generates constraints for `e`, logging them.
    pub fn generate(&mut self, ctx: &Ctx, e: &Expr) -> Result<(Type, Constraints), TypeError> {
        let (t, cs) = self.generate_constraints(ctx, e)?;

        debug!("Generated constraints:");
        debug!("  e = {}", e);
        debug!("  t = {}", t);
        debug!("  constraints = {}", cs);

        Ok((t, cs))
    }

    /// Unifies `cs` and applies the solution to `t`, logging both.
    pub fn solve(&mut self, t: Type, cs: Constraints) -> Result<(Type, Subst), TypeError> {
        let theta = self.unify(cs)?;
        let t = t.apply(&theta);

        debug!("Unified constraints:");
        debug!("  theta = {}", theta);
        debug!("  t = {}", t);

        Ok((t, theta))
    }

    pub fn run(&mut self, ctx: &Ctx, e: &Expr) -> Result<Type, TypeError> {
        let (t, cs) = self.generate(ctx, e)?;
        let (t, _theta) = self.solve(t, cs)?;

        Ok(self.generalize(t))
    }

    /// Infers the principal type of `e` in `ctx`, with its own fresh
    /// counters.
    pub fn infer(ctx: &Ctx, e: &Expr) -> Result<Type, TypeError> {
        let mut ti = TypeInference::new();

        ti.run(ctx, e)
    }
}
