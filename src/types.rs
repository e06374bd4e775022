use std::fmt::Display;

use crate::options::DEFAULT_WIDTH;

/// gamma
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BaseType {
    Bool,
    Int,
}

/// alpha, a solver-internal unknown
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeVariable(pub(crate) usize);

/// 'a, a generalized position in a type scheme
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeParameter(pub(crate) usize);

/// T
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Type {
    Param(TypeParameter),
    Var(TypeVariable),
    Base(BaseType),
    Fun(Box<Type>, Box<Type>),
    Dyn(),
}

impl Type {
    pub fn bool() -> Self {
        Type::Base(BaseType::Bool)
    }

    pub fn int() -> Self {
        Type::Base(BaseType::Int)
    }

    pub fn fun(t1: Type, t2: Type) -> Type {
        Type::Fun(Box::new(t1), Box::new(t2))
    }

    pub fn pretty<'b, D, A>(&'b self, pp: &'b D) -> pretty::DocBuilder<'b, D, A>
    where
        D: pretty::DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        match self {
            Type::Dyn() => pp.text("?"),
            Type::Base(b) => pp.as_string(b),
            Type::Var(a) => pp.as_string(a),
            Type::Param(p) => pp.as_string(p),
            Type::Fun(t1, t2) => {
                let mut dom = t1.pretty(pp);

                if t1.is_fun() {
                    dom = dom.parens()
                }

                dom.append(pp.space())
                    .append(pp.text("->"))
                    .append(pp.line())
                    .append(t2.pretty(pp))
                    .group()
            }
        }
    }

    /// Renders at a given width rather than `DEFAULT_WIDTH`.
    pub fn display(&self, width: usize) -> impl Display + '_ {
        Rendered { t: self, width }
    }

    pub fn is_fun(&self) -> bool {
        match self {
            Type::Fun(_, _) => true,
            _ => false,
        }
    }

    pub fn is_var(&self) -> bool {
        match self {
            Type::Var(_) => true,
            _ => false,
        }
    }

    /// base types, variables, and parameters
    pub fn is_atomic(&self) -> bool {
        match self {
            Type::Base(_) | Type::Var(_) | Type::Param(_) => true,
            Type::Fun(_, _) | Type::Dyn() => false,
        }
    }

    pub fn has_dyn(&self) -> bool {
        match self {
            Type::Dyn() => true,
            Type::Fun(t1, t2) => t1.has_dyn() || t2.has_dyn(),
            Type::Base(_) | Type::Var(_) | Type::Param(_) => false,
        }
    }

    pub fn is_static(&self) -> bool {
        !self.has_dyn()
    }

    /// The consistency relation on types with no variables left to solve:
    /// `?` is consistent with everything, everything else must agree.
    pub fn consistent(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Dyn(), _) | (_, Type::Dyn()) => true,
            (Type::Fun(t11, t12), Type::Fun(t21, t22)) => {
                t11.consistent(t21) && t12.consistent(t22)
            }
            (t1, t2) => t1 == t2,
        }
    }

    pub fn occurs(&self, a: TypeVariable) -> bool {
        match self {
            Type::Var(b) => a == *b,
            Type::Fun(t1, t2) => t1.occurs(a) || t2.occurs(a),
            Type::Base(_) | Type::Param(_) | Type::Dyn() => false,
        }
    }

    /// Free type variables, each once, in order of first (leftmost)
    /// occurrence.
    pub fn vars(&self) -> Vec<TypeVariable> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, vars: &mut Vec<TypeVariable>) {
        match self {
            Type::Var(a) => {
                if !vars.contains(a) {
                    vars.push(*a)
                }
            }
            Type::Fun(t1, t2) => {
                t1.collect_vars(vars);
                t2.collect_vars(vars);
            }
            Type::Base(_) | Type::Param(_) | Type::Dyn() => (),
        }
    }

    /// [a ↦ t]self
    pub fn subst(self, a: TypeVariable, t: &Type) -> Type {
        match self {
            Type::Var(b) if a == b => t.clone(),
            Type::Fun(t1, t2) => Type::fun(t1.subst(a, t), t2.subst(a, t)),
            Type::Var(_) | Type::Base(_) | Type::Param(_) | Type::Dyn() => self,
        }
    }
}

impl From<BaseType> for Type {
    fn from(b: BaseType) -> Self {
        Type::Base(b)
    }
}

struct Rendered<'a> {
    t: &'a Type,
    width: usize,
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pp = pretty::BoxAllocator;
        let doc = self.t.pretty::<_, ()>(&pp);
        doc.1.render_fmt(self.width, f)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.display(DEFAULT_WIDTH).fmt(f)
    }
}

impl Display for TypeVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl Display for TypeParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = (b'a' + (self.0 % 26) as u8) as char;

        match self.0 / 26 {
            0 => write!(f, "'{}", letter),
            n => write!(f, "'{}{}", letter, n),
        }
    }
}

impl Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseType::Bool => write!(f, "bool"),
            BaseType::Int => write!(f, "int"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn var(n: usize) -> Type {
        Type::Var(TypeVariable(n))
    }

    #[test]
    fn pretty_types() {
        assert_eq!(Type::int().to_string(), "int");
        assert_eq!(Type::Dyn().to_string(), "?");
        assert_eq!(var(3).to_string(), "x3");
        assert_eq!(
            Type::fun(Type::Dyn(), Type::int()).to_string(),
            "? -> int"
        );
        assert_eq!(
            Type::fun(Type::fun(Type::bool(), Type::int()), Type::int()).to_string(),
            "(bool -> int) -> int"
        );
        assert_eq!(
            Type::fun(Type::bool(), Type::fun(Type::int(), Type::int())).to_string(),
            "bool -> int -> int"
        );
    }

    #[test]
    fn parameter_names() {
        assert_eq!(TypeParameter(0).to_string(), "'a");
        assert_eq!(TypeParameter(1).to_string(), "'b");
        assert_eq!(TypeParameter(25).to_string(), "'z");
        assert_eq!(TypeParameter(26).to_string(), "'a1");
        assert_eq!(TypeParameter(55).to_string(), "'d2");
    }

    #[test]
    fn narrow_rendering_breaks_lines() {
        let t = Type::fun(Type::bool(), Type::fun(Type::int(), Type::bool()));
        assert_eq!(t.display(80).to_string(), "bool -> int -> bool");
        assert!(t.display(4).to_string().contains('\n'));
    }

    #[test]
    fn vars_in_order() {
        let t = Type::fun(
            Type::fun(var(4), var(1)),
            Type::fun(var(4), Type::fun(Type::Dyn(), var(0))),
        );

        assert_eq!(
            t.vars(),
            vec![TypeVariable(4), TypeVariable(1), TypeVariable(0)]
        );
        assert!(t.occurs(TypeVariable(1)));
        assert!(!t.occurs(TypeVariable(2)));
        assert!(t.has_dyn());
    }

    #[test]
    fn subst_replaces_every_occurrence() {
        let t = Type::fun(var(0), Type::fun(var(1), var(0)));
        let t = t.subst(TypeVariable(0), &Type::bool());

        assert_eq!(t, Type::fun(Type::bool(), Type::fun(var(1), Type::bool())));
    }
}
