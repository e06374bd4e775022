use std::fmt::Display;

use crate::options::DEFAULT_WIDTH;
pub use crate::types::*;

#[allow(clippy::all)]
lalrpop_mod!(parser);

/// c
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constant {
    Bool(bool),
    Int(isize),
}

/// binary operations in source expressions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Plus,
}

/// x
pub type Variable = String;

/// e (ITGL)
///
/// `Lam(x, None, e)` is the implicitly typed abstraction `\x. e`;
/// `Lam(x, Some(t), e)` is the explicitly typed `\x:t. e`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Const(Constant),
    Var(Variable),
    Lam(Variable, Option<Type>, Box<Expr>),
    App(Box<Expr>, Box<Expr>),
    BOp(BinOp, Box<Expr>, Box<Expr>),
}

impl Type {
    pub fn parse(s: &str) -> Result<Self, String> {
        parser::TypeParser::new()
            .parse(s)
            .map_err(|e| e.to_string())
    }
}

impl Constant {
    pub fn base_type(&self) -> BaseType {
        match self {
            Constant::Bool(_) => BaseType::Bool,
            Constant::Int(_) => BaseType::Int,
        }
    }
}

impl From<&Constant> for Type {
    fn from(c: &Constant) -> Self {
        Type::Base(c.base_type())
    }
}

impl BinOp {
    /// Returns `(dom, cod)`: both operands should be consistent with `dom`,
    /// and the result has type `cod`.
    pub fn signature(&self) -> (Type, Type) {
        match self {
            BinOp::Plus => (Type::int(), Type::int()),
        }
    }
}

impl Expr {
    pub fn bool(b: bool) -> Self {
        Expr::Const(Constant::Bool(b))
    }

    pub fn int(n: isize) -> Self {
        Expr::Const(Constant::Int(n))
    }

    pub fn var(x: &str) -> Self {
        Expr::Var(x.to_string())
    }

    pub fn lam(x: Variable, t: Option<Type>, e: Self) -> Self {
        Expr::Lam(x, t, Box::new(e))
    }

    pub fn app(e1: Self, e2: Self) -> Self {
        Expr::App(Box::new(e1), Box::new(e2))
    }

    pub fn bop(op: BinOp, e1: Self, e2: Self) -> Self {
        Expr::BOp(op, Box::new(e1), Box::new(e2))
    }

    pub fn plus(e1: Self, e2: Self) -> Self {
        Expr::bop(BinOp::Plus, e1, e2)
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        parser::ExprParser::new()
            .parse(s)
            .map_err(|e| e.to_string())
    }

    pub fn is_compound(&self) -> bool {
        match self {
            Expr::Var(_) | Expr::Const(_) => false,
            _ => true,
        }
    }

    pub fn is_app(&self) -> bool {
        match self {
            Expr::App(_, _) => true,
            _ => false,
        }
    }

    pub fn is_lam(&self) -> bool {
        match self {
            Expr::Lam(_, _, _) => true,
            _ => false,
        }
    }

    pub fn pretty<'b, D, A>(&'b self, pp: &'b D) -> pretty::DocBuilder<'b, D, A>
    where
        D: pretty::DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        match self {
            Expr::Var(x) => pp.text(x),
            Expr::Const(c) => pp.as_string(c),
            Expr::Lam(x, None, e) => pp
                .text("\\")
                .append(pp.text(x))
                .append(pp.text("."))
                .append(pp.line())
                .append(e.pretty(pp).nest(2))
                .group(),
            Expr::Lam(x, Some(t), e) => pp
                .text("\\")
                .append(pp.text(x))
                .append(pp.space())
                .append(pp.text(":"))
                .append(pp.space())
                .append(t.pretty(pp))
                .append(pp.text("."))
                .append(pp.line())
                .append(e.pretty(pp).nest(2))
                .group(),
            Expr::App(e1, e2) => {
                let mut d1 = e1.pretty(pp);
                let mut d2 = e2.pretty(pp);

                if e1.is_compound() && !e1.is_app() {
                    d1 = d1.parens();
                }

                if e2.is_compound() {
                    d2 = d2.parens();
                }

                d1.append(pp.line()).append(d2).group()
            }
            // addition is left associative and binds looser than application
            Expr::BOp(op, e1, e2) => {
                let mut d1 = e1.pretty(pp);
                let mut d2 = e2.pretty(pp);

                if e1.is_lam() {
                    d1 = d1.parens();
                }

                if e2.is_compound() && !e2.is_app() {
                    d2 = d2.parens();
                }

                pp.intersperse(vec![d1, pp.as_string(op), d2], pp.space())
                    .group()
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pp = pretty::BoxAllocator;
        let doc = self.pretty::<_, ()>(&pp);
        doc.1.render_fmt(DEFAULT_WIDTH, f)
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinOp::Plus => write!(f, "+"),
        }
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constant::Bool(true) => write!(f, "true"),
            Constant::Bool(false) => write!(f, "false"),
            Constant::Int(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expr_id() {
        assert_eq!(
            Expr::parse("\\x. x").unwrap(),
            Expr::lam("x".into(), None, Expr::var("x"))
        );

        assert_eq!(
            Expr::parse("\\x:?. x").unwrap(),
            Expr::lam("x".into(), Some(Type::Dyn()), Expr::var("x"))
        );

        assert_eq!(
            Expr::parse("\\x:bool. x").unwrap(),
            Expr::lam("x".into(), Some(BaseType::Bool.into()), Expr::var("x"))
        );
    }

    #[test]
    fn expr_app() {
        assert_eq!(
            Expr::parse("true false 5").unwrap(),
            Expr::app(
                Expr::app(Expr::bool(true), Expr::bool(false)),
                Expr::int(5)
            )
        );

        assert_eq!(
            Expr::parse("true (false 5)").unwrap(),
            Expr::app(
                Expr::bool(true),
                Expr::app(Expr::bool(false), Expr::int(5)),
            )
        );
    }

    #[test]
    fn expr_plus() {
        assert_eq!(
            Expr::parse("1 + 2 + 3").unwrap(),
            Expr::plus(Expr::plus(Expr::int(1), Expr::int(2)), Expr::int(3))
        );

        assert_eq!(
            Expr::parse("f 1 + g 2").unwrap(),
            Expr::plus(
                Expr::app(Expr::var("f"), Expr::int(1)),
                Expr::app(Expr::var("g"), Expr::int(2))
            )
        );

        assert_eq!(
            Expr::parse("\\x:?. x + 1").unwrap(),
            Expr::lam(
                "x".into(),
                Some(Type::Dyn()),
                Expr::plus(Expr::var("x"), Expr::int(1))
            )
        );

        assert!(Expr::parse("1 +").is_err());
        assert!(Expr::parse("+ 1").is_err());
    }

    #[test]
    fn const_int() {
        assert!(Expr::parse("22").is_ok());
        assert_eq!(Expr::parse("47").unwrap(), Expr::int(47));
        assert!(Expr::parse("(22)").is_ok());
        assert!(Expr::parse("((((22))))").is_ok());
        assert!(Expr::parse("((22)").is_err());
        assert_eq!(Expr::parse("-47").unwrap(), Expr::int(-47));
        assert!(Expr::parse("99999999999999999999999999").is_err());
    }

    #[test]
    fn negative_literal_is_an_argument() {
        assert_eq!(
            Expr::parse("x -1").unwrap(),
            Expr::app(Expr::var("x"), Expr::int(-1))
        );
        assert_eq!(
            Expr::parse("1-1").unwrap(),
            Expr::app(Expr::int(1), Expr::int(-1))
        );
        assert_eq!(
            Expr::parse("x + -1").unwrap(),
            Expr::plus(Expr::var("x"), Expr::int(-1))
        );
        se_round_trip("f -1", "f -1");
    }

    #[test]
    fn const_bool() {
        assert_eq!(Expr::parse("true").unwrap(), Expr::bool(true));
        assert_eq!(Expr::parse("false").unwrap(), Expr::bool(false));
        assert_eq!(Expr::parse("FALSE").unwrap(), Expr::var("FALSE"));
    }

    #[test]
    fn types_atomic() {
        assert_eq!(Type::parse("bool").unwrap(), BaseType::Bool.into());
        assert_eq!(Type::parse("int").unwrap(), BaseType::Int.into());
        assert_eq!(Type::parse("?").unwrap(), Type::Dyn());
        assert!(Type::parse("string").is_err());
    }

    #[test]
    fn types() {
        assert_eq!(
            Type::parse("bool->bool").unwrap(),
            Type::fun(Type::bool(), Type::bool())
        );
        assert_eq!(
            Type::parse("bool -> int -> ?").unwrap(),
            Type::fun(Type::bool(), Type::fun(Type::int(), Type::Dyn()))
        );
        assert_eq!(
            Type::parse("(bool -> int) -> ?").unwrap(),
            Type::fun(Type::fun(Type::bool(), Type::int()), Type::Dyn())
        );
        assert!(Type::parse("(bool -> int").is_err());
        assert!(Type::parse("-> int").is_err());
    }

    fn se_round_trip(s: &str, pp: &str) {
        let e = Expr::parse(s).unwrap();
        let e_pp = format!("{}", e);

        assert_eq!(pp, e_pp);

        let e2 = Expr::parse(&e_pp).unwrap();
        assert_eq!(e, e2);
        assert_eq!(format!("{}", e2), e_pp);
    }

    #[test]
    fn pretty_expr() {
        se_round_trip("true", "true");
        se_round_trip("-20", "-20");
        se_round_trip("x", "x");
        se_round_trip("\\x.x", "\\x. x");
        se_round_trip("\\x:int->?.x", "\\x : int -> ?. x");
        se_round_trip("(\\x. x) 5", "(\\x. x) 5");
        se_round_trip("f (g x) y", "f (g x) y");
        se_round_trip("f (x + 1)", "f (x + 1)");
        se_round_trip("1 + (2 + 3)", "1 + (2 + 3)");
        se_round_trip("1 + 2 + 3", "1 + 2 + 3");
        se_round_trip("(\\x. x) + f 2", "(\\x. x) + f 2");
        se_round_trip("1 + (\\x. x)", "1 + (\\x. x)");
    }
}
