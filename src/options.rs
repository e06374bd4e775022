use crate::infer::Ctx;
use crate::syntax::{Type, Variable};

/// Width used when rendering types, expressions and constraints.
pub const DEFAULT_WIDTH: usize = 80;

/// Configuration options
#[derive(Clone, Debug)]
pub struct Options {
    /// Width to pretty print at.
    pub width: usize,

    /// Should we print the generated constraints and the solved
    /// substitution before the principal type?
    ///
    /// Only the driver looks at this; inference itself always logs them at
    /// `debug` level.
    pub show_constraints: bool,

    /// Initial typing environment, in the order the bindings were given. A
    /// later binding for the same name shadows an earlier one.
    pub bindings: Vec<(Variable, Type)>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            width: DEFAULT_WIDTH,
            show_constraints: false,
            bindings: Vec::new(),
        }
    }
}

impl Options {
    /// Parses a `NAME:TYPE` binding, as given to `--bind`.
    pub fn parse_binding(s: &str) -> Result<(Variable, Type), String> {
        let colon = s
            .find(':')
            .ok_or_else(|| format!("expected NAME:TYPE, got '{}'", s))?;
        let (x, t) = (s[..colon].trim(), &s[colon + 1..]);

        if x.is_empty() {
            return Err(format!("missing name in binding '{}'", s));
        }

        let t = Type::parse(t).map_err(|e| format!("bad type for {}: {}", x, e))?;
        Ok((x.to_string(), t))
    }

    pub fn bind(&mut self, x: Variable, t: Type) {
        self.bindings.push((x, t));
    }

    pub fn ctx(&self) -> Ctx {
        self.bindings
            .iter()
            .fold(Ctx::empty(), |ctx, (x, t)| ctx.extend(x.clone(), t.clone()))
    }
}
