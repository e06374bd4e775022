use log::debug;

use crate::syntax::*;

use super::TypeInference;

impl TypeInference {
    /// Replaces every type variable left in `t` with a fresh type parameter,
    /// numbering them in order of first occurrence.
    ///
    /// Should be called on a fully substituted type; any variable that
    /// survives solving is unconstrained, i.e., it may be anything.
    pub fn generalize(&mut self, t: Type) -> Type {
        t.vars().into_iter().fold(t, |t, a| {
            let p = self.fresh_parameter();
            debug!("generalizing {} to {}", a, p);
            t.subst(a, &Type::Param(p))
        })
    }
}
