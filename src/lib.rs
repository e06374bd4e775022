#[macro_use]
extern crate lalrpop_util;

pub mod options;

pub use options::Options;

pub mod syntax;
pub mod types;

pub mod infer;

pub use infer::{Ctx, TypeError, TypeInference};
