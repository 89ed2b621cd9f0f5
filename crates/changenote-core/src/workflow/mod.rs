//! Release workflow for changenote

mod finalize;
mod release;
mod rewrite;

pub use finalize::*;
pub use release::*;
pub use rewrite::*;
