//! Command implementations

mod inspect;
mod run;

pub use inspect::run_inspect;
pub use run::{run_embed, run_strip};
