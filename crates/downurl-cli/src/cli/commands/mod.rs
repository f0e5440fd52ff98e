//! CLI command handlers, one per file.

mod check;
mod completions;
mod inspect;

pub use check::run_check;
pub use completions::run_completions;
pub use inspect::run_inspect;
