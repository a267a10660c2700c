//! Text dumps of binary trees for debugging and test snapshots.

mod print_binary;
mod types;

pub use print_binary::print_binary;
pub use types::{PrintChild, Printable};
