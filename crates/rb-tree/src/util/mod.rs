//! Traversal helpers over an index arena.

mod first;
mod next;

pub use first::{first, last};
pub use next::{next, prev};
