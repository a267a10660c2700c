//! Map and set façades over [`RbTree`](crate::RbTree), in unique-key and
//! multi-key flavors.

mod map;
mod multimap;
mod multiset;
mod set;

pub use map::TreeMap;
pub use multimap::TreeMultiMap;
pub use multiset::TreeMultiSet;
pub use set::TreeSet;
