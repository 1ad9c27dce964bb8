//! Hash collections used for index-keyed bookkeeping.
//!
//! Keys are small integers (item indices, slot ids), so the default build uses
//! `FxHash`. Enable `std-hash` to fall back to SipHash.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::hash_map::Entry;
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
    pub use std::collections::hash_map::Entry;
}
