//! Core data types and input normalization.
//!
//! - [`AlgorithmId`]: Selects one of the three exact-matching strategies
//! - [`SearchInput`]: A normalized text/pattern pair
//! - [`normalize`]: Case-folds raw input before matching
//!
//! ## Offsets
//!
//! All offsets and lengths are counted in characters of the *normalized* strings,
//! not bytes. Case folding can change the character count of some inputs
//! (e.g. `İ` folds to two characters), so positions always refer to the folded text.

pub mod normalize;
pub mod types;

pub use normalize::{fold_case, normalize};
pub use types::{AlgorithmId, SearchInput};
