//! Option contract identifiers.

mod occ;

pub use occ::{OccSymbol, OccSymbolError, OptionType, encode, infer_underlying};
