//! Building blocks shared by entities and hazards.
pub mod checker;
pub mod finance;
pub mod raw;
pub mod sparse;

#[cfg(test)]
pub(crate) mod testing;
