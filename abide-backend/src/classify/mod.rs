//! Crisis and feeling classifiers. Both are pure functions over injected
//! keyword tables.

pub mod crisis;
pub mod feeling;

pub use crisis::CrisisCategory;
