//! Domain layer - value objects and invariants of the translation feature.
//!
//! Pure types with no I/O. Everything that talks to the outside world goes
//! through the ports.

pub mod evaluation;
pub mod foundation;
pub mod translation;
