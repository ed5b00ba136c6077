//! Domain layer for the climate advisory service
//!
//! Contains the pipeline state, the weather record and advisory entities,
//! the location value object and domain errors.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
