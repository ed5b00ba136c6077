//! Value objects

pub mod location_name;

pub use location_name::LocationName;
