pub mod location;
pub mod telemetry;

pub use location::*;
