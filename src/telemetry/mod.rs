pub(crate) mod srt_parser;
pub(crate) mod telemetry_model;

pub use srt_parser::parse_srt;
pub use telemetry_model::TelemetryPoint;
