pub mod config;
pub mod error;
pub mod shelter;
pub mod telemetry;
