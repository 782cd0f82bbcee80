//! Built-in startup checks

pub mod bindings;
pub mod build_info;
pub mod config;
pub mod sensor;

pub use bindings::BindingsCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use sensor::SensorCheck;
