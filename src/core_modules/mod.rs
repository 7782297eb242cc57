pub mod annotation;
pub mod error;
pub mod frame;
pub mod hsv;
pub mod hue_tracker;
pub mod mask;
pub mod region;
pub mod telemetry;
pub mod tracker;
