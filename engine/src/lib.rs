// Engine library root
// Report loading, metric derivation and the render pass that ties them together.

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod services;
