// Types shared between the engine and whatever renders the dashboard.
pub mod dashboard;
pub mod models;
pub mod utils;
