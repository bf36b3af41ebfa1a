pub mod config;
pub mod dashboard;
pub mod kernel;
pub mod mock;
pub mod model;
pub mod services;
pub mod sim;
pub mod store;

pub use config::DashboardConfig;
pub use dashboard::{DashboardPage, DashboardSource, DashboardView};
