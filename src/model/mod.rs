pub mod agent;
pub mod api;
pub mod travel;

pub use agent::*;
pub use travel::*;
