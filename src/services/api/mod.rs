pub mod client;
pub mod error;
pub mod mappers;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
