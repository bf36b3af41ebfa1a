pub mod demo;

pub use demo::{AgentFeed, DemoSimulator};
