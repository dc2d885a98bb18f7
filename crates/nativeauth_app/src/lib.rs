mod client;
mod controller;
mod delegate;
pub mod dto;
mod services;
mod state;
mod telemetry;
pub mod validator;

pub use client::*;
pub use controller::*;
pub use delegate::*;
pub use services::*;
pub use state::*;
pub use telemetry::{ApiId, TelemetryEvent};
