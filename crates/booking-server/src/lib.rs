//! Drone booking server: store, booking validator and REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod persistence;
pub mod state;
pub mod validator;

pub use error::{BookingError, BookingResult};
pub use state::{AppState, Store};
pub use validator::BookingValidator;
