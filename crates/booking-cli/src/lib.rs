//! Booking CLI - command line access to the drone booking server.
//!
//! Provides the `booking` binary and the blocking [`BookingClient`] it uses.

pub mod client;
pub mod render;

pub use client::BookingClient;
