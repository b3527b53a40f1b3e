//! Persistence layer for the booking server.
//!
//! SQLite-backed storage for users, drones and bookings. Listings read from
//! the `v_bookings` view so every result carries user and drone names.

pub mod bookings;
pub mod db;
pub mod drones;
pub mod seed;
pub mod users;

pub use db::{clear_all, init_database, Database};
