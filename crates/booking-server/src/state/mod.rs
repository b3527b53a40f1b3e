//! Shared application state.

pub mod store;

pub use store::{SlotGuard, SlotKey, Store};

use std::sync::Arc;

use crate::persistence::Database;
use crate::validator::BookingValidator;

/// State handed to every request handler.
pub struct AppState {
    pub store: Arc<Store>,
    pub validator: BookingValidator,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        let store = Arc::new(Store::new(db));
        Self {
            validator: BookingValidator::new(store.clone()),
            store,
        }
    }
}
