// src/services/mod.rs
pub mod chat_provider;
pub mod contact_store;
pub mod notifier;

pub use chat_provider::{ChatProvider, TextStream};
pub use contact_store::{ContactStore, PgContactStore, StoreError};
pub use notifier::ContactNotifier;
