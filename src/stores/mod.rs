//! Client-side persisted state

mod session_store;

pub use session_store::SessionStore;
