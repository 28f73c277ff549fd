pub mod context;
pub mod store;

pub use context::{SessionContext, SessionState, User};
pub use store::TokenStore;
