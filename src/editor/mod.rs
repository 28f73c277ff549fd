pub mod draft;

pub use draft::{Draft, DraftBook, EditPhase};
