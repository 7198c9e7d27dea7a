//! Saving and resuming games: the plain-text codec and the stores that hold
//! the encoded files.

pub mod codec;
mod store;

pub use codec::SaveMode;
pub use store::{validate_name, FileStore, SaveStore};
