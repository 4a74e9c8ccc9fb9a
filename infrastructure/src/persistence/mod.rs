//! Veto snapshot persistence.

mod json_file_store;

pub use json_file_store::JsonFileVetoStore;
