// Crate root library declaration and module exports.
pub mod cli;
pub mod command;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod model;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;

pub use controller::{Lict, Response};
pub use error::LictError;
