// File: ./src/model/mod.rs
pub mod date;
pub mod item;
pub mod list;

pub use date::DateType;
pub use item::{Task, TaskKind};
pub use list::TaskList;
