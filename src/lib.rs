pub mod api;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod service;
pub mod storage;
pub mod validate;

pub use error::{NotesError, Result};
pub use service::NoteService;
