//! # MarkupKit Session
//!
//! The session context that ties the annotation engine and the style editor
//! together: input routing, bounded undo/redo over both state halves,
//! persistence of the two JSON blobs, configuration and render listeners.

pub mod config;
pub mod history;
pub mod listener;
pub mod persistence;
pub mod session;

pub use config::{Capabilities, SessionConfig};
pub use history::{HistoryManager, HistorySnapshot};
pub use listener::{SessionListener, StatusLevel};
pub use persistence::{
    default_data_dir, load_or_default, save_json, FileStore, KeyValueStore, MemoryStore,
};
pub use session::{Session, SessionStats, Tool};
