pub mod config;
pub mod engine;
pub mod error;
pub mod script;

pub use config::{AppConfig, KeymapConfig, PrompterConfig, UiConfig};
pub use engine::{ScrollEngine, ScrollState, TickOutcome, SPEED_MAX, SPEED_MIN, TICK_INTERVAL};
pub use error::{Error, Result};
pub use script::{Script, ScriptLibrary};
