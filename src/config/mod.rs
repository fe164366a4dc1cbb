//! Configuration module for ytscout.

mod settings;

pub use settings::{AgentSettings, GeneralSettings, Settings, YoutubeSettings};
