//! This is a plugin for Bevy game engine to build a chunked navigation graph over grid based terrain and search it for paths
//!

pub mod bundle;
pub mod graph;
pub mod plugin;

pub mod prelude;
