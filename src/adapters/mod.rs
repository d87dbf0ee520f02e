//! Adapters implementing the interaction ports.
//!
//! `console` talks to a terminal; `scripted` keeps everything in memory for
//! tests and replays.

pub mod console;
pub mod scripted;

pub use console::{ConsoleInput, ConsoleRenderer};
pub use scripted::{RecordingRenderer, ScriptedInput};
