//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and the
//! outside world. The core owns these traits; adapters implement them.

pub mod interaction;
pub mod observer;

pub use interaction::{BoardRenderer, MoveInput};
pub use observer::Observer;
