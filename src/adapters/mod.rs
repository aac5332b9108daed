//! Adapter implementations of the port traits.
//!
//! `live` talks to the real world; `memory` keeps everything in process.

pub mod live;
pub mod memory;
