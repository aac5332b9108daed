//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod speech;
pub mod transcript;
