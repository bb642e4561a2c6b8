// Rendition engine - independent of the CLI

pub mod core;

pub use self::core::*;
