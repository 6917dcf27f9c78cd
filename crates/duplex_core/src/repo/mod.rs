//! Repository layer composing stores.

pub mod mirrored;

pub use mirrored::MirroredRepository;
