//! Domain model contracts.

pub mod record;

pub use record::Record;
