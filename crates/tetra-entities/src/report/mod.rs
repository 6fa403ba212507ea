pub mod record;
pub mod sinks;

pub use record::*;
pub use sinks::*;
