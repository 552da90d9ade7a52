pub mod entry;
pub mod registry;

pub use entry::*;
pub use registry::*;
