pub mod changes;
pub mod edge;
pub mod node;

pub use changes::*;
pub use edge::*;
pub use node::*;
