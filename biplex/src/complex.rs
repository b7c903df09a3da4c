mod node;
mod tree;
mod views;
mod boundary;

pub use node::*;
pub use tree::*;
pub use boundary::*;
