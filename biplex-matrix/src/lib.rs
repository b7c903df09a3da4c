mod f2;
mod map_mat;
mod index_mat;

pub use f2::*;
pub use map_mat::*;
pub use index_mat::*;
