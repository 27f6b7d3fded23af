pub use candidates::*;
pub use cell::*;

mod candidates;
mod cell;
