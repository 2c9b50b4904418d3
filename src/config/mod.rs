pub mod definition;
pub mod limits;

pub use definition::*;
pub use limits::*;
