//! cdnjs API model types.

mod assets;
mod library;
mod search;

pub use assets::*;
pub use library::*;
pub use search::*;
