mod note;
mod patch;

pub use note::*;
pub use patch::*;
