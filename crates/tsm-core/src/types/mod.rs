mod build;
mod installed;
mod inventory;

pub use build::*;
pub use installed::*;
pub use inventory::*;
