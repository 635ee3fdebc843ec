//! Build server endpoint modules.

mod branches;
mod builds;

pub use branches::BranchesApi;
pub use builds::BuildsApi;
