mod hub;
mod process;

pub use hub::ServiceHub;
pub use process::ProcessService;
