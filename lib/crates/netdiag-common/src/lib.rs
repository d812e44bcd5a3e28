pub mod platform;
pub mod types;

pub use platform::Platform;
pub use types::*;
