pub mod constants;
pub mod setup;

pub use constants::*;
pub use setup::*;
