mod instruction_util;
mod transaction;
pub use instruction_util::*;
pub use transaction::*;
