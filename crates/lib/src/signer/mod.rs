pub mod identity;
pub mod keypair_util;

pub use identity::{ensure_funded, load_or_create_identity, Identity, IdentitySource};
pub use keypair_util::KeypairUtil;
