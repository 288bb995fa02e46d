use std::sync::OnceLock;

use tracing::error;

/// bcrypt work factor. Fixed so hashes stay comparable across deployments.
pub const HASH_COST: u32 = 10;

pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, HASH_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        e
    })
}

/// Constant-time comparison is done inside `bcrypt::verify`.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        e
    })
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("no-such-user").ok())
        .as_deref()
}

/// Spends one cost-10 verification so a login for an unknown username takes
/// as long as one with a wrong password. Always `false`.
pub fn verify_against_dummy(plain: &str) -> bool {
    if let Some(hash) = dummy_hash() {
        let _ = bcrypt::verify(plain, hash);
    }
    false
}
