use rand::Rng;
use uuid::Uuid;

/// Opaque identifier for newly created rows.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Unguessable verification token: 32 random bytes, hex-encoded.
pub fn new_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}
