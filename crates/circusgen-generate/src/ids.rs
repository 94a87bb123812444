use rand::Rng;
use uuid::{Builder, Uuid};

/// Draw a fresh version-4 UUID from the given random source.
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let bytes: [u8; 16] = rng.random();
    Builder::from_random_bytes(bytes).into_uuid()
}
