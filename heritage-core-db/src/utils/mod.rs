use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// The hash is stable across runs and systems: CBOR gives a deterministic
/// binary representation and XxHash64 runs with a fixed seed (0). Index
/// columns storing these values must be produced by this function and nothing
/// else.
pub fn hash_as_i64<T: Serialize>(data: &T) -> i64 {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .expect("CBOR serialization of an in-memory value cannot fail");
    hasher.write(&cbor);
    hasher.finish() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_for_equal_input() {
        assert_eq!(hash_as_i64(&"aisha"), hash_as_i64(&"aisha"));
        assert_ne!(hash_as_i64(&"aisha"), hash_as_i64(&"Aisha"));
    }
}
