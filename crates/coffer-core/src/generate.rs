//! Random password generation.

use rand::Rng;

/// Generates a password of `length` characters drawn uniformly from the
/// printable ASCII range `'!'..='~'`. A length of zero yields an empty
/// string.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| rng.gen_range(b'!'..=b'~') as char)
        .collect()
}
