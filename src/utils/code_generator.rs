//! Short code generation.
//!
//! Codes are 8 base62 symbols derived from a random 63-bit integer. There is
//! no uniqueness check before insertion: the 62^8 (about 2.1e14) keyspace
//! keeps collisions negligible, and a collision that does happen is rejected
//! by the unique index on `short_urls.code`.

/// Base62 alphabet: lowercase, uppercase, then digits.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of symbols in every generated code.
pub const CODE_LENGTH: usize = 8;

const BASE: u64 = ALPHABET.len() as u64;

/// Generates a random short code.
///
/// # Examples
///
/// ```
/// use shortlink::utils::code_generator::{generate_code, CODE_LENGTH};
///
/// let code = generate_code();
/// assert_eq!(code.len(), CODE_LENGTH);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let value = rand::random::<u64>() & (i64::MAX as u64);
    encode_base62(value)
}

/// Encodes the low-order base62 digits of `value` into a [`CODE_LENGTH`] code.
///
/// Exactly [`CODE_LENGTH`] digits are produced whatever the magnitude of
/// `value`: small values are left-padded with `a` (digit zero) and the
/// higher digits of large values are dropped.
pub fn encode_base62(mut value: u64) -> String {
    let mut symbols = Vec::with_capacity(CODE_LENGTH);

    while symbols.len() < CODE_LENGTH {
        symbols.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }

    symbols.reverse();
    symbols.into_iter().map(char::from).collect()
}
