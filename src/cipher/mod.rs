use derive_more::{Display, From};
use log::debug;
use num::{one, Integer, Signed};

pub mod caesar;
pub mod hill;
pub mod playfair;
pub mod substitution;
pub mod vigenere;

pub use caesar::CaesarCipher;
pub use hill::{HillCipher, KeyMatrix};
pub use playfair::{PlayfairCipher, PlayfairSquare};
pub use substitution::{SubstitutionCipher, SubstitutionTable};
pub use vigenere::VigenereCipher;

/// Number of letters in the cipher alphabet (A-Z)
pub const ALPHABET_LEN: u8 = 26;

/// Reason a key was rejected
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    #[display(fmt = "key must be an integer")]
    NotInteger,
    #[display(fmt = "key must be alphabetic")]
    NotAlphabetic,
    #[display(fmt = "key must not be empty")]
    Empty,
    #[display(fmt = "key must be exactly {} letters", _0)]
    WrongLength(usize),
    #[display(fmt = "alphabet has repeating characters")]
    RepeatingAlphabet,
    #[display(fmt = "key length must be a perfect square (4, 9, 16, ... up to {})", _0)]
    NotSquare(usize),
    #[display(fmt = "key matrix determinant and 26 are not coprime")]
    NotCoprime,
}

impl std::error::Error for KeyError {}

/// Common errors for ciphers
#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    #[display(fmt = "invalid key: {}", _0)]
    InvalidKey(KeyError),
}

impl std::error::Error for CipherError {}

pub trait Cipher: Sync {
    /// Name the cipher is registered under
    fn name(&self) -> &'static str;

    /// Short description of what a valid key looks like
    fn key_hint(&self) -> &'static str;

    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError>;
    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError>;

    /// Renders the structure derived from `key` (shifted alphabet, key square, key matrix...).
    /// Rejects exactly the keys `encrypt` rejects.
    fn inspect(&self, key: &str) -> Result<String, CipherError>;
}

/// Every cipher, keyed by name
pub static CIPHERS: &[&dyn Cipher] = &[
    &CaesarCipher,
    &VigenereCipher,
    &PlayfairCipher,
    &SubstitutionCipher,
    &HillCipher,
];

/// Looks a cipher up by name. Case-insensitive, accepts "vigenère".
pub fn by_name(name: &str) -> Option<&'static dyn Cipher> {
    let name = name.trim().to_lowercase().replace('è', "e");
    CIPHERS.iter().copied().find(|c| c.name() == name)
}

/// Logs the rejection and returns it as an error
pub(crate) fn reject<T>(cipher: &str, reason: KeyError) -> Result<T, CipherError> {
    debug!("rejected {cipher} key: {reason}");
    Err(reason.into())
}

/// Returns `replacement` cased like `original`
pub fn preserve_case(original: char, replacement: char) -> char {
    if original.is_uppercase() {
        replacement.to_ascii_uppercase()
    } else {
        replacement.to_ascii_lowercase()
    }
}

/// Position of an ASCII letter in the alphabet, ignoring case
pub fn letter_index(c: char) -> Option<u8> {
    c.is_ascii_alphabetic()
        .then(|| c.to_ascii_uppercase() as u8 - b'A')
}

/// Uppercase letter at position `i` (taken modulo 26)
pub fn index_letter(i: u8) -> char {
    (b'A' + i % ALPHABET_LEN) as char
}

/// Shifts a letter forward by `shift` positions keeping its case.
/// Anything that is not an ASCII letter is returned unchanged.
pub fn shift_letter(c: char, shift: u8) -> char {
    match letter_index(c) {
        Some(i) => preserve_case(c, index_letter((i + shift % ALPHABET_LEN) % ALPHABET_LEN)),
        None => c,
    }
}

/// Uppercases `text` and drops everything that is not an ASCII letter
pub fn uppercase_letters(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Calculates modular multiplicative inverse for given integers.
/// Returns None if they are not coprime.
/// https://www.geeksforgeeks.org/multiplicative-inverse-under-modulo-m/
#[inline]
pub fn modular_multiplicative_inverse<A: Integer + Signed + Copy>(a: A, m: A) -> Option<A> {
    let gcd = a.extended_gcd(&m);
    if gcd.gcd != one() {
        None
    } else {
        Some(absmod(gcd.x, m))
    }
}

/// Least non-negative residue of `a` modulo `m`
#[inline]
pub fn absmod<A: Integer + Signed + Copy>(a: A, m: A) -> A {
    if a.is_negative() {
        let n = (a / m).abs() + one();
        (a + n * m) % m
    } else {
        a % m
    }
}
