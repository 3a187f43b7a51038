use super::{index_letter, reject, shift_letter, Cipher, CipherError, KeyError, ALPHABET_LEN};
use num::{BigInt, Integer, ToPrimitive};

const NAME: &str = "caesar";

/// Caesar cipher
/// https://en.wikipedia.org/wiki/Caesar_cipher
#[derive(Clone, Copy, Debug, Default)]
pub struct CaesarCipher;

impl CaesarCipher {
    /// Parses an integer key of any size into a forward shift in `0..26`.
    /// Negative keys are normalized modulo 26.
    pub fn shift(key: &str) -> Result<u8, CipherError> {
        let Ok(k) = key.trim().parse::<BigInt>() else {
            return reject(NAME, KeyError::NotInteger);
        };
        match k.mod_floor(&BigInt::from(ALPHABET_LEN)).to_u8() {
            Some(shift) => Ok(shift),
            None => reject(NAME, KeyError::NotInteger),
        }
    }
}

fn shift_text(text: &str, shift: u8) -> String {
    text.chars().map(|c| shift_letter(c, shift)).collect()
}

impl Cipher for CaesarCipher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn key_hint(&self) -> &'static str {
        "Integer (e.g., 3)"
    }

    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        Ok(shift_text(plaintext, Self::shift(key)?))
    }

    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let shift = Self::shift(key)?;
        Ok(shift_text(ciphertext, (ALPHABET_LEN - shift) % ALPHABET_LEN))
    }

    fn inspect(&self, key: &str) -> Result<String, CipherError> {
        let shift = Self::shift(key)?;
        let plain: String = (0..ALPHABET_LEN).map(index_letter).collect();
        let shifted: String = (0..ALPHABET_LEN).map(|i| index_letter(i + shift)).collect();
        Ok(format!("shift {shift}\n{plain}\n{shifted}"))
    }
}
