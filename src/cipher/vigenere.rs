use super::{reject, shift_letter, Cipher, CipherError, KeyError, ALPHABET_LEN};

const NAME: &str = "vigenere";

/// Vigenère cipher
/// https://en.wikipedia.org/wiki/Vigen%C3%A8re_cipher
#[derive(Clone, Copy, Debug, Default)]
pub struct VigenereCipher;

/// Lowercased key letters, rejecting empty or non-alphabetic keys
fn key_letters(key: &str) -> Result<Vec<u8>, CipherError> {
    if key.is_empty() {
        return reject(NAME, KeyError::Empty);
    }
    if !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return reject(NAME, KeyError::NotAlphabetic);
    }
    Ok(key.bytes().map(|b| b.to_ascii_lowercase()).collect())
}

impl VigenereCipher {
    /// Lines the key up against `text`: every ASCII letter of `text` gets the
    /// next key letter, anything else is copied as is and does not advance the key.
    pub fn running_key(text: &str, key: &str) -> Result<String, CipherError> {
        let key = key_letters(key)?;
        let mut index = 0;
        Ok(text
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() {
                    let k = key[index % key.len()];
                    index += 1;
                    k as char
                } else {
                    c
                }
            })
            .collect())
    }

    fn transform(text: &str, key: &str, forward: bool) -> Result<String, CipherError> {
        let running = Self::running_key(text, key)?;
        Ok(text
            .chars()
            .zip(running.chars())
            .map(|(c, k)| {
                if !c.is_ascii_alphabetic() {
                    return c;
                }
                let shift = k as u8 - b'a';
                if forward {
                    shift_letter(c, shift)
                } else {
                    shift_letter(c, (ALPHABET_LEN - shift) % ALPHABET_LEN)
                }
            })
            .collect())
    }
}

impl Cipher for VigenereCipher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn key_hint(&self) -> &'static str {
        "Alphabetic (e.g., key)"
    }

    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        Self::transform(plaintext, key, true)
    }

    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        Self::transform(ciphertext, key, false)
    }

    fn inspect(&self, key: &str) -> Result<String, CipherError> {
        let shifts: Vec<String> = key_letters(key)?
            .into_iter()
            .map(|k| format!("{}={}", (k as char).to_ascii_uppercase(), k - b'a'))
            .collect();
        Ok(shifts.join(" "))
    }
}
