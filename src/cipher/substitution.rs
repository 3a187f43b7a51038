use super::{preserve_case, reject, Cipher, CipherError, KeyError, ALPHABET_LEN};
use std::{collections::HashMap, fmt, hash::Hash};

const NAME: &str = "substitution";

fn inverse_map<K, V>(m: HashMap<K, V>) -> HashMap<V, K>
where
    V: Eq + Hash,
{
    let mut result = HashMap::with_capacity(m.capacity());
    for (k, v) in m {
        result.insert(v, k);
    }
    result
}

/// Plain alphabet to key alphabet, both ways. Letters are stored uppercase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionTable {
    direct: HashMap<char, char>,
    inverse: HashMap<char, char>,
}

impl SubstitutionTable {
    /// Builds the table from a 26 letter permutation of the alphabet, case-insensitive.
    pub fn new(key: &str) -> Result<Self, CipherError> {
        let key: Vec<char> = key.chars().map(|c| c.to_ascii_uppercase()).collect();
        if key.len() != usize::from(ALPHABET_LEN) {
            return reject(NAME, KeyError::WrongLength(ALPHABET_LEN.into()));
        }
        if !key.iter().all(char::is_ascii_alphabetic) {
            return reject(NAME, KeyError::NotAlphabetic);
        }
        let direct: HashMap<_, _> = ('A'..='Z').zip(key).collect();
        let inverse = inverse_map(direct.clone());
        if inverse.len() != direct.len() {
            return reject(NAME, KeyError::RepeatingAlphabet);
        }
        Ok(Self { direct, inverse })
    }

    pub fn encode(&self, c: char) -> Option<char> {
        self.direct.get(&c.to_ascii_uppercase()).copied()
    }

    pub fn decode(&self, c: char) -> Option<char> {
        self.inverse.get(&c.to_ascii_uppercase()).copied()
    }
}

impl fmt::Display for SubstitutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain: String = ('A'..='Z').collect();
        let key: String = ('A'..='Z').filter_map(|c| self.encode(c)).collect();
        write!(f, "{plain}\n{key}")
    }
}

fn substitute(text: &str, lookup: impl Fn(char) -> Option<char>) -> String {
    text.chars()
        .map(|c| match lookup(c) {
            Some(s) => preserve_case(c, s),
            None => c,
        })
        .collect()
}

/// Monoalphabetic substitution cipher
/// https://en.wikipedia.org/wiki/Substitution_cipher
#[derive(Clone, Copy, Debug, Default)]
pub struct SubstitutionCipher;

impl Cipher for SubstitutionCipher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn key_hint(&self) -> &'static str {
        "26-letter mapping (e.g., QWERTYUIOPASDFGHJKLZXCVBNM)"
    }

    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        let table = SubstitutionTable::new(key)?;
        Ok(substitute(plaintext, |c| table.encode(c)))
    }

    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let table = SubstitutionTable::new(key)?;
        Ok(substitute(ciphertext, |c| table.decode(c)))
    }

    fn inspect(&self, key: &str) -> Result<String, CipherError> {
        Ok(SubstitutionTable::new(key)?.to_string())
    }
}

#[cfg(test)]
mod substitution_cipher_test {
    use super::{SubstitutionCipher, SubstitutionTable};
    use crate::cipher::{Cipher, CipherError, KeyError};

    const KEY: &str = "QWERTYUIOPASDFGHJKLZXCVBNM";

    #[test]
    fn test_encrypt() {
        let cipher = SubstitutionCipher;
        assert_eq!(cipher.encrypt("Hello", KEY).unwrap(), "Itssg");
        assert_eq!(cipher.encrypt("abc", KEY).unwrap(), "qwe");
    }

    #[test]
    fn test_decrypt() {
        let cipher = SubstitutionCipher;
        assert_eq!(cipher.decrypt("Itssg", KEY).unwrap(), "Hello");
        assert_eq!(cipher.decrypt("qwe", KEY).unwrap(), "abc");
    }

    #[test]
    fn test_substitution_symmetric() {
        let cipher = SubstitutionCipher;
        let letters: String = ('a'..='z').chain('A'..='Z').collect();
        let message = format!("{letters} 0123 ,.;!?");
        for key in [KEY, "zyxwvutsrqponmlkjihgfedcba", "MnBvCxZlKjHgFdSaPoIuYtReWq"] {
            let cipher_text = cipher.encrypt(&message, key).unwrap();
            assert_ne!(message, cipher_text);
            assert_eq!(cipher.decrypt(&cipher_text, key).unwrap(), message);
        }
    }

    #[test]
    fn test_identity_key() {
        let cipher = SubstitutionCipher;
        let alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        assert_eq!(cipher.encrypt("No-op, really.", alphabet).unwrap(), "No-op, really.");
    }

    #[test]
    fn test_invalid_key() {
        let cipher = SubstitutionCipher;
        let short = Err(CipherError::InvalidKey(KeyError::WrongLength(26)));
        assert_eq!(cipher.encrypt("Hello", "QWERTY"), short);
        assert_eq!(cipher.decrypt("Hello", "QWERTY"), short);
        assert_eq!(
            cipher.encrypt("Hello", "QWERTYUIOPASDFGHJKLZXCVBNQ"),
            Err(CipherError::InvalidKey(KeyError::RepeatingAlphabet))
        );
        assert_eq!(
            cipher.encrypt("Hello", "qWERTYUIOPASDFGHJKLZXCVBNQ"),
            Err(CipherError::InvalidKey(KeyError::RepeatingAlphabet))
        );
        assert_eq!(
            cipher.encrypt("Hello", "QWERTYUIOPASDFGHJKLZXCVBN1"),
            Err(CipherError::InvalidKey(KeyError::NotAlphabetic))
        );
    }

    #[test]
    fn test_empty_string() {
        let cipher = SubstitutionCipher;
        assert_eq!(cipher.encrypt("", KEY).unwrap(), "");
        assert_eq!(cipher.decrypt("", KEY).unwrap(), "");
    }

    #[test]
    fn test_table() {
        let table = SubstitutionTable::new(KEY).unwrap();
        assert_eq!(table.encode('h'), Some('I'));
        assert_eq!(table.decode('I'), Some('H'));
        assert_eq!(table.encode('!'), None);
        assert_eq!(table, SubstitutionTable::new(&KEY.to_lowercase()).unwrap());
        assert_eq!(
            SubstitutionCipher.inspect(KEY).unwrap(),
            format!("ABCDEFGHIJKLMNOPQRSTUVWXYZ\n{KEY}")
        );
    }
}
