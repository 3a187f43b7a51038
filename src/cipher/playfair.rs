use super::{letter_index, reject, uppercase_letters, Cipher, CipherError, KeyError, ALPHABET_LEN};
use log::trace;
use std::fmt;

const NAME: &str = "playfair";

/// Side of the key square
pub const SQUARE_SIZE: usize = 5;

/// Letter inserted between doubled letters and used to pad odd lengths
pub const FILLER: char = 'X';

/// J shares a cell with I
fn fold_j(c: char) -> char {
    if c == 'J' {
        'I'
    } else {
        c
    }
}

/// Uppercase letters of `text` with J folded into I
fn normalize(text: &str) -> Vec<char> {
    uppercase_letters(text).chars().map(fold_j).collect()
}

/// The 5x5 key square of the Playfair cipher
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayfairSquare {
    grid: [[char; SQUARE_SIZE]; SQUARE_SIZE],
    /// (row, column) of every letter, J pointing at the cell of I
    positions: [(usize, usize); ALPHABET_LEN as usize],
}

impl PlayfairSquare {
    /// Lays out the deduplicated key letters followed by the rest of the alphabet.
    /// Non-letters in the key are ignored; a key without letters is rejected.
    pub fn new(key: &str) -> Result<Self, CipherError> {
        let key = normalize(key);
        if key.is_empty() {
            return reject(NAME, KeyError::NotAlphabetic);
        }

        let mut grid = [[' '; SQUARE_SIZE]; SQUARE_SIZE];
        let mut positions = [(0, 0); ALPHABET_LEN as usize];
        let mut seen = [false; ALPHABET_LEN as usize];
        let mut placed = 0;
        for c in key.into_iter().chain(('A'..='Z').map(fold_j)) {
            if placed == SQUARE_SIZE * SQUARE_SIZE {
                break;
            }
            let Some(i) = letter_index(c) else { continue };
            let i = usize::from(i);
            if seen[i] {
                continue;
            }
            seen[i] = true;
            let cell = (placed / SQUARE_SIZE, placed % SQUARE_SIZE);
            grid[cell.0][cell.1] = c;
            positions[i] = cell;
            placed += 1;
        }
        positions[usize::from(b'J' - b'A')] = positions[usize::from(b'I' - b'A')];

        let square = Self { grid, positions };
        trace!("playfair square:\n{square}");
        Ok(square)
    }

    pub fn rows(&self) -> &[[char; SQUARE_SIZE]; SQUARE_SIZE] {
        &self.grid
    }

    /// (row, column) of an uppercase letter, None for anything else
    pub fn position(&self, c: char) -> Option<(usize, usize)> {
        c.is_ascii_uppercase()
            .then(|| self.positions[usize::from(c as u8 - b'A')])
    }

    /// Applies the Playfair rules to a digraph of square letters.
    /// `step` is 1 to encrypt (right/below) and `SQUARE_SIZE - 1` to decrypt (left/above).
    fn transform_pair(&self, (a, b): (char, char), step: usize) -> Option<(char, char)> {
        let (row_a, col_a) = self.position(a)?;
        let (row_b, col_b) = self.position(b)?;
        let g = &self.grid;
        Some(if row_a == row_b {
            (
                g[row_a][(col_a + step) % SQUARE_SIZE],
                g[row_b][(col_b + step) % SQUARE_SIZE],
            )
        } else if col_a == col_b {
            (
                g[(row_a + step) % SQUARE_SIZE][col_a],
                g[(row_b + step) % SQUARE_SIZE][col_b],
            )
        } else {
            (g[row_a][col_b], g[row_b][col_a])
        })
    }

    fn transform(&self, pairs: &[(char, char)], step: usize) -> String {
        pairs
            .iter()
            .filter_map(|&pair| self.transform_pair(pair, step))
            .flat_map(|(a, b)| [a, b])
            .collect()
    }
}

impl fmt::Display for PlayfairSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        write!(f, "{}", rows.join("\n"))
    }
}

/// Splits plaintext into digraphs of distinct letters: a doubled letter gets an
/// X after its first occurrence, and a lone last letter is padded with X.
pub fn digraphs(text: &str) -> Vec<(char, char)> {
    let letters = normalize(text);
    let mut pairs = Vec::with_capacity(letters.len() / 2 + 1);
    let mut i = 0;
    while i < letters.len() {
        let a = letters[i];
        match letters.get(i + 1) {
            Some(&b) if b != a => {
                pairs.push((a, b));
                i += 2;
            }
            _ => {
                pairs.push((a, FILLER));
                i += 1;
            }
        }
    }
    pairs
}

/// Ciphertext is paired up as is, only an odd tail is padded
fn ciphertext_pairs(text: &str) -> Vec<(char, char)> {
    normalize(text)
        .chunks(2)
        .map(|pair| (pair[0], pair.get(1).copied().unwrap_or(FILLER)))
        .collect()
}

/// Playfair digraph cipher
/// https://en.wikipedia.org/wiki/Playfair_cipher
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayfairCipher;

impl Cipher for PlayfairCipher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn key_hint(&self) -> &'static str {
        "Alphabetic (e.g., keyword)"
    }

    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        let square = PlayfairSquare::new(key)?;
        Ok(square.transform(&digraphs(plaintext), 1))
    }

    /// Fillers are left in place: the result is the padded uppercase plaintext.
    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let square = PlayfairSquare::new(key)?;
        Ok(square.transform(&ciphertext_pairs(ciphertext), SQUARE_SIZE - 1))
    }

    fn inspect(&self, key: &str) -> Result<String, CipherError> {
        Ok(PlayfairSquare::new(key)?.to_string())
    }
}

#[cfg(test)]
mod playfair_cipher_test {
    use super::{digraphs, PlayfairCipher, PlayfairSquare};
    use crate::cipher::{Cipher, CipherError, KeyError};

    #[test]
    fn test_square() {
        let square = PlayfairSquare::new("keyword").unwrap();
        assert_eq!(
            square.to_string(),
            "K E Y W O\nR D A B C\nF G H I L\nM N P Q S\nT U V X Z"
        );
        assert_eq!(square.position('I'), Some((2, 3)));
        assert_eq!(square.position('J'), Some((2, 3)));
        assert_eq!(square.position('k'), None);
    }

    #[test]
    fn test_square_merges_i_and_j() {
        let square = PlayfairSquare::new("Jelly Jam!").unwrap();
        let letters: Vec<char> = square.rows().iter().flatten().copied().collect();
        assert_eq!(letters.len(), 25);
        assert_eq!(&letters[..5], &['I', 'E', 'L', 'Y', 'A']);
        assert!(!letters.contains(&'J'));
        for c in 'A'..='Z' {
            let expected = usize::from(c != 'J');
            assert_eq!(letters.iter().filter(|&&l| l == c).count(), expected, "{c}");
        }
    }

    #[test]
    fn test_square_is_deterministic() {
        assert_eq!(
            PlayfairSquare::new("playfair example").unwrap(),
            PlayfairSquare::new("PLAYFAIR EXAMPLE").unwrap()
        );
    }

    #[test]
    fn test_digraphs() {
        let pairs = |t: &str| -> Vec<String> {
            digraphs(t)
                .into_iter()
                .map(|(a, b)| format!("{a}{b}"))
                .collect()
        };
        assert_eq!(pairs("Hide the gold"), ["HI", "DE", "TH", "EG", "OL", "DX"]);
        assert_eq!(pairs("balloon"), ["BA", "LX", "LO", "ON"]);
        assert_eq!(pairs("jig"), ["IX", "IG"]);
        assert_eq!(pairs("x"), ["XX"]);
        assert!(pairs("1234").is_empty());
    }

    #[test]
    fn test_encrypt() {
        let cipher = PlayfairCipher;
        assert_eq!(cipher.encrypt("Hide the gold", "keyword").unwrap(), "ILGDVFDNCSBU");
        assert_eq!(cipher.encrypt("balloon", "playfair").unwrap(), "HBYVRVQO");
    }

    #[test]
    fn test_decrypt() {
        let cipher = PlayfairCipher;
        assert_eq!(cipher.decrypt("ILGDVFDNCSBU", "keyword").unwrap(), "HIDETHEGOLDX");
        assert_eq!(cipher.decrypt("HBYVRVQO", "playfair").unwrap(), "BALXLOON");
        assert_eq!(cipher.decrypt("ilgd vfdn csbu", "keyword").unwrap(), "HIDETHEGOLDX");
    }

    #[test]
    fn test_round_trip_normalizes() {
        let cipher = PlayfairCipher;
        let cipher_text = cipher.encrypt("Meet me at the bridge!", "Monarchy").unwrap();
        assert_eq!(cipher_text, "CLKLCLRSPDICAKYKIU");
        assert_eq!(
            cipher.decrypt(&cipher_text, "Monarchy").unwrap(),
            "MEETMEATTHEBRIDGEX"
        );
    }

    #[test]
    fn test_odd_ciphertext_is_padded() {
        let cipher = PlayfairCipher;
        assert_eq!(
            cipher.decrypt("ILG", "keyword").unwrap(),
            cipher.decrypt("ILGX", "keyword").unwrap()
        );
    }

    #[test]
    fn test_invalid_key() {
        let cipher = PlayfairCipher;
        let err = Err(CipherError::InvalidKey(KeyError::NotAlphabetic));
        assert_eq!(cipher.encrypt("Hello", "1234"), err);
        assert_eq!(cipher.decrypt("Hello", ""), err);
        assert_eq!(cipher.inspect("!!"), Err(CipherError::InvalidKey(KeyError::NotAlphabetic)));
    }

    #[test]
    fn test_empty_string() {
        let cipher = PlayfairCipher;
        assert_eq!(cipher.encrypt("", "keyword").unwrap(), "");
        assert_eq!(cipher.decrypt("", "keyword").unwrap(), "");
    }
}
