use super::{
    absmod, index_letter, letter_index, modular_multiplicative_inverse, reject, uppercase_letters,
    Cipher, CipherError, KeyError, ALPHABET_LEN,
};
use log::trace;
use std::fmt;

const NAME: &str = "hill";

/// Largest supported matrix order. Keeps exact determinants within `i128`.
pub const MAX_ORDER: usize = 8;

/// Letter appended to fill the last block
pub const PADDING: char = 'X';

const MODULUS: i128 = ALPHABET_LEN as i128;

/// Determinant of a square matrix given row-major, by fraction-free (Bareiss) elimination.
/// Exact for integer entries.
fn determinant(n: usize, entries: &[i128]) -> i128 {
    if n == 0 {
        return 1;
    }
    let mut m: Vec<Vec<i128>> = entries.chunks(n).map(<[i128]>::to_vec).collect();
    let mut sign = 1;
    let mut previous_pivot = 1;
    for k in 0..n - 1 {
        if m[k][k] == 0 {
            match (k + 1..n).find(|&r| m[r][k] != 0) {
                Some(r) => {
                    m.swap(k, r);
                    sign = -sign;
                }
                None => return 0,
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                m[i][j] = (m[i][j] * m[k][k] - m[i][k] * m[k][j]) / previous_pivot;
            }
        }
        previous_pivot = m[k][k];
    }
    sign * m[n - 1][n - 1]
}

/// An n x n matrix over the integers, as used by the Hill cipher
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMatrix {
    n: usize,
    /// row-major
    entries: Vec<i128>,
}

impl KeyMatrix {
    /// Reads an alphabetic key of length n² (2 <= n <= MAX_ORDER) row by row, A=0 .. Z=25.
    /// The matrix must be invertible modulo 26.
    pub fn new(key: &str) -> Result<Self, CipherError> {
        let key = key.to_ascii_uppercase();
        let len = key.chars().count();
        let mut n = 0;
        while (n + 1) * (n + 1) <= len {
            n += 1;
        }
        if n < 2 || n * n != len || n > MAX_ORDER {
            return reject(NAME, KeyError::NotSquare(MAX_ORDER * MAX_ORDER));
        }
        let Some(entries) = key
            .chars()
            .map(|c| letter_index(c).map(i128::from))
            .collect::<Option<Vec<_>>>()
        else {
            return reject(NAME, KeyError::NotAlphabetic);
        };

        let matrix = Self { n, entries };
        if matrix.determinant_inverse().is_none() {
            return reject(NAME, KeyError::NotCoprime);
        }
        trace!("hill key matrix:\n{matrix}");
        Ok(matrix)
    }

    /// Order of the matrix
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i128]> {
        self.entries.chunks(self.n)
    }

    /// Entry at (row, col), None outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<i128> {
        if row >= self.n || col >= self.n {
            return None;
        }
        self.entries.get(row * self.n + col).copied()
    }

    pub fn determinant(&self) -> i128 {
        determinant(self.n, &self.entries)
    }

    /// Modular inverse of the determinant, None when it shares a factor with 26
    fn determinant_inverse(&self) -> Option<i128> {
        modular_multiplicative_inverse(absmod(self.determinant(), MODULUS), MODULUS)
    }

    /// Determinant of the matrix without `row` and `col`
    fn minor(&self, row: usize, col: usize) -> i128 {
        let entries: Vec<i128> = self
            .rows()
            .enumerate()
            .filter(|&(r, _)| r != row)
            .flat_map(|(_, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| c != col)
                    .map(|(_, &v)| v)
            })
            .collect();
        determinant(self.n - 1, &entries)
    }

    /// Transpose of the cofactor matrix, reduced modulo 26
    pub fn adjugate(&self) -> KeyMatrix {
        let n = self.n;
        let mut entries = vec![0; n * n];
        for r in 0..n {
            for c in 0..n {
                let sign = if (r + c) % 2 == 0 { 1 } else { -1 };
                entries[c * n + r] = absmod(sign * self.minor(r, c), MODULUS);
            }
        }
        KeyMatrix { n, entries }
    }

    /// Inverse modulo 26: adjugate times the inverse of the determinant
    pub fn inverse(&self) -> Result<KeyMatrix, CipherError> {
        let Some(det_inv) = self.determinant_inverse() else {
            return reject(NAME, KeyError::NotCoprime);
        };
        let mut inverse = self.adjugate();
        for v in inverse.entries.iter_mut() {
            *v = absmod(det_inv * *v, MODULUS);
        }
        trace!("hill inverse matrix:\n{inverse}");
        Ok(inverse)
    }

    /// Multiplies every block of n letters, taken as a column vector, by the matrix.
    /// `text` must hold uppercase letters only, its length a multiple of n.
    fn apply(&self, text: &str) -> String {
        let values: Vec<i128> = text
            .chars()
            .filter_map(letter_index)
            .map(i128::from)
            .collect();
        values
            .chunks(self.n)
            .flat_map(|block| {
                self.rows().map(move |row| {
                    let sum: i128 = row.iter().zip(block).map(|(a, b)| a * b).sum();
                    index_letter(absmod(sum, MODULUS) as u8)
                })
            })
            .collect()
    }
}

impl fmt::Display for KeyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .rows()
            .map(|row| {
                row.iter()
                    .map(|v| format!("{v:2}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        write!(f, "{}", rows.join("\n"))
    }
}

/// Uppercase letters of `text`, padded with X to a multiple of `n`
fn prepare(text: &str, n: usize) -> String {
    let mut text = uppercase_letters(text);
    while text.len() % n != 0 {
        text.push(PADDING);
    }
    text
}

/// Hill matrix cipher
/// https://en.wikipedia.org/wiki/Hill_cipher
#[derive(Clone, Copy, Debug, Default)]
pub struct HillCipher;

impl Cipher for HillCipher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn key_hint(&self) -> &'static str {
        "Perfect square length (e.g., 4, 9, 16) alphabetic"
    }

    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        let matrix = KeyMatrix::new(key)?;
        Ok(matrix.apply(&prepare(plaintext, matrix.size())))
    }

    /// Ciphertext of the wrong length is padded like plaintext rather than rejected.
    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let inverse = KeyMatrix::new(key)?.inverse()?;
        Ok(inverse.apply(&prepare(ciphertext, inverse.size())))
    }

    fn inspect(&self, key: &str) -> Result<String, CipherError> {
        let matrix = KeyMatrix::new(key)?;
        let n = matrix.size();
        Ok(format!(
            "Hill Matrix ({n}x{n}):\n{matrix}\nInverse (mod 26):\n{}",
            matrix.inverse()?
        ))
    }
}
