use crate::cipher::{Cipher, CipherError};
use log::debug;
use std::io::{self, BufRead};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    pub fn apply(self, cipher: &dyn Cipher, text: &str, key: &str) -> Result<String, CipherError> {
        match self {
            Mode::Encrypt => cipher.encrypt(text, key),
            Mode::Decrypt => cipher.decrypt(text, key),
        }
    }
}

/// Outcome for one input text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchItem {
    pub input: String,
    pub output: Result<String, CipherError>,
}

impl BatchItem {
    /// Detailed line printed in verbose mode, None for failed items
    pub fn verbose(&self, cipher: &dyn Cipher, key: &str) -> Option<String> {
        self.output.as_ref().ok().map(|output| {
            format!(
                "[VERBOSE] Cipher: {}, Key: {key}, Input: {}, Output: {output}",
                cipher.name(),
                self.input
            )
        })
    }

    /// Report line for this item
    pub fn report(&self) -> String {
        match &self.output {
            Ok(output) => format!("Input: {} -> Output: {output}", self.input),
            Err(_) => format!("Input: {} -> Error: Invalid key", self.input),
        }
    }
}

/// Runs every non-empty text through the cipher. A rejected key is recorded on
/// the item and does not stop the remaining texts.
pub fn process_texts<S: AsRef<str>>(
    cipher: &dyn Cipher,
    mode: Mode,
    texts: &[S],
    key: &str,
) -> Vec<BatchItem> {
    texts
        .iter()
        .map(AsRef::as_ref)
        .filter(|text| !text.is_empty())
        .map(|text| {
            let output = mode.apply(cipher, text, key);
            match &output {
                Ok(_) => debug!("{} {mode:?}: processed {} chars", cipher.name(), text.len()),
                Err(e) => debug!("{} {mode:?} failed: {e}", cipher.name()),
            }
            BatchItem {
                input: text.to_string(),
                output,
            }
        })
        .collect()
}

/// Splits every value on `delimiter`, dropping empty pieces
pub fn split_text_list<S: AsRef<str>>(values: &[S], delimiter: &str) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| {
            if delimiter.is_empty() {
                vec![v.as_ref()]
            } else {
                v.as_ref().split(delimiter).collect()
            }
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One text per non-blank line, without the line terminator
pub fn read_lines(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut texts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            texts.push(line);
        }
    }
    Ok(texts)
}

#[cfg(test)]
mod batch_test {
    use super::{process_texts, read_lines, split_text_list, BatchItem, Mode};
    use crate::cipher::{CaesarCipher, CipherError, KeyError, SubstitutionCipher};
    use std::io::Cursor;

    #[test]
    fn test_process_texts() {
        let items = process_texts(&CaesarCipher, Mode::Encrypt, &["ABC", "", "xyz"], "3");
        assert_eq!(
            items,
            vec![
                BatchItem {
                    input: "ABC".into(),
                    output: Ok("DEF".into())
                },
                BatchItem {
                    input: "xyz".into(),
                    output: Ok("abc".into())
                },
            ]
        );
        assert_eq!(items[0].report(), "Input: ABC -> Output: DEF");
        assert_eq!(
            items[1].verbose(&CaesarCipher, "3").unwrap(),
            "[VERBOSE] Cipher: caesar, Key: 3, Input: xyz, Output: abc"
        );
    }

    #[test]
    fn test_invalid_key_does_not_abort() {
        let texts = vec!["one".to_string(), "two".to_string()];
        let items = process_texts(&SubstitutionCipher, Mode::Decrypt, &texts, "QWERTY");
        assert_eq!(items.len(), 2);
        for item in &items {
            assert_eq!(
                item.output,
                Err(CipherError::InvalidKey(KeyError::WrongLength(26)))
            );
        }
        assert_eq!(items[1].report(), "Input: two -> Error: Invalid key");
        assert!(items[1].verbose(&SubstitutionCipher, "QWERTY").is_none());
    }

    #[test]
    fn test_split_text_list() {
        assert_eq!(
            split_text_list(&["Hello,World", "a,,b", ","], ","),
            ["Hello", "World", "a", "b"]
        );
        assert_eq!(split_text_list(&["a;b"], ","), ["a;b"]);
        assert_eq!(split_text_list(&["a b"], ""), ["a b"]);
    }

    #[test]
    fn test_read_lines() {
        let texts = read_lines(Cursor::new("first line\n\n   \nsecond, line\r\nlast")).unwrap();
        assert_eq!(texts, ["first line", "second, line", "last"]);
    }
}
