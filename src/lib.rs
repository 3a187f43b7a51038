//! Classical ciphers behind one contract.
//!
//! Every cipher implements [`Cipher`]: `encrypt(text, key)` and `decrypt(text, key)`,
//! failing with [`CipherError::InvalidKey`] before touching the text when the key is bad.
//!
//! ```
//! use classical_ciphers::{by_name, Cipher};
//!
//! let vigenere = by_name("vigenere").unwrap();
//! assert_eq!(vigenere.encrypt("ATTACKATDAWN", "LEMON").unwrap(), "LXFOPVEFRNHR");
//! assert!(by_name("hill").unwrap().encrypt("HELP", "AAAA").is_err());
//! ```

pub mod batch;
pub mod cipher;

pub use cipher::{by_name, Cipher, CipherError, KeyError, CIPHERS};
