use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  classical-ciphers caesar encrypt 3 --text \"Hello, World!\"
  classical-ciphers vigenere decrypt key --text \"Rijvs, Uyvjn!\"
  classical-ciphers playfair encrypt keyword --text \"Hide the gold\"
  classical-ciphers substitution encrypt QWERTYUIOPASDFGHJKLZXCVBNM --text Hello
  classical-ciphers hill encrypt HILL --text HELP
  classical-ciphers caesar encrypt 5 --input-file input.txt --output-file output.txt
  classical-ciphers vigenere encrypt key --text-list Hello World --verbose
  classical-ciphers playfair inspect keyword";

#[derive(Parser)]
#[command(author, version, about = "Classical ciphers CLI", long_about = None, after_help = EXAMPLES)]
pub struct Args {
    pub cipher_name: CipherName,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Encrypt the given texts
    Encrypt(ProcessArgs),
    /// Decrypt the given texts
    Decrypt(ProcessArgs),
    /// Show what the key turns into (shift, key square, key matrix...)
    Inspect {
        /// Cipher key
        #[arg(allow_negative_numbers = true)]
        key: String,
    },
}

#[derive(ClapArgs)]
pub struct ProcessArgs {
    /// Cipher key
    #[arg(allow_negative_numbers = true)]
    pub key: String,
    #[command(flatten)]
    pub input: Input,
    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output_file: Option<PathBuf>,
    /// Delimiter splitting the values of --text-list
    #[arg(long, default_value = ",")]
    pub delimiter: String,
    /// Show every processed text in detail
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ClapArgs)]
#[group(required = true, multiple = false)]
pub struct Input {
    /// Text to process
    #[arg(short, long)]
    pub text: Option<String>,
    /// Several texts, each value is also split on --delimiter
    #[arg(long, num_args = 1..)]
    pub text_list: Option<Vec<String>>,
    /// File with one text per line
    #[arg(long)]
    pub input_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CipherName {
    Caesar,
    #[value(alias = "vigenère")]
    Vigenere,
    Playfair,
    Substitution,
    Hill,
}

impl CipherName {
    /// Name the cipher is registered under in the library
    pub fn as_str(self) -> &'static str {
        match self {
            CipherName::Caesar => "caesar",
            CipherName::Vigenere => "vigenere",
            CipherName::Playfair => "playfair",
            CipherName::Substitution => "substitution",
            CipherName::Hill => "hill",
        }
    }
}
