use anyhow::{bail, Context};
use args::{Args, CipherName, Command, Input, ProcessArgs};
use classical_ciphers::{
    batch::{self, BatchItem, Mode},
    by_name, Cipher,
};
use clap::Parser;
use log::{debug, info, LevelFilter};
use std::{
    fs::{self, File},
    io::BufReader,
};

pub mod args;

fn read_texts(input: &Input, delimiter: &str) -> anyhow::Result<Vec<String>> {
    if let Some(values) = &input.text_list {
        Ok(batch::split_text_list(values, delimiter))
    } else if let Some(path) = &input.input_file {
        let file = File::open(path)
            .with_context(|| format!("Error reading input file {}", path.display()))?;
        batch::read_lines(BufReader::new(file))
            .with_context(|| format!("Error reading input file {}", path.display()))
    } else if let Some(text) = &input.text {
        Ok(vec![text.clone()])
    } else {
        bail!("No input text provided.")
    }
}

fn process(cipher: &dyn Cipher, mode: Mode, args: &ProcessArgs) -> anyhow::Result<()> {
    let texts = read_texts(&args.input, &args.delimiter)?;
    info!("{} {mode:?}: {} text(s)", cipher.name(), texts.len());
    let items = batch::process_texts(cipher, mode, &texts, &args.key);
    for item in &items {
        match &item.output {
            Ok(_) if args.verbose => {
                if let Some(line) = item.verbose(cipher, &args.key) {
                    println!("{line}");
                }
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {e} (expected: {})", cipher.key_hint());
                debug!("{} rejected key {:?}", cipher.name(), args.key);
            }
        }
    }

    let report = items
        .iter()
        .map(BatchItem::report)
        .collect::<Vec<_>>()
        .join("\n");
    match &args.output_file {
        Some(path) => fs::write(path, format!("{report}\n"))
            .with_context(|| format!("Error writing output file {}", path.display()))?,
        None => println!("{report}"),
    }
    Ok(())
}

fn lookup(name: CipherName) -> anyhow::Result<&'static dyn Cipher> {
    by_name(name.as_str()).with_context(|| format!("unknown cipher {}", name.as_str()))
}

fn main() -> anyhow::Result<()> {
    let Args {
        cipher_name,
        command,
    } = Args::parse();
    let verbose = matches!(&command, Command::Encrypt(p) | Command::Decrypt(p) if p.verbose);
    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let cipher = lookup(cipher_name)?;
    match command {
        Command::Encrypt(args) => process(cipher, Mode::Encrypt, &args)?,
        Command::Decrypt(args) => process(cipher, Mode::Decrypt, &args)?,
        Command::Inspect { key } => {
            let shown = cipher
                .inspect(&key)
                .with_context(|| format!("expected key: {}", cipher.key_hint()))?;
            println!("{shown}");
        }
    };
    Ok(())
}
