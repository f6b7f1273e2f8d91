use std::error::Error;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use ptbtok::input::{self, Source};
use ptbtok::{logging, ptb_to_text, PtbTokenizer, TokenizerOptions};

#[derive(Parser, Debug)]
#[command(name = "ptbtok", version, about = "Penn Treebank style tokenizer")]
struct Cli {
    /// Input files; standard input when none are given
    files: Vec<PathBuf>,

    /// Comma-separated tokenizer options, e.g. "invertible,quotes=ascii"
    #[arg(short, long, default_value = "")]
    options: String,

    /// Detokenize lines of space-separated tokens instead of tokenizing
    #[arg(long)]
    untok: bool,

    /// Print the tokens of each input on one line, separated by spaces
    #[arg(long)]
    one_line: bool,

    /// Print begin and end offsets after each token
    #[arg(long)]
    offsets: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = TokenizerOptions::parse(&cli.options)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.files.is_empty() {
        if cli.untok {
            detokenize(io::stdin().lock(), &mut out)?;
        } else {
            tokenize(input::stdin(), &options, &cli, &mut out)?;
        }
    }

    for path in &cli.files {
        info!(path = %path.display(), "processing");
        if cli.untok {
            detokenize(BufReader::new(input::open_file(path)?), &mut out)?;
        } else {
            tokenize(input::open(path)?, &options, &cli, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn tokenize(
    source: Source,
    options: &TokenizerOptions,
    cli: &Cli,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let tokenizer = PtbTokenizer::builder()
        .source(source)
        .options(options.clone())
        .build()?;

    let mut first = true;
    for token in tokenizer {
        let token = token?;
        let text = if cli.offsets {
            format!("{}\t{}\t{}", token.text, token.begin, token.end)
        } else {
            token.text
        };
        if !cli.one_line {
            writeln!(out, "{text}")?;
        } else if first {
            write!(out, "{text}")?;
        } else {
            write!(out, " {text}")?;
        }
        first = false;
    }
    if cli.one_line && !first {
        writeln!(out)?;
    }
    Ok(())
}

fn detokenize(reader: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    for line in reader.lines() {
        writeln!(out, "{}", ptb_to_text(&line?))?;
    }
    Ok(())
}
