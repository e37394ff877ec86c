//! Count case-insensitive word frequencies in a text file and print the
//! most frequent words, one `word count` pair per line.

use std::path::PathBuf;
use std::process::ExitCode;

use chain_hashmap::top_words;
use clap::Parser;

#[derive(Parser)]
#[command(name = "top-words", version)]
#[command(about = "Count case-insensitive word frequencies in a text file")]
struct Cli {
    /// Text file to scan
    source: PathBuf,

    /// How many of the most frequent words to print
    #[arg(short, long, default_value_t = 10)]
    number: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match top_words(&cli.source, cli.number) {
        Ok(ranked) => {
            for (word, count) in ranked {
                println!("{word} {count}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("top-words: {err}");
            ExitCode::FAILURE
        }
    }
}
