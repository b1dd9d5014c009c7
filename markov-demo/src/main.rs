use clap::Parser;
use log::{info, warn};

use markov_core::config::GenerationConfig;
use markov_core::error::ChainError;
use markov_core::io::{read_corpus, read_lines};

const SAMPLE_TEXT: &str = "Markov chains are mathematical systems that undergo transitions \
    from one state to another within a finite state space. They are named \
    after Andrey Markov, a Russian mathematician. Markov chains are used \
    in various fields, including statistics, economics, and computer science.";

/// Trains a Markov chain and prints generated sentences.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of words in a state (2 = bigram context).
    #[arg(long, default_value_t = 2)]
    order: usize,

    /// Number of words to generate per sentence.
    #[arg(long, default_value_t = 50)]
    length: usize,

    /// Fixed RNG seed, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Training text file. Uses a built-in paragraph when omitted.
    #[arg(long)]
    file: Option<String>,

    /// Train on each line of `--file` separately, so no state spans two lines.
    #[arg(long, default_value = "false")]
    per_line: bool,

    /// Number of sentences to print.
    #[arg(long, default_value_t = 1)]
    count: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = GenerationConfig {
        order: args.order,
        length: args.length,
        seed: args.seed,
    };

    // Order 0 is rejected here, before any training happens
    let mut chain = config.build_chain()?;

    match &args.file {
        Some(path) if args.per_line => {
            for (i, line) in read_lines(path)?.iter().enumerate() {
                match chain.train(line) {
                    Ok(()) => (),
                    // Lines shorter than the order are skipped, not fatal
                    Err(e @ ChainError::InsufficientData { .. }) => warn!("line {}: {e}", i + 1),
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Some(path) => chain.train(&read_corpus(path)?)?,
        None => chain.train(SAMPLE_TEXT)?,
    }
    info!("order {} chain with {} state(s)", chain.order(), chain.len());

    for _ in 0..args.count {
        println!("{}", chain.generate(config.length)?);
    }

    Ok(())
}
