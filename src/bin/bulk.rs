use careerfit::logging::init_tracing;
use careerfit::scoring::jitter_source;
use careerfit::{calculate_results, read_bulk, Error, QuestionBank, QUESTIONS};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Scores every respondent of a CSV file.
#[derive(Parser)]
struct Args {
    path: PathBuf,
    #[arg(long)]
    questions: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, conflicts_with = "seed")]
    no_jitter: bool,
}

fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    let custom;
    let bank: &QuestionBank = match args.questions {
        Some(ref path) => {
            custom = QuestionBank::from_path(path)?;
            &custom
        }
        None => &*QUESTIONS,
    };
    let mut jitter = jitter_source(args.seed, args.no_jitter);
    let reader = BufReader::new(File::open(&args.path)?);
    for row in read_bulk(bank, reader)? {
        match row {
            Ok((id, store)) => {
                let result = calculate_results(bank, &store, jitter.as_mut());
                println!(
                    "id = {}, scores = ({}, {}), confidence = {}, recommendation = {:?}",
                    id,
                    result.psychometric_score,
                    result.technical_readiness_score,
                    result.overall_confidence,
                    result.recommendation
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "row skipped");
            }
        }
    }
    Ok(())
}
