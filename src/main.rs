use std::fs::File;
use std::io::{stdin, BufWriter};
use std::path::PathBuf;

use careerfit::logging::init_tracing;
use careerfit::scoring::jitter_source;
use careerfit::{
    write_report, AnswerValue, AssessmentResult, AssessmentSession, Error, FitBand, JsonFileStore,
    Question, QuestionBank, QuestionType, ResultStore, Section, Step, QUESTIONS,
};
use clap::Parser;

const LIKERT_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

#[derive(Parser)]
#[command(about = "CareerFit readiness assessment for wearable developers")]
struct Args {
    /// Question bank to use instead of the bundled one
    #[arg(long)]
    questions: Option<PathBuf>,
    /// Seed for the score noise
    #[arg(long)]
    seed: Option<u64>,
    /// Score without noise
    #[arg(long, conflicts_with = "seed")]
    no_jitter: bool,
    /// Where the latest result is kept
    #[arg(long, default_value = "assessment_results.json")]
    store: PathBuf,
    /// Also write a JSON report here
    #[arg(long)]
    report: Option<PathBuf>,
    /// Show the latest stored result and exit
    #[arg(long)]
    show: bool,
}

fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    let mut store = JsonFileStore::new(args.store.clone());

    if args.show {
        match store.get()? {
            Some(result) => print_result(&result),
            None => println!("No result yet. Run the assessment first."),
        }
        return Ok(());
    }

    let custom;
    let bank: &QuestionBank = match args.questions {
        Some(ref path) => {
            custom = QuestionBank::from_path(path)?;
            &custom
        }
        None => &*QUESTIONS,
    };

    let mut session = AssessmentSession::new(bank);
    let mut buffer = String::new();
    print_section(session.current_section());
    while let Some(question) = session.current_question() {
        println!(
            "Section {} of {} - Question {} of {} ({:.0}% complete)",
            session.section_number(),
            Section::ALL.len(),
            session.question_number(),
            session.section_questions().len(),
            session.progress()
        );
        print_question(question);
        loop {
            buffer.clear();
            if stdin().read_line(&mut buffer)? == 0 {
                println!("Input closed, assessment abandoned.");
                return Ok(());
            }
            match AnswerValue::parse_for(question, &buffer).and_then(|value| session.answer(value)) {
                Ok(()) => break,
                Err(e) => println!("{}", e),
            }
        }
        println!();
        if let Step::Section(section) = session.advance()? {
            print_section(section);
        }
    }

    let mut jitter = jitter_source(args.seed, args.no_jitter);
    let result = session.finish(jitter.as_mut())?;
    store.put(result)?;
    if let Some(path) = args.report {
        write_report(BufWriter::new(File::create(path)?), result)?;
    }
    print_result(result);
    Ok(())
}

fn print_section(section: Section) {
    println!("== {} ==", section.title());
    println!("{}", section.description());
    println!();
}

fn print_question(question: &Question) {
    println!("{}", question.text);
    match question.kind {
        QuestionType::Likert => {
            for (value, label) in LIKERT_LABELS.iter().enumerate() {
                print!("  {} => {}", value + 1, label);
            }
        }
        QuestionType::Rating => print!("  1 (Beginner) .. 10 (Expert)"),
        QuestionType::MultipleChoice | QuestionType::Scenario => {
            for (number, option) in question.options().iter().enumerate() {
                println!("  {} => {}", number + 1, option);
            }
        }
    }
    println!();
}

fn print_result(result: &AssessmentResult) {
    println!("Your CareerFit Score: {}", result.overall_confidence);
    println!(
        "{} - Recommendation: {:?} ({})",
        result.recommendation.headline(),
        result.recommendation,
        result.recommendation.badge()
    );
    println!(
        "Psychometric {} / Technical readiness {}",
        result.psychometric_score, result.technical_readiness_score
    );
    println!();
    for (label, score) in result.dimensions() {
        println!("  {:<22} {:>3}/100  {:?}", label, score, FitBand::of(score));
    }
    println!();
    println!("Next steps:");
    for (number, step) in result.next_steps.iter().enumerate() {
        println!("  {}. {}", number + 1, step);
    }
    println!("Top matches: {}", result.top_roles.join(", "));
    println!("Alternatives: {}", result.alternative_roles.join(", "));
    println!();
    println!("{}", result.share_text());
}
