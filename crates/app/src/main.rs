use std::fmt;
use std::sync::Arc;

use percent_core::Entropy;
use percent_core::model::{FractionPair, MixedPercent, QuestionBatch};
use services::{BatchMode, GenerativePairSource, QuestionAssembler};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- curated   [--count <n>] [--seed <u64>] [--json]");
    eprintln!("  cargo run -p app -- generated [--count <n>] [--seed <u64>] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  curated, 25 questions (curated) or 10 (generated), OS-seeded");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PERCENT_DRILL_COUNT, PERCENT_DRILL_SEED");
    eprintln!("  PERCENT_AI_API_KEY, PERCENT_AI_BASE_URL, PERCENT_AI_MODEL, PERCENT_AI_TIMEOUT_SECS");
    eprintln!("  RUST_LOG (e.g. RUST_LOG=debug)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Curated,
    Generated,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "curated" => Some(Self::Curated),
            "generated" => Some(Self::Generated),
            _ => None,
        }
    }

    fn mode(self) -> BatchMode {
        match self {
            Command::Curated => BatchMode::Curated,
            Command::Generated => BatchMode::Generated,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    count: Option<usize>,
    seed: Option<u64>,
    json: bool,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_count: Option<String>,
        env_seed: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut count = env_count.and_then(|value| value.trim().parse::<usize>().ok());
        let mut seed = env_seed.and_then(|value| value.trim().parse::<u64>().ok());
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--count" | "-n" => {
                    let value = require_value(args, "--count")?;
                    let parsed: usize = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidCount { raw: value.clone() })?;
                    count = Some(parsed);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { count, seed, json })
    }

    fn entropy(&self) -> Entropy {
        self.seed.map_or(Entropy::default_entropy(), Entropy::seeded)
    }
}

fn render_text(batch: &QuestionBatch) -> String {
    let mut out = String::new();
    for (i, q) in batch.iter().enumerate() {
        let fraction = FractionPair::from_notation(q.fraction())
            .map_or_else(|_| q.fraction().to_string(), |pair| pair.to_string());
        out.push_str(&format!("{:>2}. {fraction} = ?\n", i + 1));
        for (label, option) in ['A', 'B', 'C', 'D'].iter().zip(q.options()) {
            let marker = if q.is_correct(option) { '*' } else { ' ' };
            out.push_str(&format!("    {marker}{label}) {}\n", plain_percent(option)));
        }
    }
    out
}

fn plain_percent(markup: &str) -> String {
    markup
        .parse::<MixedPercent>()
        .map_or_else(|_| markup.to_string(), |p| p.plain())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Curated,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Curated,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(
        &mut iter,
        std::env::var("PERCENT_DRILL_COUNT").ok(),
        std::env::var("PERCENT_DRILL_SEED").ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let mode = cmd.mode();
    let count = parsed.count.unwrap_or_else(|| mode.default_count());

    let mut assembler = QuestionAssembler::new(parsed.entropy());
    if mode == BatchMode::Generated {
        let source = GenerativePairSource::from_env();
        if !source.enabled() {
            log::warn!("PERCENT_AI_API_KEY is not set; generated mode will use local fractions");
        }
        assembler = assembler.with_source(Arc::new(source));
    }

    let batch = assembler.assemble(mode, count).await;

    if parsed.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        print!("{}", render_text(&batch));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_core::model::Question;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, None, None)
    }

    #[test]
    fn parses_flags() {
        let args = parse(&["--count", "5", "--seed", "9", "--json"]).unwrap();
        assert_eq!(
            args,
            Args {
                count: Some(5),
                seed: Some(9),
                json: true
            }
        );
        assert_eq!(args.entropy(), Entropy::seeded(9));
    }

    #[test]
    fn env_values_are_defaults_and_flags_win() {
        let mut iter = vec!["--count".to_string(), "3".to_string()].into_iter();
        let args = Args::parse(&mut iter, Some("12".into()), Some("7".into())).unwrap();
        assert_eq!(args.count, Some(3));
        assert_eq!(args.seed, Some(7));

        let mut empty = std::iter::empty();
        let args = Args::parse(&mut empty, Some("oops".into()), None).unwrap();
        assert_eq!(args.count, None);
        assert_eq!(args.entropy(), Entropy::Default);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&["--count"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--count" }
        );
        assert_eq!(
            parse(&["--seed", "x"]).unwrap_err(),
            ArgsError::InvalidSeed { raw: "x".into() }
        );
        assert_eq!(
            parse(&["--bogus"]).unwrap_err(),
            ArgsError::UnknownArg("--bogus".into())
        );
    }

    #[test]
    fn text_rendering_marks_the_answer() {
        let q = Question::new(
            r"\frac{1}{3}",
            r"33\frac{1}{3}\%",
            vec![
                r"33\frac{2}{3}\%".to_string(),
                r"33\frac{1}{3}\%".to_string(),
                r"32\frac{1}{3}\%".to_string(),
                r"34\frac{1}{3}\%".to_string(),
            ],
        )
        .unwrap();
        let text = render_text(&QuestionBatch::new(vec![q]));
        assert!(text.starts_with(" 1. 1/3 = ?\n"));
        assert!(text.contains("    *B) 33 1/3%\n"));
        assert!(text.contains("     A) 33 2/3%\n"));
    }
}
