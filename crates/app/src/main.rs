mod console;

use std::fmt;
use std::io::{self, BufReader};

use services::{AiSettings, Clock, GatewayCache, QuizLoopService, QuizSession};
use tracing_subscriber::EnvFilter;

use crate::console::Console;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Blank { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Blank { flag } => write!(f, "{flag} must not be blank"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::Blank { flag });
    }
    Ok(value)
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--base-url <url>] [--model <id>] [--json]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --base-url  OpenAI-compatible API root (default https://api.groq.com/openai/v1)");
    eprintln!("  --model     model id (default llama-3.1-70b-versatile)");
    eprintln!("  --json      also print the final report as JSON");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_AI_BASE_URL, QUIZ_AI_MODEL, RUST_LOG");
    eprintln!();
    eprintln!("The API key is asked for interactively.");
}

#[derive(Debug)]
struct Args {
    settings: AiSettings,
    json: bool,
    help: bool,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        mut settings: AiSettings,
    ) -> Result<Self, ArgsError> {
        let mut json = false;
        let mut help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    settings = settings.with_base_url(require_value(args, "--base-url")?);
                }
                "--model" => {
                    settings = settings.with_model(require_value(args, "--model")?);
                }
                "--json" => json = true,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            settings,
            json,
            help,
        })
    }
}

fn init_tracing() {
    // Logs go to stderr so the quiz on stdout stays readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv, AiSettings::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();
    tracing::debug!(
        base_url = %args.settings.base_url,
        model = %args.settings.model,
        "settings resolved"
    );

    let mut console = Console::new(BufReader::new(io::stdin()), io::stdout());
    console.welcome()?;
    let Some(api_key) = console.read_api_key()? else {
        return Ok(());
    };

    let mut gateways = GatewayCache::new(args.settings);
    let gateway = gateways.get_or_init(&api_key)?;
    let service = QuizLoopService::new(Clock::default(), gateway);

    let mut session = QuizSession::new();
    console.play(&service, &mut session, args.json).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = raw.iter().map(ToString::to_string);
        Args::parse(&mut iter, AiSettings::default())
    }

    #[test]
    fn flags_override_settings() {
        let args = parse(&[
            "--model",
            "m1",
            "--base-url",
            "http://localhost:9/v1",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.settings.model, "m1");
        assert_eq!(args.settings.base_url, "http://localhost:9/v1");
        assert!(args.json);
        assert!(!args.help);
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.settings, AiSettings::default());
        assert!(!args.json);
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(matches!(
            parse(&["--model"]),
            Err(ArgsError::MissingValue { flag: "--model" })
        ));
        assert!(matches!(
            parse(&["--base-url", " "]),
            Err(ArgsError::Blank { flag: "--base-url" })
        ));
        assert!(matches!(parse(&["--api-key"]), Err(ArgsError::UnknownArg(_))));
    }
}
