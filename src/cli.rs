use crate::pool::Backend;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::path::PathBuf;

/// Parsed command-line options
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub text: String,
    pub iterations: usize,
    pub source: String,
    pub languages: Option<PathBuf>,
    pub backends: Vec<Backend>,
    pub seed: Option<u64>,
    pub max_retries: Option<u64>,
    pub mock: bool,
}

pub fn command() -> Command {
    Command::new("babel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Nonsense: translate text through random languages and back")
        .arg(
            Arg::new("text")
                .long("text")
                .short('t')
                .help("Text to translate")
                .required(true),
        )
        .arg(
            Arg::new("iterations")
                .short('n')
                .help("Number of times to iterate")
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Language of the input text, and of the result")
                .default_value(babel_languages::ENGLISH),
        )
        .arg(
            Arg::new("languages")
                .long("languages")
                .short('l')
                .help("Language table (JSON) to use instead of the bundled one")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .short('b')
                .help("Backend to include in the pool; repeatable (default: all configured)")
                .value_parser(value_parser!(Backend))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for reproducible backend and language picks")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("max-retries")
                .long("max-retries")
                .help("Give up after this many consecutive rejected picks (default: never)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translators instead of remote services")
                .action(ArgAction::SetTrue),
        )
}

impl CliArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            text: matches.get_one::<String>("text").cloned().unwrap_or_default(),
            iterations: matches.get_one::<usize>("iterations").copied().unwrap_or(10),
            source: matches
                .get_one::<String>("source")
                .cloned()
                .unwrap_or_else(|| babel_languages::ENGLISH.to_string()),
            languages: matches.get_one::<PathBuf>("languages").cloned(),
            backends: matches
                .get_many::<Backend>("backend")
                .map(|values| values.copied().collect())
                .unwrap_or_default(),
            seed: matches.get_one::<u64>("seed").copied(),
            max_retries: matches.get_one::<u64>("max-retries").copied(),
            mock: matches.get_flag("mock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        let argv = std::iter::once("babel").chain(args.iter().copied());
        let matches = command().try_get_matches_from(argv)?;
        Ok(CliArgs::from_matches(&matches))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["-t", "hello"]).unwrap();
        assert_eq!(args.text, "hello");
        assert_eq!(args.iterations, 10);
        assert_eq!(args.source, "en");
        assert!(args.languages.is_none());
        assert!(args.backends.is_empty());
        assert!(args.seed.is_none());
        assert!(args.max_retries.is_none());
        assert!(!args.mock);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "--text",
            "hello",
            "-n",
            "3",
            "--source",
            "fr",
            "--languages",
            "langs.json",
            "-b",
            "nllb",
            "--backend",
            "google",
            "--seed",
            "7",
            "--max-retries",
            "100",
            "--mock",
        ])
        .unwrap();
        assert_eq!(args.iterations, 3);
        assert_eq!(args.source, "fr");
        assert_eq!(args.languages, Some(PathBuf::from("langs.json")));
        assert_eq!(args.backends, vec![Backend::Nllb, Backend::Google]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.max_retries, Some(100));
        assert!(args.mock);
    }

    #[test]
    fn test_zero_iterations_allowed() {
        assert_eq!(parse(&["-t", "x", "-n", "0"]).unwrap().iterations, 0);
    }

    #[test]
    fn test_text_is_required() {
        assert!(parse(&["-n", "3"]).is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(parse(&["-t", "x", "--backend", "deepl"]).is_err());
    }

    #[test]
    fn test_negative_iterations_rejected() {
        assert!(parse(&["-t", "x", "-n", "-1"]).is_err());
    }
}
