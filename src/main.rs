use anyhow::{Context, Result, bail};
use babel::cli::{self, CliArgs};
use babel::{Chain, Config, RandomPicker, build_pool, default_backends};
use babel_languages::{Language, LanguageRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::from_matches(&cli::command().get_matches());

    let registry = match &args.languages {
        Some(path) => LanguageRegistry::load(path),
        None => LanguageRegistry::bundled(),
    }
    .context("Failed to load language table")?;

    let source = Language::new(&args.source).context("Invalid source language")?;
    if !registry.contains(&source) {
        bail!("Source language '{}' is not in the language table", source);
    }

    let config = Config::from_env()?;
    let backends = if args.backends.is_empty() {
        default_backends(&config)
    } else {
        args.backends.clone()
    };
    let pool = build_pool(&config, &registry, &backends, args.mock)?;

    let picker = match args.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_entropy(),
    };
    let mut chain = Chain::new(pool, registry.languages(), picker)
        .with_source(source)
        .with_max_retries(args.max_retries);

    let outcome = chain.run(&args.text, args.iterations).await?;
    info!(
        "{} hops, {} rejected picks{}",
        outcome.hops.len(),
        outcome.rejected,
        if outcome.finalization.is_some() { ", plus the way home" } else { "" }
    );

    println!("{}", outcome.text);

    Ok(())
}
