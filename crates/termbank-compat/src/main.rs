use std::path::Path;
use std::time::Instant;

use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use termbank_compat::run;
use termbank_io::LoadMode;

const INPUT_BANK: &str = "term_bank_1.json";
const OUTPUT_DIR: &str = "compat-dict";
const ARCHIVE: &str = "compat-dict.zip";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let start = Instant::now();
    let stats = run(
        Path::new(INPUT_BANK),
        Path::new(OUTPUT_DIR),
        Path::new(ARCHIVE),
        LoadMode::Mmap,
    )?;
    info!(
        "normalized {} of {} entries ({} lemmas passed through, {} duplicates dropped, {} unparsed) in {} ms",
        stats.normalized,
        stats.total,
        stats.passthrough,
        stats.duplicates,
        stats.unparsed,
        start.elapsed().as_millis()
    );
    info!("wrote {OUTPUT_DIR}/{INPUT_BANK} and {ARCHIVE}");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
