use anyhow::Context;
use floorkit::{init_logging, summarize, EditorConfig, EditorState, FloorDocument};
use std::path::PathBuf;

const USAGE: &str = "usage: floorkit <floor.json> [plan-out.json]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config_path = EditorConfig::default_path()?;
    let config = EditorConfig::load_or_default(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    let mut state = EditorState::new(config);

    let mut args = std::env::args().skip(1);
    let Some(floor_path) = args.next().map(PathBuf::from) else {
        println!("{}", USAGE);
        return Ok(());
    };

    let floor = FloorDocument::load_from_file(&floor_path)
        .with_context(|| format!("reading floor {}", floor_path.display()))?;
    if let Err(e) = floor.validate() {
        tracing::warn!("{}: {}", floor_path.display(), e);
    }

    state.import_floor(&floor).await?;
    println!("{}: {}", floor.name, summarize(&state.document));

    if let Some(plan_path) = args.next().map(PathBuf::from) {
        state
            .save_plan(&plan_path)
            .with_context(|| format!("writing plan {}", plan_path.display()))?;
        println!("Saved plan to {}", plan_path.display());
    }

    Ok(())
}
