use crate::cli::parser::{Cli, Commands};
use crate::config::{Config, FieldProfile};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the data directory tree (raw, staging, history, live, diffs, logs)
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init { profile } = &cli.command else {
        return Ok(());
    };

    let fields = FieldProfile::preset(profile.as_str())
        .ok_or_else(|| AppError::Config(format!("unknown profile '{}'", profile.as_str())))?;

    let path = Config::resolve_file(cli.config.as_deref());
    println!("⚙️  Initializing stakesync…");

    let cfg = Config::init_all(&path, cli.data_dir.as_deref(), fields, cli.test)?;

    println!("🧩 Profile     : {}", cfg.fields.name);
    println!("📄 Live file   : {}", cfg.layout().live_file.display());
    success("stakesync initialization completed!");
    Ok(())
}
