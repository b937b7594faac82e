use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::CanonicalStore;
use crate::store::approval_log::{self, BACKUP_CREATED};
use crate::store::fs_utils::ensure_writable;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let store = CanonicalStore::from_config(cfg);
        let dest = expand_tilde(file);

        ensure_writable(&dest, false, &mut io::stdin().lock())?;

        let kept = store.backup_to(&dest, *compress || cfg.compress_backups)?;
        success(format!("Backup created: {}", kept.display()));

        approval_log::append(
            &cfg.layout().log_file,
            BACKUP_CREATED,
            [kept.display().to_string()],
        )?;
    }

    Ok(())
}
