//! Export decrypted accounts in portable formats.

use std::fs::File;

use coffer_core::AccountStore;

use crate::cli::{Cli, ExportArgs};
use crate::config;
use crate::errors::map_load_error;
use crate::input::prompt_key;

pub fn handle_export(cli: &Cli, args: &ExportArgs) -> anyhow::Result<()> {
    let path = config::resolve_container_path(cli.container.as_deref(), args.path.as_deref())?;
    let offset = config::resolve_offset()?;
    let key = prompt_key()?;

    let mut store = AccountStore::new(offset, key.as_str())
        .map_err(|err| map_load_error(err, &path))?;
    File::open(&path)
        .map_err(coffer_core::CofferError::from)
        .and_then(|mut file| store.read_from(&mut file))
        .map_err(|err| map_load_error(err, &path))?;

    match args.format.as_str() {
        "json" => {
            let output = serde_json::to_string_pretty(store.accounts())?;
            println!("{}", output);
        }
        "jsonl" => {
            for account in store.accounts() {
                println!("{}", serde_json::to_string(account)?);
            }
        }
        other => {
            return Err(anyhow::anyhow!(
                "Unsupported export format: {} (use json or jsonl)",
                other
            ));
        }
    }
    Ok(())
}
