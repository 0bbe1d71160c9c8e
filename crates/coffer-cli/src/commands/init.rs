//! Create a new empty container file.

use std::path::PathBuf;

use crate::cli::{Cli, InitArgs};
use crate::config::{self, CofferConfig};

pub fn handle_init(cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let path = match args.path.as_deref().or(cli.container.as_deref()) {
        Some(value) => PathBuf::from(value),
        None => config::default_container_path()?,
    };

    if path.exists() {
        return Err(anyhow::anyhow!(
            "Container already exists: {}",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create container directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    // An empty file is a valid zero-account container.
    std::fs::write(&path, "")
        .map_err(|e| anyhow::anyhow!("Failed to create container {}: {}", path.display(), e))?;

    let config_path = config::default_config_path()?;
    if !config_path.exists() {
        let config = CofferConfig::new(path.clone(), config::DEFAULT_OFFSET);
        config::write_config(&config_path, &config)?;
    }

    if !cli.quiet {
        println!("Initialized empty container at {}", path.display());
    }
    Ok(())
}
