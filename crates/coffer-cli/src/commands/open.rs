//! Open a container and run the interactive session.

use std::io;

use crate::cli::{Cli, OpenArgs};
use crate::config;
use crate::errors::map_load_error;
use crate::input::prompt_key;
use crate::session::Session;

pub fn handle_open(cli: &Cli, args: &OpenArgs) -> anyhow::Result<()> {
    let path = config::resolve_container_path(cli.container.as_deref(), args.path.as_deref())?;
    let offset = config::resolve_offset()?;
    let key = prompt_key()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), &path, &key, offset)
        .map_err(|err| map_load_error(err, &path))?;

    session.run()?;
    Ok(())
}
