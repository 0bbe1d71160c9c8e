//! One-shot password generation.

use coffer_core::generate_password;

use crate::cli::{Cli, GenerateArgs};
use crate::clipboard::{Clipboard, CommandClipboard};

pub fn handle_generate(cli: &Cli, args: &GenerateArgs) -> anyhow::Result<()> {
    generate_with(cli.quiet, args, &CommandClipboard)
}

fn generate_with(quiet: bool, args: &GenerateArgs, clipboard: &dyn Clipboard) -> anyhow::Result<()> {
    let password = generate_password(args.length);

    if args.copy {
        clipboard.copy(&password)?;
        if !quiet {
            println!(
                "Copied a {}-character password to the clipboard.",
                args.length
            );
        }
    } else {
        println!("{}", password);
    }
    Ok(())
}
