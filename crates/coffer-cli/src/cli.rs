use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use coffer_core::VERSION;

/// Coffer - a keyed flat-file container for account credentials
#[derive(Parser)]
#[command(name = "coffer")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the container file
    #[arg(short, long, global = true, env = "COFFER_PATH")]
    pub container: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the container will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,
}

/// Arguments for the `open` command
#[derive(Args)]
pub struct OpenArgs {
    /// Path to the container to open
    #[arg(value_name = "PATH")]
    pub path: Option<String>,
}

/// Arguments for the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Password length in characters
    #[arg(value_name = "LENGTH")]
    pub length: usize,

    /// Copy to the clipboard instead of printing
    #[arg(long)]
    pub copy: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Path to the container to export
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new empty container file
    Init(InitArgs),

    /// Open a container and start an interactive session
    Open(OpenArgs),

    /// Generate a random password
    Generate(GenerateArgs),

    /// Export decrypted accounts (portable formats, you own your data)
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
