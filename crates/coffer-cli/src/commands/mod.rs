//! Command handlers for the Coffer CLI.

mod export;
mod generate;
mod init;
mod misc;
mod open;

pub use export::handle_export;
pub use generate::handle_generate;
pub use init::handle_init;
pub use misc::handle_completions;
pub use open::handle_open;
