//! Key input helpers.

use dialoguer::Password;
use zeroize::Zeroizing;

/// Reads the container key from `COFFER_KEY`, or prompts for it on the
/// terminal.
pub fn prompt_key() -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var("COFFER_KEY") {
        if !value.trim().is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    let key = Password::new()
        .with_prompt("Container key")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read key: {}", e))?;
    Ok(Zeroizing::new(key))
}
