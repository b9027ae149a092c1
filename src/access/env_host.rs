/// Environment-backed key host
///
/// The desktop stand-in for the hosted platform's key selector: "has a
/// key" means GEMINI_API_KEY is set, and "open the selector" is a native
/// file picker for a file whose contents are the key. The picked key is
/// written back into the process environment so the next generation call
/// (which builds a fresh client) picks it up.

use async_trait::async_trait;

use super::KeyHost;
use crate::config;

pub struct EnvKeyHost;

#[async_trait]
impl KeyHost for EnvKeyHost {
    async fn has_selected_key(&self) -> Result<bool, String> {
        Ok(config::api_key().is_some())
    }

    async fn open_key_selector(&self) -> Result<(), String> {
        let file = rfd::AsyncFileDialog::new()
            .set_title("Select API Key File")
            .pick_file()
            .await
            .ok_or_else(|| "no key file was selected".to_string())?;

        let contents = tokio::fs::read_to_string(file.path())
            .await
            .map_err(|e| format!("could not read key file: {}", e))?;

        let key = contents.trim();
        if key.is_empty() {
            return Err("selected key file is empty".to_string());
        }

        config::set_api_key(key);
        println!("🔑 API key selected from {}", file.path().display());
        Ok(())
    }
}
