//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Environment variables holding provider API keys, matching the
/// original deployment's names
const REASONER_KEY_ENV: &str = "CLAUDE_API_KEY";
const EVIDENCE_KEY_ENV: &str = "PERPLEXITY_API_KEY";
const INFO_GATHER_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `HELPDESK_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./helpdesk.toml` or `./.helpdesk.toml`
    /// 4. XDG config: `~/.config/mirai-helpdesk/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["helpdesk.toml", ".helpdesk.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("HELPDESK_").split("__"));

        let mut config: FileConfig = figment.extract().map_err(Box::new)?;
        Self::apply_key_env_fallbacks(&mut config);
        Ok(config)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        let mut config = FileConfig::default();
        Self::apply_key_env_fallbacks(&mut config);
        config
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mirai-helpdesk").join("config.toml"))
    }

    /// Fill unset API keys from the provider environment variables
    fn apply_key_env_fallbacks(config: &mut FileConfig) {
        let providers = &mut config.providers;
        for (section, env_name) in [
            (&mut providers.reasoner, REASONER_KEY_ENV),
            (&mut providers.evidence, EVIDENCE_KEY_ENV),
            (&mut providers.info_gather, INFO_GATHER_KEY_ENV),
        ] {
            if section.api_key.is_none()
                && let Ok(key) = std::env::var(env_name)
                && !key.is_empty()
            {
                section.api_key = Some(key);
            }
        }
    }
}
