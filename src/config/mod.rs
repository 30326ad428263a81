mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./discprobe.toml",
        "~/.config/discprobe/config.toml",
        "/etc/discprobe/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.selection.max_playlist_items == 0 {
        anyhow::bail!("selection.max_playlist_items must be at least 1");
    }

    if let Some(size) = config.nal.length_size {
        if !(1..=4).contains(&size) {
            anyhow::bail!("nal.length_size must be between 1 and 4, got {}", size);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use discprobe_bdmv::TieBreak;
    use discprobe_nal::Framing;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.selection.max_playlist_items, 5);
        assert_eq!(config.selection.options().tie_break, TieBreak::First);
        assert_eq!(config.nal.framing(None).unwrap(), Framing::AnnexB);
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
[selection]
max_playlist_items = 12
tie_break = "last"

[nal]
length_size = 4
"#,
        );
        let config = load_config(file.path()).unwrap();

        let options = config.selection.options();
        assert_eq!(options.max_playlist_items, 12);
        assert_eq!(options.tie_break, TieBreak::Last);
        assert_eq!(config.nal.framing(None).unwrap(), Framing::LengthPrefixed(4));
        assert_eq!(config.nal.framing(Some(2)).unwrap(), Framing::LengthPrefixed(2));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let file = write_config("[selection]\ntie_break = \"first\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.selection.max_playlist_items, 5);
        assert_eq!(config.nal.length_size, None);
    }

    #[test]
    fn test_validation_errors() {
        let file = write_config("[selection]\nmax_playlist_items = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_playlist_items"));

        let file = write_config("[nal]\nlength_size = 5\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("length_size"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let file = write_config("[selection]\ntie_break = \"middle\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let err = load_config_or_default(Some(Path::new("/nonexistent/discprobe.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
