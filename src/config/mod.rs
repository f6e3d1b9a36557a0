use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub endpoint: Option<String>,
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    #[serde(alias = "scheme")]
    pub headshot_scheme: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".namegame").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, String> {
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents).map_err(|e| e.to_string())
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

pub fn default_config_yaml() -> String {
    r#"# namegame config
#
# Location (default):
#   ~/.namegame/config.yml

# Profiles endpoint (JSON array of {firstName, lastName, headshot: {url}})
endpoint: https://willowtreeapps.com/api/v1.0/profiles

# HTTP
timeout: 10
# proxy: http://127.0.0.1:8080

# Scheme prepended to scheme-relative headshot URLs ("//host/path")
headshot_scheme: "http:"

# Output (optional)
# output: ./people.html
# output_format: html

# Output styling
no_color: false
"#
    .to_string()
}

/// Writes the commented default config unless a file already exists.
/// Returns whether a file was written.
pub fn ensure_default_config_file(path: &Path) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_yaml_parses_to_defaults() {
        let cfg = parse_config(&default_config_yaml()).unwrap();
        assert_eq!(
            cfg.endpoint.as_deref(),
            Some("https://willowtreeapps.com/api/v1.0/profiles")
        );
        assert_eq!(cfg.timeout, Some(10));
        assert_eq!(cfg.headshot_scheme.as_deref(), Some("http:"));
        assert_eq!(cfg.no_color, Some(false));
        assert!(cfg.proxy.is_none());
        assert!(cfg.output.is_none());
    }

    #[test]
    fn aliases_are_accepted() {
        let cfg = parse_config("url: http://localhost/people\nscheme: https\n").unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost/people"));
        assert_eq!(cfg.headshot_scheme.as_deref(), Some("https"));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("  \n").unwrap(), ConfigFile::default());
    }

    #[test]
    fn bad_yaml_is_an_error() {
        assert!(parse_config("timeout: [nope").is_err());
    }

    #[test]
    fn missing_file_handling() {
        let path = std::env::temp_dir().join("namegame-missing-config-test.yml");
        let _ = std::fs::remove_file(&path);
        assert_eq!(load_config(&path, true).unwrap(), ConfigFile::default());
        assert!(load_config(&path, false).is_err());
    }

    #[test]
    fn ensure_default_writes_once() {
        let dir = std::env::temp_dir().join(format!("namegame-cfg-{}", std::process::id()));
        let path = dir.join("config.yml");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(ensure_default_config_file(&path).unwrap());
        assert!(!ensure_default_config_file(&path).unwrap());
        let cfg = load_config(&path, false).unwrap();
        assert_eq!(cfg.timeout, Some(10));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn tilde_is_expanded_when_home_is_known() {
        let expanded = expand_tilde("~/people.json");
        if home_dir().is_some() {
            assert!(!expanded.to_string_lossy().starts_with('~'));
        }
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
    }
}
