use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskchain data directory: ~/.taskchain
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".taskchain"))
}

pub fn get_config_path() -> anyhow::Result<PathBuf> {
    Ok(get_data_dir()?.join("config.toml"))
}

/// Load configuration with the usual precedence:
/// env overrides > ~/.taskchain/config.toml > ./taskchain.toml > defaults.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let home_config = get_config_path()?;
    let local_config = Path::new("taskchain.toml");

    let mut cfg: AppConfig = if home_config.exists() {
        load_from(&home_config)?
    } else if local_config.exists() {
        load_from(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<AppConfig>(&s)?)
}

fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(v) = std::env::var("TASKCHAIN_SUPABASE_URL") {
        if !v.trim().is_empty() {
            cfg.backend.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("TASKCHAIN_SUPABASE_ANON_KEY") {
        if !v.trim().is_empty() {
            cfg.backend.anon_key = v;
        }
    }
    if let Ok(v) = std::env::var("TASKCHAIN_OWNER") {
        if !v.trim().is_empty() {
            cfg.owner_id = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert!(cfg.owner_id.is_none());
        assert_eq!(cfg.backend.table, "tasks");
        assert_eq!(cfg.backend.timeout_ms, 10_000);
        assert!(cfg.logging.enabled);
        assert!(!cfg.logging.file);
    }

    #[test]
    fn partial_toml_keeps_section_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            owner_id = "00000000-0000-0000-0000-000000000001"

            [backend]
            base_url = "https://example.supabase.co"
            anon_key = "anon"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.backend.base_url, "https://example.supabase.co");
        assert_eq!(cfg.backend.table, "tasks");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskchain.toml");
        std::fs::write(&path, "[backend]\nbase_url = \"https://x.supabase.co\"\n").unwrap();

        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.backend.base_url, "https://x.supabase.co");
    }
}
