use std::path::PathBuf;

/// Per-user config directory (~/.chatmark)
pub fn chatmark_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".chatmark")
}

/// ~/.chatmark/config.json
pub fn config_json_path() -> PathBuf {
    chatmark_dir().join("config.json")
}
