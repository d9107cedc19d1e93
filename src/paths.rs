use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "QUESTION_GENERATOR_DIR";
const DATABASE_FILE: &str = "users.db";

pub fn data_dir() -> PathBuf {
    if let Ok(value) = std::env::var(DATA_DIR_ENV)
        && let Some(path) = expand_dir(&value)
    {
        return path;
    }
    home_join(".question-generator").unwrap_or_else(|| PathBuf::from(".question-generator"))
}

/// Database location: explicit override first, otherwise `<data dir>/users.db`.
pub fn database_path(override_path: Option<&Path>) -> PathBuf {
    match override_path {
        Some(path) => path.to_path_buf(),
        None => data_dir().join(DATABASE_FILE),
    }
}

fn home_join(suffix: &str) -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    let home = home.trim();
    if home.is_empty() {
        return None;
    }
    Some(Path::new(home).join(suffix))
}

fn expand_dir(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "~" {
        return home_join("");
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        return home_join(rest).or_else(|| Some(PathBuf::from(trimmed)));
    }
    Some(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_database_path_wins() {
        let path = database_path(Some(Path::new("/tmp/prefs.db")));
        assert_eq!(path, PathBuf::from("/tmp/prefs.db"));
    }

    #[test]
    fn default_database_lives_in_data_dir() {
        let path = database_path(None);
        assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("users.db"));
    }

    #[test]
    fn blank_dir_value_is_ignored() {
        assert!(expand_dir("   ").is_none());
        assert_eq!(expand_dir("/var/data"), Some(PathBuf::from("/var/data")));
    }
}
