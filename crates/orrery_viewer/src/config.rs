use std::fs;
use std::path::Path;

use anyhow::Context;
use orrery::{presets, SystemTable};

/// Names a JSON system table to load instead of the built-in one.
pub const SYSTEM_ENV: &str = "ORRERY_SYSTEM";

pub fn load_system_table() -> anyhow::Result<SystemTable> {
    match std::env::var_os(SYSTEM_ENV) {
        Some(path) => read_system_table(Path::new(&path)),
        None => Ok(presets::solar_system()),
    }
}

pub fn read_system_table(path: &Path) -> anyhow::Result<SystemTable> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn shipped(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("systems").join(name)
    }

    #[test]
    fn shipped_table_matches_the_preset() {
        let table = read_system_table(&shipped("solar_system.json")).unwrap();

        assert_eq!(table, presets::solar_system());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_system_table(&shipped("nope.json")).unwrap_err();

        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn malformed_table_is_rejected() {
        let path = std::env::temp_dir().join("orrery-malformed-table.json");
        fs::write(&path, r#"{ "star": { "identifier": "sun" } }"#).unwrap();

        let err = read_system_table(&path).unwrap_err();

        assert!(format!("{err:#}").starts_with("Failed to parse"));
        fs::remove_file(path).unwrap();
    }
}
