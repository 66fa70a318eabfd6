use crate::config::BoardConfig;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Écrit `data` dans `path` de manière atomique (fichier temporaire + rename).
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

pub trait ConfigStorage {
    /// Charge la configuration depuis un support.
    fn load(&self) -> anyhow::Result<BoardConfig>;
    /// Sauvegarde de manière atomique.
    fn save(&self, config: &BoardConfig) -> anyhow::Result<()>;
}

pub struct JsonConfigStorage {
    path: PathBuf,
}

impl JsonConfigStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStorage for JsonConfigStorage {
    fn load(&self) -> anyhow::Result<BoardConfig> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let config: BoardConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self, config: &BoardConfig) -> anyhow::Result<()> {
        config.validate()?;
        let json = serde_json::to_vec_pretty(config)?;
        write_atomic(&self.path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn config_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = JsonConfigStorage::open(dir.path().join("anniv.json"));
        let config = BoardConfig {
            timezone: "Europe/Paris".into(),
            window_days: 30,
            ..BoardConfig::default()
        };
        storage.save(&config).unwrap();
        assert_eq!(storage.load().unwrap(), config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{"timezone":"Asia/Tokyo"}"#).unwrap();
        let config = JsonConfigStorage::open(&path).load().unwrap();
        assert_eq!(config.timezone, "Asia/Tokyo");
        assert_eq!(config.window_days, 60);
    }

    #[test]
    fn invalid_config_is_not_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let config = BoardConfig {
            window_days: 0,
            ..BoardConfig::default()
        };
        assert!(JsonConfigStorage::open(&path).save(&config).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ics");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
