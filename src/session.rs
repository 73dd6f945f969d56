//! Construction session: one network plus the directory its saves live in.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EwireError, Result};
use crate::network::Network;
use crate::persist::{self, LoadReport, Prototype, Registry};
use crate::propagation::EngineConfig;
use crate::FILE_EXTENSION;

/// Build a save file stem from a scene name and a timestamp.
///
/// Spaces become `_` and path separators become `-` so the result is a
/// single file name.
///
/// ```
/// use ewire_core::session::save_file_name;
///
/// assert_eq!(save_file_name("Lab Bench", "2024/05/01 10:00"), "Lab_Bench_2024-05-01_10:00");
/// ```
pub fn save_file_name(scene: &str, stamp: &str) -> String {
    format!("{scene}_{stamp}").replace(' ', "_").replace('/', "-")
}

/// Owns the network being built, the save directory and the registry used
/// to read saves back.
#[derive(Debug)]
pub struct Session {
    network: Network,
    dir: PathBuf,
    registry: Registry,
}

impl Session {
    /// Create a session with an empty network. The directory is created on
    /// the first save.
    pub fn new(dir: impl Into<PathBuf>, config: EngineConfig) -> Self {
        Self {
            network: Network::with_config(config),
            dir: dir.into(),
            registry: Registry::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Make `name` loadable from save files.
    pub fn register(&mut self, name: impl Into<String>, prototype: Prototype) -> Option<Prototype> {
        self.registry.register(name, prototype)
    }

    /// Write the network to `<dir>/<name>.ewdata` and return the path.
    pub fn save(&self, name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| EwireError::FileWrite {
            path: self.dir.display().to_string(),
            source: e,
        })?;
        let path = self.dir.join(format!("{name}.{FILE_EXTENSION}"));
        let text = persist::save_network(&self.network)?;
        persist::write_file(&path, &text)?;
        info!(path = %path.display(), components = self.network.component_count(), "saved network");
        Ok(path)
    }

    /// Save files in the session directory, sorted by path.
    ///
    /// A directory that does not exist yet holds no saves.
    pub fn list_saves(&self) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(EwireError::FileRead {
                    path: self.dir.display().to_string(),
                    source: e,
                })
            }
        };

        let mut saves = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| EwireError::FileRead {
                    path: self.dir.display().to_string(),
                    source: e,
                })?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
                saves.push(path);
            }
        }
        saves.sort();
        Ok(saves)
    }

    /// Replace the network with the contents of a save file.
    pub fn load(&mut self, path: &Path) -> Result<LoadReport> {
        let text = persist::read_file(path)?;
        let report = persist::load_network(&mut self.network, &text, &self.registry)?;
        info!(
            path = %path.display(),
            components = report.components,
            wires = report.wires,
            skipped = report.skipped.len(),
            "loaded network"
        );
        Ok(report)
    }

    /// Delete a save file.
    pub fn remove_save(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(|e| EwireError::FileWrite {
            path: path.display().to_string(),
            source: e,
        })?;
        info!(path = %path.display(), "removed save");
        Ok(())
    }

    /// Remove every component and wire.
    ///
    /// Any undo history the host keeps for this session should be dropped
    /// alongside.
    pub fn clear(&mut self) {
        self.network.clear();
        info!("cleared network");
    }
}
