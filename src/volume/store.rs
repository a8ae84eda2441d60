//! On-disk volume store
//!
//! Volumes persist as one ordered JSON array; the array order is the
//! presentation order. Writes go through a temp file and a rename so a
//! crash mid-write never leaves a torn record file behind.

use super::error::VolumeError;
use super::types::Volume;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// File-backed persistence for the ordered volume list.
#[derive(Debug)]
pub struct VolumeStore {
	path: PathBuf,
}

impl VolumeStore {
	/// Create a store backed by the given file path.
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	/// Load all volumes in stored order. A missing file is an empty list.
	pub fn load(&self) -> Result<Vec<Volume>, VolumeError> {
		if !self.path.exists() {
			debug!("No volume store at {:?}, starting empty", self.path);
			return Ok(Vec::new());
		}

		let json = fs::read_to_string(&self.path)?;
		let volumes: Vec<Volume> = serde_json::from_str(&json)?;
		debug!("Loaded {} volumes from {:?}", volumes.len(), self.path);
		Ok(volumes)
	}

	/// Replace the stored list with `volumes`, atomically.
	pub fn save(&self, volumes: &[Volume]) -> Result<(), VolumeError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}

		let json = serde_json::to_string_pretty(volumes)?;
		let tmp = self.path.with_extension("json.tmp");
		fs::write(&tmp, json)?;
		fs::rename(&tmp, &self.path)?;
		debug!("Saved {} volumes to {:?}", volumes.len(), self.path);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::volume::types::Volume;
	use pretty_assertions::assert_eq;
	use tempfile::TempDir;

	#[test]
	fn test_missing_file_loads_empty() {
		let dir = TempDir::new().unwrap();
		let store = VolumeStore::new(dir.path().join("volumes.json"));
		assert!(store.load().unwrap().is_empty());
	}

	#[test]
	fn test_save_preserves_order() {
		let dir = TempDir::new().unwrap();
		let store = VolumeStore::new(dir.path().join("volumes.json"));

		let mut first = Volume::new("local");
		first.id = Some(uuid::Uuid::now_v7());
		first.handle = "first".to_string();
		let mut second = Volume::new("local");
		second.id = Some(uuid::Uuid::now_v7());
		second.handle = "second".to_string();

		store.save(&[first.clone(), second.clone()]).unwrap();
		let loaded = store.load().unwrap();
		assert_eq!(loaded, vec![first, second]);
	}
}
