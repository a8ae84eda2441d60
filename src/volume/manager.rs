//! Volume manager: the service owning persisted volume records

use super::error::{ValidationIssue, VolumeError};
use super::store::VolumeStore;
use super::types::{Volume, VolumeId};
use crate::driver::{DriverError, DriverRegistry};
use crate::infra::event::{Event, EventBus};

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Handle grammar: leading letter, then letters, digits or underscores.
static HANDLE_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid handle regex"));

/// Handles that collide with built-in asset attributes.
const RESERVED_HANDLES: &[&str] = &["id", "uid", "title", "dateCreated", "dateUpdated"];

/// Manages the ordered set of volume records.
///
/// The vec order is the presentation order. All mutations build the next
/// list, persist it, and only then swap it in under the write lock, so a
/// failed write changes nothing and readers never observe a partial order.
pub struct VolumeManager {
	volumes: RwLock<Vec<Volume>>,
	store: VolumeStore,
	drivers: Arc<DriverRegistry>,
	events: Arc<EventBus>,
}

impl VolumeManager {
	/// Load the manager from the backing store.
	pub fn load(
		store: VolumeStore,
		drivers: Arc<DriverRegistry>,
		events: Arc<EventBus>,
	) -> Result<Self, VolumeError> {
		let volumes = store.load()?;
		debug!("Volume manager loaded {} volumes", volumes.len());
		Ok(Self {
			volumes: RwLock::new(volumes),
			store,
			drivers,
			events,
		})
	}

	/// All volumes, in presentation order.
	pub async fn list(&self) -> Vec<Volume> {
		self.volumes.read().await.clone()
	}

	/// Look up a volume by id.
	pub async fn get(&self, id: VolumeId) -> Option<Volume> {
		self.volumes
			.read()
			.await
			.iter()
			.find(|volume| volume.id == Some(id))
			.cloned()
	}

	/// Validate and persist one volume, all-or-nothing.
	///
	/// A new volume (no id) is appended; an existing one keeps its position.
	/// Validation failure returns `VolumeError::Validation` with the issues
	/// and writes nothing. Concurrent saves are last-write-wins.
	#[instrument(skip(self, volume), fields(handle = %volume.handle))]
	pub async fn save(&self, mut volume: Volume) -> Result<Volume, VolumeError> {
		let mut guard = self.volumes.write().await;

		let issues = self.validate(&volume, &guard);
		if !issues.is_empty() {
			return Err(VolumeError::Validation(issues));
		}

		if !volume.has_urls {
			// URLs are meaningless on a private volume
			volume.url = None;
		}

		let now = Utc::now();
		volume.date_updated = now;

		let mut next = guard.clone();
		match volume.id {
			Some(id) => {
				let existing = next
					.iter_mut()
					.find(|existing| existing.id == Some(id))
					.ok_or(VolumeError::NotFound(id))?;
				volume.date_created = existing.date_created;
				*existing = volume.clone();
			}
			None => {
				volume.id = Some(Uuid::now_v7());
				volume.date_created = now;
				next.push(volume.clone());
			}
		}

		self.store.save(&next)?;
		*guard = next;

		if let Some(id) = volume.id {
			self.events.emit(Event::VolumeSaved { id });
		}
		Ok(volume)
	}

	/// Delete a volume by id. Deleting a missing id is a no-op and returns
	/// `false`; the order of the remaining volumes is untouched either way.
	#[instrument(skip(self))]
	pub async fn delete(&self, id: VolumeId) -> Result<bool, VolumeError> {
		let mut guard = self.volumes.write().await;

		let Some(position) = guard.iter().position(|volume| volume.id == Some(id)) else {
			debug!("Delete of unknown volume {} ignored", id);
			return Ok(false);
		};

		let mut next = guard.clone();
		next.remove(position);

		self.store.save(&next)?;
		*guard = next;

		self.events.emit(Event::VolumeDeleted { id });
		Ok(true)
	}

	/// Reorder volumes by id, all-or-nothing.
	///
	/// Listed ids come first in the submitted order; volumes not listed
	/// keep their relative order after them. An unknown id aborts the
	/// whole reorder with `NotFound` and leaves the order unchanged.
	#[instrument(skip(self))]
	pub async fn reorder(&self, ids: &[VolumeId]) -> Result<(), VolumeError> {
		let mut guard = self.volumes.write().await;

		for id in ids {
			if !guard.iter().any(|volume| volume.id == Some(*id)) {
				return Err(VolumeError::NotFound(*id));
			}
		}

		let mut rest = guard.clone();
		let mut next = Vec::with_capacity(rest.len());
		for id in ids {
			if let Some(position) = rest.iter().position(|volume| volume.id == Some(*id)) {
				next.push(rest.remove(position));
			}
		}
		next.extend(rest);

		self.store.save(&next)?;
		*guard = next;

		self.events.emit(Event::VolumesReordered { ids: ids.to_vec() });
		Ok(())
	}

	/// Collect every validation problem on `volume` against the current list.
	fn validate(&self, volume: &Volume, existing: &[Volume]) -> Vec<ValidationIssue> {
		let mut issues = Vec::new();

		if volume.name.trim().is_empty() {
			issues.push(ValidationIssue::new("name", "Name is required."));
		}

		if volume.handle.trim().is_empty() {
			issues.push(ValidationIssue::new("handle", "Handle is required."));
		} else if !HANDLE_RE.is_match(&volume.handle) {
			issues.push(ValidationIssue::new(
				"handle",
				"Handle must start with a letter and contain only letters, digits and underscores.",
			));
		} else if RESERVED_HANDLES.contains(&volume.handle.as_str()) {
			issues.push(ValidationIssue::new(
				"handle",
				format!("\"{}\" is a reserved word.", volume.handle),
			));
		} else if existing
			.iter()
			.any(|other| other.handle == volume.handle && other.id != volume.id)
		{
			issues.push(ValidationIssue::new(
				"handle",
				format!("A volume with the handle \"{}\" already exists.", volume.handle),
			));
		}

		if volume.has_urls {
			let url_missing = volume
				.url
				.as_deref()
				.map(|url| url.trim().is_empty())
				.unwrap_or(true);
			if url_missing {
				issues.push(ValidationIssue::new(
					"url",
					"URL is required when the volume has public URLs.",
				));
			}
		}

		// Settings are only meaningful under a resolvable driver type
		match self.drivers.create(&volume.type_id, &volume.settings) {
			Ok(driver) => {
				if let Err(error) = driver.validate_settings(&volume.settings) {
					issues.push(match error {
						DriverError::InvalidSetting { field, message } => {
							ValidationIssue::new(format!("settings.{}", field), message)
						}
						other => ValidationIssue::new("settings", other.to_string()),
					});
				}
			}
			Err(_) => {
				issues.push(ValidationIssue::new(
					"type",
					format!("Volume type \"{}\" is not registered.", volume.type_id),
				));
			}
		}

		let mut seen_handles = std::collections::HashSet::new();
		for field in &volume.field_layout.fields {
			if field.handle.trim().is_empty() {
				issues.push(ValidationIssue::new("fieldLayout", "Field handles are required."));
			} else if !seen_handles.insert(field.handle.as_str()) {
				issues.push(ValidationIssue::new(
					"fieldLayout",
					format!("Duplicate field handle \"{}\".", field.handle),
				));
			}
		}

		issues
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::driver::DriverSettings;
	use pretty_assertions::assert_eq;
	use serde_json::json;
	use tempfile::TempDir;

	fn test_manager(dir: &TempDir) -> VolumeManager {
		let store = VolumeStore::new(dir.path().join("volumes.json"));
		let drivers = Arc::new(DriverRegistry::with_builtin());
		let events = Arc::new(EventBus::default());
		VolumeManager::load(store, drivers, events).unwrap()
	}

	fn local_volume(handle: &str) -> Volume {
		let mut volume = Volume::new("local");
		volume.name = format!("Volume {}", handle);
		volume.handle = handle.to_string();
		volume.settings = local_settings("/srv/assets");
		volume
	}

	fn local_settings(path: &str) -> DriverSettings {
		let mut settings = DriverSettings::new();
		settings.insert("path".to_string(), json!(path));
		settings
	}

	#[tokio::test]
	async fn test_save_assigns_id_and_appends() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let saved = manager.save(local_volume("uploads")).await.unwrap();
		assert!(saved.id.is_some());

		let listed = manager.list().await;
		assert_eq!(listed.len(), 1);
		assert_eq!(listed[0].handle, "uploads");
	}

	#[tokio::test]
	async fn test_save_without_urls_clears_url() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let mut volume = local_volume("uploads");
		volume.has_urls = false;
		volume.url = Some("https://cdn.example.com".to_string());

		let saved = manager.save(volume).await.unwrap();
		assert_eq!(saved.url, None);
	}

	#[tokio::test]
	async fn test_save_rejects_bad_handles() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		for handle in ["", "9lives", "has space", "dateCreated"] {
			let mut volume = local_volume("ok");
			volume.handle = handle.to_string();
			match manager.save(volume).await {
				Err(VolumeError::Validation(issues)) => {
					assert!(
						issues.iter().any(|issue| issue.field == "handle"),
						"expected a handle issue for {:?}, got {:?}",
						handle,
						issues
					);
				}
				other => panic!("expected validation failure for {:?}: {:?}", handle, other.is_ok()),
			}
		}

		// Nothing was persisted
		assert!(manager.list().await.is_empty());
	}

	#[tokio::test]
	async fn test_save_rejects_duplicate_handle() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		manager.save(local_volume("uploads")).await.unwrap();
		let result = manager.save(local_volume("uploads")).await;
		assert!(matches!(result, Err(VolumeError::Validation(_))));
	}

	#[tokio::test]
	async fn test_save_rejects_unknown_type() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let mut volume = local_volume("uploads");
		volume.type_id = "galacticStorage".to_string();
		match manager.save(volume).await {
			Err(VolumeError::Validation(issues)) => {
				assert!(issues.iter().any(|issue| issue.field == "type"));
			}
			other => panic!("expected validation failure: {:?}", other.is_ok()),
		}
	}

	#[tokio::test]
	async fn test_save_requires_url_when_has_urls() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let mut volume = local_volume("uploads");
		volume.has_urls = true;
		volume.url = None;
		match manager.save(volume).await {
			Err(VolumeError::Validation(issues)) => {
				assert!(issues.iter().any(|issue| issue.field == "url"));
			}
			other => panic!("expected validation failure: {:?}", other.is_ok()),
		}
	}

	#[tokio::test]
	async fn test_update_keeps_position_and_created_date() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let first = manager.save(local_volume("first")).await.unwrap();
		let second = manager.save(local_volume("second")).await.unwrap();

		let mut update = first.clone();
		update.name = "Renamed".to_string();
		let updated = manager.save(update).await.unwrap();
		assert_eq!(updated.date_created, first.date_created);

		let listed = manager.list().await;
		assert_eq!(listed[0].id, first.id);
		assert_eq!(listed[0].name, "Renamed");
		assert_eq!(listed[1].id, second.id);
	}

	#[tokio::test]
	async fn test_update_of_unknown_id_is_not_found() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let mut volume = local_volume("ghost");
		volume.id = Some(Uuid::now_v7());
		assert!(matches!(
			manager.save(volume).await,
			Err(VolumeError::NotFound(_))
		));
	}

	#[tokio::test]
	async fn test_delete_missing_id_is_noop() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let saved = manager.save(local_volume("uploads")).await.unwrap();
		assert!(!manager.delete(Uuid::now_v7()).await.unwrap());
		assert_eq!(manager.list().await.len(), 1);

		assert!(manager.delete(saved.id.unwrap()).await.unwrap());
		assert!(manager.list().await.is_empty());
	}

	#[tokio::test]
	async fn test_reorder_is_idempotent() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let a = manager.save(local_volume("a")).await.unwrap().id.unwrap();
		let b = manager.save(local_volume("b")).await.unwrap().id.unwrap();
		let c = manager.save(local_volume("c")).await.unwrap().id.unwrap();

		let order = vec![c, a, b];
		manager.reorder(&order).await.unwrap();
		let first_pass: Vec<_> = manager.list().await.iter().map(|v| v.id.unwrap()).collect();
		assert_eq!(first_pass, order);

		manager.reorder(&order).await.unwrap();
		let second_pass: Vec<_> = manager.list().await.iter().map(|v| v.id.unwrap()).collect();
		assert_eq!(second_pass, order);
	}

	#[tokio::test]
	async fn test_reorder_unknown_id_changes_nothing() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let a = manager.save(local_volume("a")).await.unwrap().id.unwrap();
		let b = manager.save(local_volume("b")).await.unwrap().id.unwrap();

		let result = manager.reorder(&[b, Uuid::now_v7()]).await;
		assert!(matches!(result, Err(VolumeError::NotFound(_))));

		let order: Vec<_> = manager.list().await.iter().map(|v| v.id.unwrap()).collect();
		assert_eq!(order, vec![a, b]);
	}

	#[tokio::test]
	async fn test_partial_reorder_keeps_unlisted_relative_order() {
		let dir = TempDir::new().unwrap();
		let manager = test_manager(&dir);

		let a = manager.save(local_volume("a")).await.unwrap().id.unwrap();
		let b = manager.save(local_volume("b")).await.unwrap().id.unwrap();
		let c = manager.save(local_volume("c")).await.unwrap().id.unwrap();

		manager.reorder(&[c]).await.unwrap();
		let order: Vec<_> = manager.list().await.iter().map(|v| v.id.unwrap()).collect();
		assert_eq!(order, vec![c, a, b]);
	}

	#[tokio::test]
	async fn test_state_survives_reload() {
		let dir = TempDir::new().unwrap();
		let id;
		{
			let manager = test_manager(&dir);
			let a = manager.save(local_volume("a")).await.unwrap().id.unwrap();
			let b = manager.save(local_volume("b")).await.unwrap().id.unwrap();
			manager.reorder(&[b, a]).await.unwrap();
			id = b;
		}

		let manager = test_manager(&dir);
		let listed = manager.list().await;
		assert_eq!(listed.len(), 2);
		assert_eq!(listed[0].id, Some(id));
	}
}
