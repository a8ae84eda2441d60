//! Volume type definitions

use crate::driver::DriverSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a persisted volume.
pub type VolumeId = Uuid;

/// A named storage configuration for uploaded assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
	/// Record id; `None` until the volume is first saved
	pub id: Option<VolumeId>,

	/// Human-readable volume name
	pub name: String,
	/// Machine-readable identifier (no spaces or reserved words)
	pub handle: String,
	/// Driver type identifier governing this volume
	#[serde(rename = "type")]
	pub type_id: String,

	/// Whether files in this volume are web-accessible
	pub has_urls: bool,
	/// Base URL template, meaningful only when `has_urls` is true
	pub url: Option<String>,

	/// Driver-specific configuration; schema is owned by the driver type
	#[serde(default)]
	pub settings: DriverSettings,

	/// Custom metadata fields attached to assets stored in this volume
	#[serde(default)]
	pub field_layout: FieldLayout,

	pub date_created: DateTime<Utc>,
	pub date_updated: DateTime<Utc>,
}

impl Volume {
	/// Create a blank, unsaved volume of the given driver type.
	pub fn new(type_id: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			id: None,
			name: String::new(),
			handle: String::new(),
			type_id: type_id.into(),
			has_urls: false,
			url: None,
			settings: DriverSettings::new(),
			field_layout: FieldLayout::default(),
			date_created: now,
			date_updated: now,
		}
	}

	/// Whether this volume has been persisted yet.
	pub fn is_new(&self) -> bool {
		self.id.is_none()
	}
}

/// A set of custom metadata fields attached to assets within a volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldLayout {
	#[serde(default)]
	pub fields: Vec<FieldDefinition>,
}

/// One custom field in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
	pub handle: String,
	pub name: String,
	#[serde(default)]
	pub required: bool,
	pub kind: FieldKind,
}

/// The data kind of a custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
	Text,
	Number,
	Date,
	Boolean,
	Select { options: Vec<String> },
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_new_volume_is_new() {
		let volume = Volume::new("local");
		assert!(volume.is_new());
		assert_eq!(volume.type_id, "local");
		assert!(volume.settings.is_empty());
	}

	#[test]
	fn test_volume_serde_round_trip() {
		let mut volume = Volume::new("remote");
		volume.name = "Product Images".to_string();
		volume.handle = "productImages".to_string();
		volume.has_urls = true;
		volume.url = Some("https://cdn.example.com/products".to_string());
		volume.field_layout = FieldLayout {
			fields: vec![FieldDefinition {
				handle: "altText".to_string(),
				name: "Alt Text".to_string(),
				required: true,
				kind: FieldKind::Text,
			}],
		};

		let json = serde_json::to_string(&volume).unwrap();
		let parsed: Volume = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, volume);

		// The driver type serializes under the `type` key
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["type"], "remote");
	}
}
