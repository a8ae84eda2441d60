//! Explicit driver registry
//!
//! Maps type identifier strings to driver constructors, populated at
//! startup and queried by exact match. Unknown types fail closed with
//! `DriverError::UnknownType`; the one deliberate exception is
//! [`DriverRegistry::resolve_or_fallback`], which substitutes the
//! designated fallback driver so volumes whose driver was uninstalled
//! stay editable instead of becoming permanently inaccessible.

use super::{
	local::LocalDriver, remote::RemoteDriver, temp::TempDriver, DriverDescriptor, DriverError,
	DriverSettings, SettingsSchema, VolumeDriver,
};
use tracing::warn;

/// Constructor for one driver type.
pub type DriverFactory = fn(&DriverSettings) -> Box<dyn VolumeDriver>;

/// One registered driver type.
pub struct DriverRegistration {
	pub type_id: &'static str,
	pub display_name: &'static str,
	pub selectable: bool,
	pub schema: fn() -> SettingsSchema,
	pub factory: DriverFactory,
}

/// Result of resolving a possibly-missing driver type.
pub enum DriverResolution {
	/// The requested type was registered
	Resolved(Box<dyn VolumeDriver>),
	/// The requested type was missing; the fallback driver was substituted
	Fallback {
		driver: Box<dyn VolumeDriver>,
		original_type_id: String,
	},
}

/// Ordered registry of driver types. Enumeration order is registration order.
pub struct DriverRegistry {
	entries: Vec<DriverRegistration>,
	fallback: &'static str,
}

impl DriverRegistry {
	/// Create an empty registry with the given fallback type id.
	pub fn new(fallback: &'static str) -> Self {
		Self {
			entries: Vec::new(),
			fallback,
		}
	}

	/// Registry with all built-in drivers, falling back to local disk.
	pub fn with_builtin() -> Self {
		let mut registry = Self::new(LocalDriver::TYPE_ID);
		registry.register(LocalDriver::registration());
		registry.register(RemoteDriver::registration());
		registry.register(TempDriver::registration());
		registry
	}

	/// Register a driver type. Re-registering an id replaces the entry in place.
	pub fn register(&mut self, registration: DriverRegistration) {
		if let Some(existing) = self
			.entries
			.iter_mut()
			.find(|entry| entry.type_id == registration.type_id)
		{
			warn!("Replacing driver registration for {}", registration.type_id);
			*existing = registration;
		} else {
			self.entries.push(registration);
		}
	}

	fn entry(&self, type_id: &str) -> Option<&DriverRegistration> {
		self.entries.iter().find(|entry| entry.type_id == type_id)
	}

	/// Whether a type id is registered.
	pub fn contains(&self, type_id: &str) -> bool {
		self.entry(type_id).is_some()
	}

	/// The type id substituted for missing types.
	pub fn fallback_type_id(&self) -> &'static str {
		self.fallback
	}

	/// Descriptors for every registered type, in registration order.
	pub fn descriptors(&self) -> Vec<DriverDescriptor> {
		self.entries
			.iter()
			.map(|entry| DriverDescriptor {
				type_id: entry.type_id.to_string(),
				display_name: entry.display_name.to_string(),
				selectable: entry.selectable,
				settings_schema: (entry.schema)(),
			})
			.collect()
	}

	/// Instantiate a driver for a registered type.
	pub fn create(
		&self,
		type_id: &str,
		settings: &DriverSettings,
	) -> Result<Box<dyn VolumeDriver>, DriverError> {
		let entry = self
			.entry(type_id)
			.ok_or_else(|| DriverError::UnknownType(type_id.to_string()))?;
		Ok((entry.factory)(settings))
	}

	/// Resolve a type id, substituting the fallback driver when missing.
	///
	/// Only errors when the fallback type itself is unregistered, which is
	/// a wiring mistake rather than a runtime condition.
	pub fn resolve_or_fallback(
		&self,
		type_id: &str,
		settings: &DriverSettings,
	) -> Result<DriverResolution, DriverError> {
		match self.create(type_id, settings) {
			Ok(driver) => Ok(DriverResolution::Resolved(driver)),
			Err(DriverError::UnknownType(original_type_id)) => {
				warn!(
					"Volume type {} is not registered, falling back to {}",
					original_type_id, self.fallback
				);
				let driver = self.create(self.fallback, &DriverSettings::new())?;
				Ok(DriverResolution::Fallback {
					driver,
					original_type_id,
				})
			}
			Err(other) => Err(other),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_descriptors_follow_registration_order() {
		let registry = DriverRegistry::with_builtin();
		let ids: Vec<_> = registry
			.descriptors()
			.iter()
			.map(|descriptor| descriptor.type_id.clone())
			.collect();
		assert_eq!(ids, vec!["local", "remote", "temp"]);
	}

	#[test]
	fn test_temp_is_not_selectable() {
		let registry = DriverRegistry::with_builtin();
		let descriptors = registry.descriptors();
		let temp = descriptors
			.iter()
			.find(|descriptor| descriptor.type_id == "temp")
			.unwrap();
		assert!(!temp.selectable);
	}

	#[test]
	fn test_create_unknown_type_fails_closed() {
		let registry = DriverRegistry::with_builtin();
		let result = registry.create("Foo", &DriverSettings::new());
		assert!(matches!(result, Err(DriverError::UnknownType(id)) if id == "Foo"));
	}

	#[test]
	fn test_resolve_or_fallback_tags_the_result() {
		let registry = DriverRegistry::with_builtin();

		match registry
			.resolve_or_fallback("local", &DriverSettings::new())
			.unwrap()
		{
			DriverResolution::Resolved(driver) => assert_eq!(driver.type_id(), "local"),
			DriverResolution::Fallback { .. } => panic!("local should resolve"),
		}

		match registry
			.resolve_or_fallback("galacticStorage", &DriverSettings::new())
			.unwrap()
		{
			DriverResolution::Fallback {
				driver,
				original_type_id,
			} => {
				assert_eq!(driver.type_id(), "local");
				assert_eq!(original_type_id, "galacticStorage");
			}
			DriverResolution::Resolved(_) => panic!("unknown type should fall back"),
		}
	}

	#[test]
	fn test_reregistering_replaces_in_place() {
		let mut registry = DriverRegistry::with_builtin();
		registry.register(DriverRegistration {
			type_id: "remote",
			display_name: "Replacement Remote",
			selectable: false,
			schema: Vec::new,
			factory: |settings| Box::new(crate::driver::RemoteDriver::new(settings)),
		});

		let descriptors = registry.descriptors();
		assert_eq!(descriptors.len(), 3);
		assert_eq!(descriptors[1].display_name, "Replacement Remote");
	}
}
