//! Remote object storage driver
//!
//! Talks to the provider's JSON admin API for metadata lookups (bucket
//! listings). These calls hit a third-party, externally hosted service:
//! one attempt per invocation, bounded timeout, and the error comes back
//! to the caller as data rather than tearing down the request.

use super::registry::DriverRegistration;
use super::{
	param_str, validate_required, DriverError, DriverSettings, SettingField, SettingsSchema,
	VolumeDriver,
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Driver for volumes stored in a remote object-storage bucket.
#[derive(Debug, Clone)]
pub struct RemoteDriver {
	endpoint: Option<String>,
	access_key: Option<String>,
	secret_key: Option<String>,
	client: reqwest::Client,
}

impl RemoteDriver {
	pub const TYPE_ID: &'static str = "remote";

	pub fn new(settings: &DriverSettings) -> Self {
		let str_setting = |key: &str| {
			settings
				.get(key)
				.and_then(Value::as_str)
				.map(str::to_owned)
		};
		Self {
			endpoint: str_setting("endpoint"),
			access_key: str_setting("accessKey"),
			secret_key: str_setting("secretKey"),
			client: reqwest::Client::new(),
		}
	}

	pub fn schema() -> SettingsSchema {
		vec![
			SettingField::new("endpoint", "API Endpoint", true),
			SettingField::new("accessKey", "Access Key", true),
			SettingField::new("secretKey", "Secret Key", true).secret(),
			SettingField::new("bucket", "Bucket", true),
		]
	}

	pub fn registration() -> DriverRegistration {
		DriverRegistration {
			type_id: Self::TYPE_ID,
			display_name: "Remote Storage",
			selectable: true,
			schema: Self::schema,
			factory: |settings| Box::new(Self::new(settings)),
		}
	}

	/// Credentials for a data load: positional params win over settings,
	/// since data loads happen while the volume form is still unsaved.
	fn credentials<'a>(
		&'a self,
		params: &'a [Value],
	) -> Result<(String, &'a str, &'a str), DriverError> {
		let endpoint = match params.first().and_then(Value::as_str) {
			Some(endpoint) if !endpoint.trim().is_empty() => endpoint,
			_ => self
				.endpoint
				.as_deref()
				.ok_or(DriverError::MissingParam {
					index: 0,
					name: "endpoint",
				})?,
		};
		let access_key = match params.get(1).and_then(Value::as_str) {
			Some(key) if !key.trim().is_empty() => key,
			_ => self
				.access_key
				.as_deref()
				.ok_or(DriverError::MissingParam {
					index: 1,
					name: "accessKey",
				})?,
		};
		let secret_key = match params.get(2).and_then(Value::as_str) {
			Some(key) if !key.trim().is_empty() => key,
			_ => self
				.secret_key
				.as_deref()
				.ok_or(DriverError::MissingParam {
					index: 2,
					name: "secretKey",
				})?,
		};
		Ok((
			endpoint.trim_end_matches('/').to_string(),
			access_key,
			secret_key,
		))
	}

	async fn fetch(
		&self,
		url: &str,
		access_key: &str,
		secret_key: &str,
	) -> Result<Value, DriverError> {
		debug!("Loading driver data from {}", url);
		let response = self
			.client
			.get(url)
			.basic_auth(access_key, Some(secret_key))
			.timeout(REQUEST_TIMEOUT)
			.send()
			.await?
			.error_for_status()?;
		Ok(response.json().await?)
	}

	/// `listBuckets(endpoint, accessKey, secretKey)`
	async fn list_buckets(&self, params: &[Value]) -> Result<Value, DriverError> {
		let (endpoint, access_key, secret_key) = self.credentials(params)?;
		let url = format!("{}/buckets", endpoint);
		self.fetch(&url, access_key, secret_key).await
	}

	/// `loadBucketData(bucket, endpoint, accessKey, secretKey)`
	async fn load_bucket_data(&self, params: &[Value]) -> Result<Value, DriverError> {
		let bucket = param_str(params, 0, "bucket")?;
		let rest = params.get(1..).unwrap_or(&[]);
		let (endpoint, access_key, secret_key) = self.credentials(rest)?;
		let url = format!("{}/buckets/{}", endpoint, bucket);
		self.fetch(&url, access_key, secret_key).await
	}
}

#[async_trait]
impl VolumeDriver for RemoteDriver {
	fn type_id(&self) -> &'static str {
		Self::TYPE_ID
	}

	fn display_name(&self) -> &'static str {
		"Remote Storage"
	}

	fn settings_schema(&self) -> SettingsSchema {
		Self::schema()
	}

	fn validate_settings(&self, settings: &DriverSettings) -> Result<(), DriverError> {
		validate_required(&Self::schema(), settings)
	}

	async fn load_data(&self, operation: &str, params: &[Value]) -> Result<Value, DriverError> {
		match operation {
			"listBuckets" => self.list_buckets(params).await,
			"loadBucketData" => self.load_bucket_data(params).await,
			other => Err(DriverError::UnknownOperation(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn test_list_buckets_without_credentials_is_a_param_error() {
		let driver = RemoteDriver::new(&DriverSettings::new());
		let result = driver.load_data("listBuckets", &[]).await;
		assert!(matches!(
			result,
			Err(DriverError::MissingParam { index: 0, .. })
		));
	}

	#[tokio::test]
	async fn test_params_override_settings() {
		// Settings carry the endpoint; the call still needs keys
		let mut settings = DriverSettings::new();
		settings.insert("endpoint".to_string(), json!("https://storage.example.com"));
		let driver = RemoteDriver::new(&settings);

		let result = driver.load_data("listBuckets", &[]).await;
		assert!(matches!(
			result,
			Err(DriverError::MissingParam { index: 1, .. })
		));
	}

	#[test]
	fn test_validate_settings_requires_all_fields() {
		let driver = RemoteDriver::new(&DriverSettings::new());

		let mut settings = DriverSettings::new();
		settings.insert("endpoint".to_string(), json!("https://storage.example.com"));
		settings.insert("accessKey".to_string(), json!("AK"));
		settings.insert("secretKey".to_string(), json!("SK"));
		assert!(matches!(
			driver.validate_settings(&settings),
			Err(DriverError::InvalidSetting { field, .. }) if field == "bucket"
		));

		settings.insert("bucket".to_string(), json!("assets"));
		assert!(driver.validate_settings(&settings).is_ok());
	}
}
