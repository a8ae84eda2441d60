use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of a driver data load.
///
/// Driver failures (bad credentials, unreachable endpoint, unknown
/// operation) come back as an error payload rather than a transport
/// failure, so settings forms can render them inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriverDataOutput {
	Error { error: String },
	Data(Value),
}
