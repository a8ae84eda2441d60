//! `av-admin` - command line admin surface for asset volumes
//!
//! Each subcommand maps onto one registered operation and prints the
//! result as pretty JSON, so the CLI, tests and any future transport
//! all exercise the same dispatch path.

use anyhow::{Context, Result};
use av_core::ops::registry;
use av_core::Core;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "av-admin", about = "Manage asset volumes", version)]
struct Cli {
	/// Data directory (defaults to the platform data dir)
	#[arg(long, env = "AV_DATA_DIR")]
	data_dir: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// List all volumes in display order
	List,
	/// Show the edit form data for a volume (or a blank create form)
	Edit {
		/// Volume id; omit for a create form
		#[arg(long)]
		id: Option<Uuid>,
	},
	/// Create or update a volume from a JSON payload
	Save {
		/// Path to a JSON file, or inline JSON
		payload: String,
	},
	/// Reorder volumes
	Reorder {
		/// Volume ids in their new display order
		ids: Vec<Uuid>,
	},
	/// Delete a volume
	Delete { id: Uuid },
	/// Run a driver data operation (e.g. remote listBuckets)
	DriverData {
		/// Driver type id
		#[arg(value_name = "TYPE")]
		type_id: String,
		/// Operation name
		operation: String,
		/// Positional params as a JSON array
		#[arg(long, default_value = "[]")]
		params: String,
	},
}

impl Command {
	fn into_call(self) -> Result<(&'static str, Value)> {
		Ok(match self {
			Command::List => ("query:volumes.list", json!({})),
			Command::Edit { id } => ("query:volumes.edit", json!({ "volumeId": id })),
			Command::Save { payload } => {
				let raw = if std::path::Path::new(&payload).is_file() {
					std::fs::read_to_string(&payload)
						.with_context(|| format!("Failed to read {}", payload))?
				} else {
					payload
				};
				let value: Value =
					serde_json::from_str(&raw).context("Save payload is not valid JSON")?;
				("action:volumes.save", value)
			}
			Command::Reorder { ids } => ("action:volumes.reorder", json!({ "ids": ids })),
			Command::Delete { id } => ("action:volumes.delete", json!({ "id": id })),
			Command::DriverData {
				type_id,
				operation,
				params,
			} => {
				let params: Value =
					serde_json::from_str(&params).context("Params are not valid JSON")?;
				(
					"query:volumes.driver_data",
					json!({ "type": type_id, "operation": operation, "params": params }),
				)
			}
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let cli = Cli::parse();

	let core = match cli.data_dir {
		Some(data_dir) => Core::new_with_config(data_dir)?,
		None => Core::new()?,
	};

	let (method, payload) = cli.command.into_call()?;

	match registry::dispatch(core.context(), method, payload).await {
		Ok(result) => {
			println!("{}", serde_json::to_string_pretty(&result)?);
			Ok(())
		}
		Err(error) => {
			eprintln!("Error: {}", error);
			std::process::exit(1);
		}
	}
}
