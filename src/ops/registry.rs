//! Dynamic registry for admin queries and actions using `inventory`.
//!
//! Operations self-register at compile time with the `register_query!` and
//! `register_action!` macros; the dispatcher looks handlers up by method
//! string at runtime. Adding an operation therefore never touches this file.
//!
//! Method strings are namespaced by kind: `query:volumes.list`,
//! `action:volumes.save`, and so on. Payloads and results cross this
//! boundary as JSON values so every transport (CLI, HTTP, tests) speaks
//! the same shape.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{FutureExt, LocalBoxFuture};
use once_cell::sync::Lazy;

use crate::context::CoreContext;
use crate::cqrs::QueryManager;
use crate::infra::action::manager::ActionManager;

/// Handler function signature for queries.
///
/// Uses `LocalBoxFuture` because handlers run on the dispatching thread and
/// don't need to be `Send`.
pub type QueryHandlerFn =
	fn(Arc<CoreContext>, Value) -> LocalBoxFuture<'static, Result<Value, String>>;

/// Handler function signature for actions.
pub type ActionHandlerFn =
	fn(Arc<CoreContext>, Value) -> LocalBoxFuture<'static, Result<Value, String>>;

/// Registry entry for a query operation.
pub struct QueryEntry {
	pub method: &'static str,
	pub handler: QueryHandlerFn,
}

/// Registry entry for an action operation.
pub struct ActionEntry {
	pub method: &'static str,
	pub handler: ActionHandlerFn,
}

inventory::collect!(QueryEntry);
inventory::collect!(ActionEntry);

/// All registered query handlers, keyed by method string.
pub static QUERIES: Lazy<HashMap<&'static str, QueryHandlerFn>> = Lazy::new(|| {
	let mut map = HashMap::new();
	for entry in inventory::iter::<QueryEntry>() {
		map.insert(entry.method, entry.handler);
	}
	map
});

/// All registered action handlers, keyed by method string.
pub static ACTIONS: Lazy<HashMap<&'static str, ActionHandlerFn>> = Lazy::new(|| {
	let mut map = HashMap::new();
	for entry in inventory::iter::<ActionEntry>() {
		map.insert(entry.method, entry.handler);
	}
	map
});

/// Generic handler used by `register_query!`: deserialize the payload,
/// run the query through the [`QueryManager`], serialize the result.
pub fn handle_query<Q>(
	context: Arc<CoreContext>,
	payload: Value,
) -> LocalBoxFuture<'static, Result<Value, String>>
where
	Q: crate::cqrs::Query + DeserializeOwned + 'static,
	Q::Output: Serialize,
{
	(async move {
		let query: Q = serde_json::from_value(payload).map_err(|e| e.to_string())?;

		let manager = QueryManager::new(context);
		let output = manager.dispatch(query).await.map_err(|e| e.to_string())?;

		serde_json::to_value(output).map_err(|e| e.to_string())
	})
	.boxed_local()
}

/// Generic handler used by `register_action!`: deserialize the payload,
/// run the action through the [`ActionManager`], serialize the result.
pub fn handle_action<A>(
	context: Arc<CoreContext>,
	payload: Value,
) -> LocalBoxFuture<'static, Result<Value, String>>
where
	A: crate::infra::action::CoreAction + DeserializeOwned,
	A::Output: Serialize,
{
	(async move {
		let action: A = serde_json::from_value(payload).map_err(|e| e.to_string())?;

		let manager = ActionManager::new(context);
		let output = manager.dispatch(action).await.map_err(|e| e.to_string())?;

		serde_json::to_value(output).map_err(|e| e.to_string())
	})
	.boxed_local()
}

/// Dispatch a method call against the registered handlers.
pub async fn dispatch(
	context: Arc<CoreContext>,
	method: &str,
	payload: Value,
) -> Result<Value, String> {
	if let Some(handler) = QUERIES.get(method) {
		return handler(context, payload).await;
	}
	if let Some(handler) = ACTIONS.get(method) {
		return handler(context, payload).await;
	}
	Err(format!("Unknown method: {}", method))
}

/// Register a query type under `query:{method}`.
#[macro_export]
macro_rules! register_query {
	($ty:ty, $method:literal) => {
		inventory::submit! { $crate::ops::registry::QueryEntry { method: concat!("query:", $method), handler: $crate::ops::registry::handle_query::<$ty> } }
	};
}

/// Register an action type under `action:{method}`.
#[macro_export]
macro_rules! register_action {
	($ty:ty, $method:literal) => {
		inventory::submit! { $crate::ops::registry::ActionEntry { method: concat!("action:", $method), handler: $crate::ops::registry::handle_action::<$ty> } }
	};
}
