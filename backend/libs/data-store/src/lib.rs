/// Simulated backend collections for the feed client
///
/// This library stands in for a remote API. It provides:
/// - **Collection**: async CRUD trait over a single record type
/// - **InMemoryCollection**: `Vec`-backed implementation with per-operation latency
/// - **LatencyProfile**: the artificial delay applied to every call
/// - **FaultPlan**: deterministic failure injection for tests and demos
///
/// # Example
///
/// ```rust,no_run
/// use data_store::{Collection, InMemoryCollection, LatencyProfile, Record};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Note {
///     id: String,
///     text: String,
/// }
///
/// impl Record for Note {
///     const KIND: &'static str = "Note";
///     fn id(&self) -> &str {
///         &self.id
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), data_store::StoreError> {
///     let notes = InMemoryCollection::<Note>::new("notes", LatencyProfile::standard());
///     let note = notes.create(serde_json::json!({ "text": "hi" })).await?;
///     let fetched = notes.get_by_id(&note.id).await?;
///     assert_eq!(fetched.text, "hi");
///     Ok(())
/// }
/// ```

pub mod collection;
pub mod error;
pub mod fault;
pub mod latency;
pub mod record;

pub use collection::{Collection, InMemoryCollection};
pub use error::{StoreError, StoreResult};
pub use fault::{FaultPlan, Operation};
pub use latency::LatencyProfile;
pub use record::{Ack, Record, CREATED_AT_FIELD, ID_FIELD};
