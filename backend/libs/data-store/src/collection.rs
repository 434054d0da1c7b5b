/// Collection trait and its in-memory implementation
use crate::error::{StoreError, StoreResult};
use crate::fault::{FaultPlan, Operation};
use crate::latency::LatencyProfile;
use crate::record::{into_object, shallow_merge, Ack, Record, CREATED_AT_FIELD, ID_FIELD};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Async CRUD over one record type.
///
/// `fields` arguments are JSON objects. `create` assigns `id` and `createdAt`;
/// `update` shallow-merges over the stored record, so whole-record replacement
/// is done by passing the whole record.
#[async_trait]
pub trait Collection<T: Record>: Send + Sync {
    /// Collection name used in logs and errors ("posts")
    fn name(&self) -> &str;

    async fn get_all(&self) -> StoreResult<Vec<T>>;

    /// Fails with `NotFound` if `id` is absent
    async fn get_by_id(&self, id: &str) -> StoreResult<T>;

    async fn create(&self, fields: Value) -> StoreResult<T>;

    /// Fails with `NotFound` if `id` is absent
    async fn update(&self, id: &str, fields: Value) -> StoreResult<T>;

    /// Fails with `NotFound` if `id` is absent
    async fn delete(&self, id: &str) -> StoreResult<Ack>;
}

/// `Vec`-backed collection that sleeps for a fixed latency on every call
pub struct InMemoryCollection<T: Record> {
    name: String,
    latency: LatencyProfile,
    records: RwLock<Vec<T>>,
    faults: FaultPlan,
}

impl<T: Record> InMemoryCollection<T> {
    pub fn new(name: impl Into<String>, latency: LatencyProfile) -> Self {
        Self::with_records(name, latency, Vec::new())
    }

    pub fn with_records(name: impl Into<String>, latency: LatencyProfile, records: Vec<T>) -> Self {
        Self {
            name: name.into(),
            latency,
            records: RwLock::new(records),
            faults: FaultPlan::new(),
        }
    }

    /// Failure injection handle
    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }

    /// Current record without latency or fault injection
    pub fn peek(&self, id: &str) -> Option<T> {
        self.records.read().iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    async fn simulate(&self, op: Operation) -> StoreResult<()> {
        let delay = self.latency.for_operation(op);
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }

        if self.faults.should_fail(op) {
            debug!(collection = %self.name, operation = %op, "Injected store failure");
            return Err(StoreError::Unavailable {
                collection: self.name.clone(),
                operation: op,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Record> Collection<T> for InMemoryCollection<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_all(&self) -> StoreResult<Vec<T>> {
        self.simulate(Operation::GetAll).await?;
        Ok(self.records.read().clone())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<T> {
        self.simulate(Operation::GetById).await?;
        self.peek(id).ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    async fn create(&self, fields: Value) -> StoreResult<T> {
        self.simulate(Operation::Create).await?;

        let mut object = into_object(fields)?;
        let id = Uuid::new_v4().to_string();
        object.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        object.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        let record: T = serde_json::from_value(Value::Object(object))?;
        self.records.write().push(record.clone());

        debug!(collection = %self.name, id = %id, "Record created");
        Ok(record)
    }

    async fn update(&self, id: &str, fields: Value) -> StoreResult<T> {
        self.simulate(Operation::Update).await?;

        let patch = into_object(fields)?;
        let mut records = self.records.write();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))?;

        let mut object = into_object(serde_json::to_value(&*slot)?)?;
        shallow_merge(&mut object, patch);
        object.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let updated: T = serde_json::from_value(Value::Object(object))?;
        *slot = updated.clone();

        debug!(collection = %self.name, id = %id, "Record updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> StoreResult<Ack> {
        self.simulate(Operation::Delete).await?;

        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
        records.remove(index);

        debug!(collection = %self.name, id = %id, "Record deleted");
        Ok(Ack { success: true })
    }
}
