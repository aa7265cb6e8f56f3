use std::sync::Arc;

use chrono::Utc;
use models::errors::IssueKind;
use models::validation::{validate, validate_partial};
use models::{Collection, Record, RecordId, ResourceDef, ValidationError};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::allocator::IdAllocator;
use crate::errors::ServiceError;
use crate::query::{loosely_equal, ListQuery};
use crate::storage::CollectionStore;

/// One page of a list request plus the size of the filtered set.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage {
    pub records: Vec<Record>,
    pub total: usize,
}

/// CRUD engine for one resource collection.
///
/// Mutations hold the write guard across load, change and save, so no two
/// of them interleave; reads hold the read guard across load and therefore
/// observe the collection either before or after a mutation.
pub struct ResourceStore {
    def: ResourceDef,
    port: Arc<dyn CollectionStore>,
    lock: RwLock<()>,
}

impl ResourceStore {
    pub fn new(def: ResourceDef, port: Arc<dyn CollectionStore>) -> Self {
        Self { def, port, lock: RwLock::new(()) }
    }

    pub fn def(&self) -> &ResourceDef {
        &self.def
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    async fn load(&self) -> Result<Collection, ServiceError> {
        self.port.load().await.map_err(|e| {
            error!(resource = self.def.name, location = %self.port.describe(), error = %e, "collection_load_failed");
            ServiceError::from(e)
        })
    }

    async fn persist(&self, collection: &Collection) -> Result<(), ServiceError> {
        self.port.save(collection).await.map_err(|e| {
            error!(resource = self.def.name, location = %self.port.describe(), error = %e, "collection_save_failed");
            ServiceError::from(e)
        })
    }

    fn not_found(&self, id: &RecordId) -> ServiceError {
        ServiceError::not_found(self.def.singular, id)
    }

    /// Trim, fill defaults and validate a create input.
    fn prepare(&self, mut input: Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
        self.def.spec.normalize(&mut input);
        self.def.spec.apply_defaults(&mut input, Utc::now());
        validate(&input, &self.def.spec)?;
        Ok(input)
    }

    /// Reject values of `unique` fields already held by another record.
    fn check_unique<'a, I>(&self, candidate: &Map<String, Value>, others: I) -> Result<(), ValidationError>
    where
        I: Iterator<Item = &'a Record> + Clone,
    {
        let mut err = ValidationError::new();
        for field in self.def.spec.unique_fields() {
            let Some(value) = candidate.get(field).filter(|v| !v.is_null()) else { continue };
            if others.clone().any(|r| r.get(field).map(|v| loosely_equal(v, value)).unwrap_or(false)) {
                err.invalid(field, IssueKind::Duplicate);
            }
        }
        err.into_result()
    }

    /// Records matching the query, paginated when the query says so.
    #[instrument(skip(self, query), fields(resource = self.def.name))]
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Record>, ServiceError> {
        Ok(self.list_page(query).await?.records)
    }

    /// Like [`list`](Self::list) but also reports the filtered total, both
    /// taken from the same snapshot.
    #[instrument(skip(self, query), fields(resource = self.def.name))]
    pub async fn list_page(&self, query: &ListQuery) -> Result<ListPage, ServiceError> {
        let collection = {
            let _guard = self.lock.read().await;
            self.load().await?
        };
        let matched: Vec<Record> = collection.into_iter().filter(|r| query.matches(r)).collect();
        let total = matched.len();
        let records = match query.pagination {
            Some(p) => p.apply(matched),
            None => matched,
        };
        Ok(ListPage { records, total })
    }

    pub async fn count(&self, query: &ListQuery) -> Result<usize, ServiceError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.iter().filter(|r| query.matches(r)).count())
    }

    #[instrument(skip(self), fields(resource = self.def.name))]
    pub async fn get_by_id(&self, id: &RecordId) -> Result<Record, ServiceError> {
        let _guard = self.lock.read().await;
        self.load().await?.into_iter().find(|r| r.has_id(id)).ok_or_else(|| self.not_found(id))
    }

    /// First record whose `field` equals `value`.
    pub async fn find_one(&self, field: &str, value: &Value) -> Result<Option<Record>, ServiceError> {
        let _guard = self.lock.read().await;
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|r| r.get(field).map(|v| loosely_equal(v, value)).unwrap_or(false)))
    }

    /// Validate, assign a fresh id, append and persist.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::{task, RecordId};
    /// use service::resource::ResourceStore;
    /// use service::storage::MemoryStore;
    /// let store = ResourceStore::new(task::definition(), Arc::new(MemoryStore::new()));
    /// let input = serde_json::json!({"title": "study mongodb"}).as_object().cloned().unwrap();
    /// let task = tokio_test::block_on(store.create(input)).unwrap();
    /// assert_eq!(task.id(), Some(RecordId::Int(1)));
    /// assert_eq!(task.get("status"), Some(&serde_json::json!("Active")));
    /// ```
    #[instrument(skip(self, input), fields(resource = self.def.name))]
    pub async fn create(&self, input: Map<String, Value>) -> Result<Record, ServiceError> {
        let input = self.prepare(input)?;

        let _guard = self.lock.write().await;
        let mut collection = self.load().await?;
        self.check_unique(&input, collection.iter())?;

        let id = IdAllocator::for_records(self.def.id_strategy, &collection)
            .allocate()
            .ok_or(ServiceError::IdsExhausted(self.def.name))?;
        let mut record = Record::from(input);
        record.set_id(&id);
        collection.push(record.clone());
        self.persist(&collection).await?;

        info!(resource = self.def.name, %id, "record_created");
        Ok(record)
    }

    /// Shallow-merge `partial` over the record with `id` and persist.
    /// A missing record wins over an invalid input.
    #[instrument(skip(self, partial), fields(resource = self.def.name))]
    pub async fn update(&self, id: &RecordId, mut partial: Map<String, Value>) -> Result<Record, ServiceError> {
        self.def.spec.normalize(&mut partial);

        let _guard = self.lock.write().await;
        let mut collection = self.load().await?;
        let index = collection.iter().position(|r| r.has_id(id)).ok_or_else(|| self.not_found(id))?;

        validate_partial(&partial, &self.def.spec, id)?;
        self.check_unique(&partial, collection.iter().filter(|r| !r.has_id(id)))?;

        let record = &mut collection[index];
        record.merge(&partial);
        let updated = record.clone();
        self.persist(&collection).await?;

        info!(resource = self.def.name, %id, fields = partial.len(), "record_updated");
        Ok(updated)
    }

    /// Remove and return the record with `id`.
    #[instrument(skip(self), fields(resource = self.def.name))]
    pub async fn delete(&self, id: &RecordId) -> Result<Record, ServiceError> {
        let _guard = self.lock.write().await;
        let mut collection = self.load().await?;
        let index = collection.iter().position(|r| r.has_id(id)).ok_or_else(|| self.not_found(id))?;
        let removed = collection.remove(index);
        self.persist(&collection).await?;

        info!(resource = self.def.name, %id, "record_deleted");
        Ok(removed)
    }

    /// Apply `f` to the record with `id` under the write guard and persist
    /// the result. The record keeps its id whatever `f` does.
    pub async fn modify<F, E>(&self, id: &RecordId, f: F) -> Result<Record, E>
    where
        F: FnOnce(&mut Record) -> Result<(), E> + Send,
        E: From<ServiceError>,
    {
        let _guard = self.lock.write().await;
        let mut collection = self.load().await?;
        let index = collection.iter().position(|r| r.has_id(id)).ok_or_else(|| self.not_found(id))?;

        let mut record = collection[index].clone();
        f(&mut record)?;
        record.set_id(id);
        collection[index] = record.clone();
        self.persist(&collection).await?;

        info!(resource = self.def.name, %id, "record_modified");
        Ok(record)
    }

    /// Insert a batch: every input is validated before anything is written,
    /// then the whole batch is saved at once.
    #[instrument(skip(self, inputs), fields(resource = self.def.name, count = inputs.len()))]
    pub async fn insert_many(&self, inputs: Vec<Map<String, Value>>) -> Result<Vec<Record>, ServiceError> {
        let prepared = inputs.into_iter().map(|input| self.prepare(input)).collect::<Result<Vec<_>, _>>()?;

        let _guard = self.lock.write().await;
        let mut collection = self.load().await?;
        let mut allocator = IdAllocator::for_records(self.def.id_strategy, &collection);
        let mut created = Vec::with_capacity(prepared.len());
        for input in prepared {
            self.check_unique(&input, collection.iter())?;
            let mut record = Record::from(input);
            let id = allocator.allocate().ok_or(ServiceError::IdsExhausted(self.def.name))?;
            record.set_id(&id);
            collection.push(record.clone());
            created.push(record);
        }
        self.persist(&collection).await?;

        info!(resource = self.def.name, inserted = created.len(), "records_inserted");
        Ok(created)
    }

    /// Empty the collection; returns how many records were removed.
    #[instrument(skip(self), fields(resource = self.def.name))]
    pub async fn delete_all(&self) -> Result<usize, ServiceError> {
        let _guard = self.lock.write().await;
        let removed = self.load().await?.len();
        self.persist(&Collection::new()).await?;

        info!(resource = self.def.name, removed, "records_cleared");
        Ok(removed)
    }
}
