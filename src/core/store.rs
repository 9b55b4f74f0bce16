use crate::domain::Entity;
use crate::storage::FileGateway;
use crate::utils::error::{Result, RosterError};

/// In-memory collection of one entity type, backed by a single JSON document.
///
/// The collection is loaded once at `open` and owned exclusively for the
/// store's lifetime; every successful mutation synchronously rewrites the
/// whole document before returning. Insertion order is preserved everywhere.
pub struct Store<T: Entity> {
    collection: &'static str,
    gateway: FileGateway,
    items: Vec<T>,
}

impl<T: Entity> Store<T> {
    pub fn open(gateway: FileGateway, collection: &'static str) -> Result<Self> {
        let items: Vec<T> = gateway.load(collection)?;
        tracing::debug!(collection, count = items.len(), "store opened");
        Ok(Self {
            collection,
            gateway,
            items,
        })
    }

    fn persist(&self) -> Result<()> {
        self.gateway.save(self.collection, &self.items)
    }

    /// Appends a new entity. Fails on a duplicate natural key or on any
    /// validation error, in which case neither the collection nor the backing
    /// document changes.
    pub fn create(&mut self, entity: T) -> Result<T> {
        if self.get(entity.key()).is_some() {
            return Err(RosterError::Duplicate {
                kind: T::kind(),
                key: entity.key().to_string(),
            });
        }

        let errors = entity.validate();
        if !errors.is_empty() {
            return Err(RosterError::validation(T::kind(), errors));
        }

        let created = entity.clone();
        self.items.push(entity);
        self.persist()?;

        tracing::info!(collection = self.collection, key = created.key(), "created");
        Ok(created)
    }

    /// Linear scan by natural key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Snapshot copy of the collection in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.items.to_vec()
    }

    /// Overlays the patch onto the located entity. The new field values are
    /// staged on a copy and validated there; the live entity is only replaced
    /// once the staged result is valid, so a failed update is never
    /// observable.
    pub fn update(&mut self, key: &str, patch: T::Patch) -> Result<T> {
        let index = self
            .items
            .iter()
            .position(|item| item.key() == key)
            .ok_or_else(|| RosterError::NotFound {
                kind: T::kind(),
                key: key.to_string(),
            })?;

        let mut staged = self.items[index].clone();
        staged.apply(patch);

        let errors = staged.validate();
        if !errors.is_empty() {
            return Err(RosterError::validation(T::kind(), errors));
        }

        self.items[index] = staged.clone();
        self.persist()?;

        tracing::info!(collection = self.collection, key, "updated");
        Ok(staged)
    }

    /// Removes the entity if present; reports whether a removal occurred.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);

        if self.items.len() == before {
            return Ok(false);
        }

        self.persist()?;
        tracing::info!(collection = self.collection, key, "deleted");
        Ok(true)
    }

    /// Filters the live collection by the ANDed query criteria.
    pub fn search(&self, query: &T::Query) -> Vec<T> {
        self.items
            .iter()
            .filter(|item| item.matches(query))
            .cloned()
            .collect()
    }
}
