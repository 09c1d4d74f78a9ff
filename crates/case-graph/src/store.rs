//! Arena storage for entities and the business-key uniqueness index.

use std::collections::HashMap;
use std::hash::Hash;

use shared_types::AppError;

/// Entities keyed by id, iterated in insertion order.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    items: HashMap<K, V>,
    order: Vec<K>,
}

impl<K: Copy + Eq + Hash, V> Arena<K, V> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert a new entity. Returns `false` (and leaves the arena unchanged)
    /// if the id is already taken.
    pub fn insert(&mut self, id: K, value: V) -> bool {
        if self.items.contains_key(&id) {
            return false;
        }
        self.items.insert(id, value);
        self.order.push(id);
        true
    }

    pub fn get(&self, id: &K) -> Option<&V> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &K) -> Option<&mut V> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.items.contains_key(id)
    }

    pub fn remove(&mut self, id: &K) -> Option<V> {
        let value = self.items.remove(id)?;
        self.order.retain(|k| k != id);
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn ids(&self) -> &[K] {
        &self.order
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }
}

/// Maps a normalized business key to the id that owns it.
#[derive(Debug, Clone)]
pub(crate) struct UniqueIndex<K> {
    label: &'static str,
    keys: HashMap<String, K>,
}

impl<K: Copy + Eq> UniqueIndex<K> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            keys: HashMap::new(),
        }
    }

    /// Business keys are compared after trimming surrounding whitespace.
    pub fn normalize(key: &str) -> String {
        key.trim().to_string()
    }

    pub fn lookup(&self, key: &str) -> Option<K> {
        self.keys.get(&Self::normalize(key)).copied()
    }

    /// Fail with `Conflict` if `key` belongs to an entity other than `owner`.
    pub fn check(&self, key: &str, owner: K) -> Result<(), AppError> {
        match self.lookup(key) {
            Some(existing) if existing != owner => Err(AppError::conflict(format!(
                "{} '{}' already exists",
                self.label,
                Self::normalize(key)
            ))),
            _ => Ok(()),
        }
    }

    pub fn claim(&mut self, key: &str, owner: K) -> Result<(), AppError> {
        self.check(key, owner)?;
        self.keys.insert(Self::normalize(key), owner);
        Ok(())
    }

    pub fn release(&mut self, key: &str) {
        self.keys.remove(&Self::normalize(key));
    }
}
