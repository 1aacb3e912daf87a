//! The preference store front.

use crate::error::PrefsResult;
use crate::key::{KeyDescriptor, PrefsKey};
use crate::listener::{EventListener, ListenerId};
use crate::storage::{MemoryStorage, PrefsStorage};
use crate::value::PrefValue;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};
use tracing::debug;

/// Typed preference store with change notification.
///
/// Values are serialized to JSON once on `put`; the same JSON value is
/// persisted, cached (for cacheable keys) and handed to listeners.
///
/// Mutations are serialized: each `put`/`remove` persists, updates the
/// cache and notifies every listener before the next one starts, so the
/// cache and listeners observe writes in the order storage applied them.
/// Listeners may read the store but must not mutate it from a callback.
pub struct Prefs {
    storage: Arc<dyn PrefsStorage>,
    /// In-memory copies of cacheable keys.
    cache: RwLock<HashMap<String, Value>>,
    /// Registered listeners, in registration order.
    listeners: RwLock<Vec<(ListenerId, Arc<dyn EventListener>)>>,
    /// Held for the whole of a put/remove.
    mutation: Mutex<()>,
}

impl Prefs {
    /// Creates a store over the given backend.
    pub fn new(storage: Arc<dyn PrefsStorage>) -> Self {
        Self {
            storage,
            cache: RwLock::new(HashMap::new()),
            listeners: RwLock::new(Vec::new()),
            mutation: Mutex::new(()),
        }
    }

    /// Creates a store backed by [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &Arc<dyn PrefsStorage> {
        &self.storage
    }

    /// Writes `value` under `key` and notifies listeners.
    ///
    /// If serialization or storage fails the error is returned and no
    /// listener is notified. Values whose JSON form does not read back as
    /// `T` (for example non-finite floats, which serialize to `null`) are
    /// rejected with [`PrefsError::Serialization`](crate::PrefsError::Serialization).
    pub fn put<T: PrefValue>(&self, key: &PrefsKey<T>, value: &T) -> PrefsResult<()> {
        let json = serde_json::to_value(value)?;
        serde_json::from_value::<T>(json.clone())?;

        let _mutation = self.lock_mutation();
        self.storage.put(key.name(), &json)?;

        let descriptor = key.descriptor();
        if descriptor.is_cacheable() {
            self.cache_write().insert(descriptor.name().to_string(), json.clone());
        }
        debug!("Put preference {}", descriptor);

        for listener in self.snapshot_listeners() {
            listener.on_put(descriptor, &json);
        }
        Ok(())
    }

    /// Reads the value stored under `key`.
    pub fn get<T: PrefValue>(&self, key: &PrefsKey<T>) -> PrefsResult<Option<T>> {
        let descriptor = key.descriptor();
        if descriptor.is_cacheable() {
            let cached = self.cache_read().get(descriptor.name()).cloned();
            if let Some(json) = cached {
                return Ok(Some(serde_json::from_value(json)?));
            }
        }

        let Some(json) = self.load(descriptor)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(json)?))
    }

    /// Reads the value stored under `key`, or `default` if none is stored.
    pub fn get_or<T: PrefValue>(&self, key: &PrefsKey<T>, default: T) -> PrefsResult<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains<T>(&self, key: &PrefsKey<T>) -> PrefsResult<bool> {
        if key.descriptor().is_cacheable() && self.cache_read().contains_key(key.name()) {
            return Ok(true);
        }
        self.storage.contains(key.name())
    }

    /// Removes the value stored under `key` and notifies listeners.
    ///
    /// Listeners are notified even if nothing was stored.
    pub fn remove<T>(&self, key: &PrefsKey<T>) -> PrefsResult<()> {
        let descriptor = key.descriptor();
        let _mutation = self.lock_mutation();
        self.storage.remove(descriptor.name())?;
        self.cache_write().remove(descriptor.name());
        debug!("Removed preference {}", descriptor);

        for listener in self.snapshot_listeners() {
            listener.on_remove(descriptor);
        }
        Ok(())
    }

    /// Drops every cached value. Subsequent reads go to storage.
    pub fn clear_cache(&self) {
        self.cache_write().clear();
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) -> ListenerId {
        let id = ListenerId::new();
        self.listeners_write().push((id, listener));
        debug!("Registered preference listener {}", id);
        id
    }

    /// Unregisters a listener. Returns false if `id` was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners_write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        let removed = listeners.len() != before;
        if removed {
            debug!("Unregistered preference listener {}", id);
        }
        removed
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // Reads storage, filling the cache for cacheable keys. The cache is only
    // filled while holding the mutation lock so a stale read cannot overwrite
    // a concurrent put/remove; when a mutation is in flight (possibly the
    // caller's own, from a listener) the value is returned uncached.
    fn load(&self, descriptor: &KeyDescriptor) -> PrefsResult<Option<Value>> {
        if !descriptor.is_cacheable() {
            return self.storage.get(descriptor.name());
        }
        let _mutation = match self.mutation.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return self.storage.get(descriptor.name()),
        };
        let json = self.storage.get(descriptor.name())?;
        if let Some(json) = &json {
            self.cache_write().insert(descriptor.name().to_string(), json.clone());
        }
        Ok(json)
    }

    fn lock_mutation(&self) -> MutexGuard<'_, ()> {
        self.mutation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Listeners are called outside the lock so they can (un)register listeners.
    fn snapshot_listeners(&self) -> Vec<Arc<dyn EventListener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    fn listeners_write(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, Vec<(ListenerId, Arc<dyn EventListener>)>> {
        self.listeners.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Value>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Value>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Prefs {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for Prefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefs")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
