//! Type-keyed, lazily instantiating dependency store.
//!
//! Factories are registered under the [`DependencyKey`] of the type they provide.
//! The first lookup runs the factory; the produced instance is cached according to
//! the entry's [`CachePolicy`]. With the default weak policy the store never keeps an
//! instance alive on its own: once every caller drops its handle, the next lookup
//! runs the factory again.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// Stable identity of a dependency's declared type.
///
/// Keys compare by [`TypeId`], so a trait object type and a concrete type that
/// implements it are distinct keys.
#[derive(Clone, Copy)]
pub struct DependencyKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl DependencyKey {
    /// The key for type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Human readable name of the keyed type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for DependencyKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DependencyKey {}

impl Hash for DependencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DependencyKey").field(&self.type_name).finish()
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// How an entry holds on to the instance it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Cache weakly; the factory runs again once all handles are dropped.
    Weak,
    /// Cache strongly for as long as the entry is registered.
    Singleton,
    /// Resolve to an object owned elsewhere, never running a factory.
    Unowned,
}

enum Source<T: ?Sized> {
    Factory(Box<dyn Fn() -> Rc<T>>),
    Unowned(Weak<T>),
}

enum Cached<T: ?Sized> {
    Empty,
    Weak(Weak<T>),
    Strong(Rc<T>),
}

trait Slot {
    fn instance(&self) -> Option<Box<dyn Any>>;
    fn invalidate(&self);
    fn policy(&self) -> CachePolicy;
}

struct TypedSlot<T: ?Sized> {
    source: Source<T>,
    policy: CachePolicy,
    cached: RefCell<Cached<T>>,
}

impl<T: ?Sized + 'static> TypedSlot<T> {
    fn live(&self) -> Option<Rc<T>> {
        match &*self.cached.borrow() {
            Cached::Empty => None,
            Cached::Weak(weak) => weak.upgrade(),
            Cached::Strong(strong) => Some(strong.clone()),
        }
    }
}

impl<T: ?Sized + 'static> Slot for TypedSlot<T> {
    fn instance(&self) -> Option<Box<dyn Any>> {
        if let Some(live) = self.live() {
            return Some(Box::new(live));
        }

        let fresh = match &self.source {
            Source::Factory(factory) => factory(),
            Source::Unowned(target) => {
                return target.upgrade().map(|rc| Box::new(rc) as Box<dyn Any>)
            }
        };
        tracing::trace!(dependency = type_name::<T>(), "instantiated dependency");

        *self.cached.borrow_mut() = match self.policy {
            CachePolicy::Singleton => Cached::Strong(fresh.clone()),
            _ => Cached::Weak(Rc::downgrade(&fresh)),
        };
        Some(Box::new(fresh))
    }

    fn invalidate(&self) {
        *self.cached.borrow_mut() = Cached::Empty;
    }

    fn policy(&self) -> CachePolicy {
        self.policy
    }
}

/// A registered factory together with the key it provides.
///
/// Cloning an entry shares its cache.
#[derive(Clone)]
pub struct DependencyEntry {
    key: DependencyKey,
    slot: Rc<dyn Slot>,
}

impl DependencyEntry {
    /// Entry whose instance is cached weakly.
    pub fn new<T, F>(factory: F) -> Self
    where
        T: ?Sized + 'static,
        F: Fn() -> Rc<T> + 'static,
    {
        Self::with_source(Source::Factory(Box::new(factory)), CachePolicy::Weak)
    }

    /// Entry whose first instance lives as long as the entry does.
    pub fn singleton<T, F>(factory: F) -> Self
    where
        T: ?Sized + 'static,
        F: Fn() -> Rc<T> + 'static,
    {
        Self::with_source(Source::Factory(Box::new(factory)), CachePolicy::Singleton)
    }

    /// Entry resolving to an object owned elsewhere, absent once it is dropped.
    pub fn weak_ref<T: ?Sized + 'static>(target: Weak<T>) -> Self {
        Self::with_source(Source::Unowned(target), CachePolicy::Unowned)
    }

    fn with_source<T: ?Sized + 'static>(source: Source<T>, policy: CachePolicy) -> Self {
        Self {
            key: DependencyKey::of::<T>(),
            slot: Rc::new(TypedSlot {
                source,
                policy,
                cached: RefCell::new(Cached::Empty),
            }),
        }
    }

    /// The key this entry provides.
    pub fn key(&self) -> DependencyKey {
        self.key
    }

    /// How this entry caches its instance.
    pub fn cache_policy(&self) -> CachePolicy {
        self.slot.policy()
    }

    /// Produce (or reuse) the instance as `Rc<T>`.
    ///
    /// Returns `None` when `T` is not the entry's type or an unowned target is gone.
    pub fn resolve<T: ?Sized + 'static>(&self) -> Option<Rc<T>> {
        if DependencyKey::of::<T>() != self.key {
            return None;
        }
        self.slot
            .instance()?
            .downcast::<Rc<T>>()
            .ok()
            .map(|instance| *instance)
    }

    /// Drop any cached instance.
    pub fn invalidate(&self) {
        self.slot.invalidate();
    }
}

impl fmt::Debug for DependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyEntry")
            .field("key", &self.key)
            .field("policy", &self.slot.policy())
            .finish()
    }
}

/// Storage contract used by the router and by dependency initializers.
///
/// Implementations are single-threaded: all calls come from the thread that owns
/// the router.
pub trait Store {
    /// Store `entry` under its key, replacing any prior entry for that key.
    fn insert(&self, entry: DependencyEntry);

    /// The entry registered for `key`, if any.
    fn entry(&self, key: &DependencyKey) -> Option<DependencyEntry>;
}

/// Typed convenience methods for any [`Store`].
pub trait StoreExt: Store {
    /// Register a weakly cached factory for `T`.
    fn register<T, F>(&self, factory: F)
    where
        T: ?Sized + 'static,
        F: Fn() -> Rc<T> + 'static,
    {
        self.insert(DependencyEntry::new(factory));
    }

    /// Register a strongly cached factory for `T`.
    fn register_singleton<T, F>(&self, factory: F)
    where
        T: ?Sized + 'static,
        F: Fn() -> Rc<T> + 'static,
    {
        self.insert(DependencyEntry::singleton(factory));
    }

    /// Look up `T`, running its factory if no live instance is cached.
    ///
    /// Absence is not an error; callers decide whether it is fatal.
    fn get<T: ?Sized + 'static>(&self) -> Option<Rc<T>> {
        self.entry(&DependencyKey::of::<T>())?.resolve::<T>()
    }

    /// Check whether a factory is registered for `T`.
    fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.entry(&DependencyKey::of::<T>()).is_some()
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

/// Default [`Store`] implementation backed by a hash map.
///
/// # Example
///
/// ```rust
/// use router_service::{DependencyStore, StoreExt};
/// use std::rc::Rc;
///
/// trait Clock {
///     fn now(&self) -> u64;
/// }
///
/// struct Fixed;
///
/// impl Clock for Fixed {
///     fn now(&self) -> u64 {
///         42
///     }
/// }
///
/// let store = DependencyStore::new();
/// store.register::<dyn Clock, _>(|| Rc::new(Fixed));
///
/// let clock = store.get::<dyn Clock>().unwrap();
/// assert_eq!(clock.now(), 42);
/// ```
#[derive(Default)]
pub struct DependencyStore {
    entries: RefCell<HashMap<DependencyKey, DependencyEntry>>,
}

impl DependencyStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached instance for `key`; the next lookup runs the factory again.
    pub fn invalidate(&self, key: &DependencyKey) {
        if let Some(entry) = self.entry(key) {
            entry.invalidate();
        }
    }

    /// Remove the entry for `key`.
    pub fn remove(&self, key: &DependencyKey) -> Option<DependencyEntry> {
        self.entries.borrow_mut().remove(key)
    }

    /// Keys of all registered entries.
    pub fn keys(&self) -> Vec<DependencyKey> {
        self.entries.borrow().keys().copied().collect()
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Store for DependencyStore {
    fn insert(&self, entry: DependencyEntry) {
        let key = entry.key();
        let replaced = self.entries.borrow_mut().insert(key, entry).is_some();
        tracing::debug!(dependency = key.type_name(), replaced, "registered dependency");
    }

    fn entry(&self, key: &DependencyKey) -> Option<DependencyEntry> {
        self.entries.borrow().get(key).cloned()
    }
}

impl fmt::Debug for DependencyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyStore")
            .field("keys", &self.keys())
            .finish()
    }
}
