use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::Contract;

/// A field that the container can fill after its owner has been instantiated.
///
/// Implemented by [Inject]. The container only looks at slots returned by
/// [Service::slots](crate::Service::slots).
pub trait DependencySlot: Send + Sync {
    /// Type that this slot accepts.
    fn contract(&self) -> Contract;

    fn is_wired(&self) -> bool;

    /// Store a value in this slot.
    ///
    /// The value must be a boxed `Arc<C>` matching the contract of the slot.
    /// Return false if the value has the wrong type or if the slot was already filled.
    fn wire(&self, value: Box<dyn Any + Send + Sync>) -> bool;
}

/// Write-once dependency slot holding a shared instance of `C`.
///
/// `C` is usually a trait object (`Inject<dyn Storage>`) but concrete service types are also
/// accepted. The slot stays empty if the context has no compatible instance.
pub struct Inject<C: ?Sized> {
    cell: OnceCell<Arc<C>>,
}

impl<C: ?Sized> Inject<C> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The injected instance, if any.
    pub fn get(&self) -> Option<&Arc<C>> {
        self.cell.get()
    }

    pub fn cloned(&self) -> Option<Arc<C>> {
        self.cell.get().cloned()
    }

    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<C: ?Sized> Default for Inject<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for Inject<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("contract", &type_name::<C>())
            .field("wired", &self.is_set())
            .finish()
    }
}

impl<C: ?Sized + Send + Sync + 'static> DependencySlot for Inject<C> {
    fn contract(&self) -> Contract {
        Contract::of::<C>()
    }

    fn is_wired(&self) -> bool {
        self.is_set()
    }

    fn wire(&self, value: Box<dyn Any + Send + Sync>) -> bool {
        match value.downcast::<Arc<C>>() {
            Ok(instance) => self.cell.set(*instance).is_ok(),
            Err(_) => false,
        }
    }
}
