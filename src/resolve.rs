//! Contracts, services and the conformance rules used to validate and wire bindings
//!
//! The container combines a type map keyed by [TypeId] with a small amount of per-type
//! metadata collected at registration time, so that no runtime reflection is needed.
//!
//! * A [Contract] identifies the type used as a lookup key, usually a trait object such as
//!   `dyn Storage`. Contracts are compared by type identity only.
//! * The [Service] trait is implemented by every concrete implementation. It provides the
//!   zero-argument construction path, the contracts the type conforms to and the dependency
//!   slots that should be filled by the container.
//! * [Conformance] lists the contracts declared by a service together with the coercion from
//!   the concrete type to each contract.
//! * [Implementation] erases a service type into a descriptor that can be stored in a binding.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

use crate::inject::DependencySlot;

/// Error returned by a failing service constructor
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared service instance with its concrete type erased
pub(crate) type AnyService = Arc<dyn Any + Send + Sync>;

/// An `Arc<C>` view of a service instance through the contract `C`, with `C` erased
pub(crate) type AnyView = Box<dyn Any + Send + Sync>;

type Cast = Box<dyn Fn(AnyService) -> Option<AnyView> + Send + Sync>;

/// Identity of a type used as lookup key.
///
/// Two contracts are equal if and only if they describe the same type: the type name is only
/// kept for diagnostics, so that unrelated types sharing a short name never match.
#[derive(Clone, Copy)]
pub struct Contract {
    id: TypeId,
    name: &'static str,
}

impl Contract {
    /// Contract describing the type `C`, typically a trait object.
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Full type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Contract {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Contract {}

impl Hash for Contract {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contract({})", self.name)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A concrete type that can be instantiated and wired by the container.
///
/// Most services implement [Default] and can use the [service](crate::service) macro instead
/// of implementing this trait by hand.
pub trait Service: Any + Send + Sync + Sized {
    /// Zero-argument construction path, called once per built context.
    fn create() -> Result<Self, BoxError>;

    /// Contracts implemented by this type.
    fn conformance() -> Conformance<Self>;

    /// Dependency slots that the container should fill after instantiation.
    ///
    /// Fields which are not listed here are never touched by the container.
    fn slots(&self) -> Vec<&dyn DependencySlot> {
        Vec::new()
    }
}

/// Contracts declared by the service type `T`
pub struct Conformance<T> {
    casts: Vec<(Contract, Cast)>,
    _service: PhantomData<fn() -> T>,
}

impl<T: Service> Conformance<T> {
    pub fn new() -> Self {
        Self {
            casts: Vec::new(),
            _service: PhantomData,
        }
    }

    /// Declare that `T` conforms to the contract `C`.
    ///
    /// The coercion is usually the identity closure `|this| this` with an explicit return type,
    /// letting the compiler check that `T` actually implements the trait behind `C`.
    pub fn with<C, F>(mut self, cast: F) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<C> + Send + Sync + 'static,
    {
        let erased: Cast = Box::new(move |instance: AnyService| {
            let concrete = instance.downcast::<T>().ok()?;
            Some(Box::new(cast(concrete)) as AnyView)
        });
        self.casts.push((Contract::of::<C>(), erased));
        self
    }

    pub fn declares(&self, contract: &Contract) -> bool {
        self.casts.iter().any(|(c, _)| c == contract)
    }
}

impl<T: Service> Default for Conformance<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased description of a service type.
pub struct Implementation {
    id: TypeId,
    name: &'static str,
    construct: fn() -> Result<AnyService, BoxError>,
    identity: fn(AnyService) -> Option<AnyView>,
    slot_accessor: fn(&(dyn Any + Send + Sync)) -> Vec<&dyn DependencySlot>,
    casts: Vec<(Contract, Cast)>,
}

impl Implementation {
    /// Describe the service type `T`.
    pub fn of<T: Service>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            construct: construct::<T>,
            identity: identity::<T>,
            slot_accessor: slots_of::<T>,
            casts: T::conformance().casts,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this implementation declares conformance to a contract.
    pub fn conforms_to(&self, contract: &Contract) -> bool {
        self.casts.iter().any(|(c, _)| c == contract)
    }

    /// Declared contracts, in declaration order.
    pub fn contracts(&self) -> impl Iterator<Item = Contract> + '_ {
        self.casts.iter().map(|(c, _)| *c)
    }

    pub(crate) fn instantiate(&self) -> Result<AnyService, BoxError> {
        (self.construct)()
    }

    /// View an instance of this implementation through a contract.
    ///
    /// The concrete type itself always matches, other contracts must be declared.
    pub(crate) fn view(&self, instance: &AnyService, contract: &Contract) -> Option<AnyView> {
        if contract.type_id() == self.id {
            return (self.identity)(instance.clone());
        }
        let (_, cast) = self.casts.iter().find(|(c, _)| c == contract)?;
        cast(instance.clone())
    }

    pub(crate) fn slots<'a>(
        &self,
        instance: &'a (dyn Any + Send + Sync),
    ) -> Vec<&'a dyn DependencySlot> {
        (self.slot_accessor)(instance)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("name", &self.name)
            .field("contracts", &self.contracts().collect::<Vec<_>>())
            .finish()
    }
}

fn construct<T: Service>() -> Result<AnyService, BoxError> {
    let instance: AnyService = Arc::new(T::create()?);
    Ok(instance)
}

fn identity<T: Service>(instance: AnyService) -> Option<AnyView> {
    let concrete = instance.downcast::<T>().ok()?;
    Some(Box::new(concrete) as AnyView)
}

fn slots_of<T: Service>(instance: &(dyn Any + Send + Sync)) -> Vec<&dyn DependencySlot> {
    instance
        .downcast_ref::<T>()
        .map(|service| service.slots())
        .unwrap_or_default()
}

/// Errors triggered while registering bindings or building a context
#[derive(Error, Debug)]
pub enum WiringError {
    #[error("`{implementation}` does not conform to contract `{contract}`")]
    InvalidArgument {
        contract: &'static str,
        implementation: &'static str,
    },
    #[error("contract `{contract}` is already bound")]
    DuplicateBinding { contract: &'static str },
    #[error("could not instantiate `{implementation}`")]
    InstantiationFailure {
        implementation: &'static str,
        #[source]
        source: BoxError,
    },
}
