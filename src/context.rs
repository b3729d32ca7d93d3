//! Resolution context: owns one instance per binding and serves lookups.
//!
//! A context is built in two passes over the bindings, in registration order:
//!
//! 1. every implementation is instantiated, and the instance is viewed through its bound contract,
//! 2. every dependency slot of every instance is filled with the first compatible instance.
//!
//! Since all instances exist before any slot is filled, the registration order of a service and
//! its dependencies does not matter.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::resolve::{AnyService, AnyView};
use crate::*;

struct Entry {
    contract: Contract,
    implementation: Arc<Implementation>,
    instance: AnyService,
    /// The instance as an `Arc<C>` for the bound contract `C`
    view: AnyView,
}

/// Instantiated and wired services, indexed by contract.
///
/// A context never changes after construction and each lookup returns the same instance.
pub struct Context {
    entries: Vec<Entry>,
    index: HashMap<TypeId, usize>,
    config: ContainerConfig,
}

impl Context {
    pub(crate) fn from_bindings(
        bindings: &[Binding],
        config: ContainerConfig,
    ) -> Result<Self, WiringError> {
        debug!(bindings = bindings.len(), "building context");

        let entries = bindings
            .iter()
            .map(instantiate)
            .collect::<Result<Vec<_>, _>>()?;
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.contract.type_id(), position))
            .collect();

        let context = Self {
            entries,
            index,
            config,
        };
        let wired = context.inject_all();
        debug!(services = context.len(), wired, "context ready");
        Ok(context)
    }

    /// Fill the dependency slots of all instances, return the number of wired slots.
    fn inject_all(&self) -> usize {
        let mut wired = 0;
        for (position, entry) in self.entries.iter().enumerate() {
            let excluded = if self.config.self_injection {
                None
            } else {
                Some(position)
            };

            for slot in entry.implementation.slots(entry.instance.as_ref()) {
                let contract = slot.contract();
                let Some((source, view)) = self.find_view(&contract, excluded) else {
                    if self.config.warn_unresolved {
                        warn!(service = entry.implementation.name(), slot = %contract, "unresolved dependency");
                    } else {
                        debug!(service = entry.implementation.name(), slot = %contract, "unresolved dependency");
                    }
                    continue;
                };

                if slot.wire(view) {
                    wired += 1;
                    debug!(
                        service = entry.implementation.name(),
                        slot = %contract,
                        provider = self.entries[source].implementation.name(),
                        "dependency wired"
                    );
                } else {
                    trace!(service = entry.implementation.name(), slot = %contract, "slot already filled");
                }
            }
        }
        wired
    }

    /// Find the first instance compatible with a contract, in registration order
    fn find_view(&self, contract: &Contract, excluded: Option<usize>) -> Option<(usize, AnyView)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(position, _)| Some(*position) != excluded)
            .find_map(|(position, entry)| {
                entry
                    .implementation
                    .view(&entry.instance, contract)
                    .map(|view| (position, view))
            })
    }

    /// Retrieve the instance bound to the contract `C`.
    ///
    /// Return `None` if `C` is not bound in this context.
    pub fn get_service<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        let position = self.index.get(&TypeId::of::<C>())?;
        let entry = self.entries.get(*position)?;
        entry.view.downcast_ref::<Arc<C>>().cloned()
    }

    /// Retrieve the first instance which can be used as `C`, even if `C` is not bound.
    ///
    /// This uses the same matching rules as dependency slots: `C` can be a concrete service type
    /// or any contract declared by a service.
    pub fn resolve<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        let (_, view) = self.find_view(&Contract::of::<C>(), None)?;
        view.downcast::<Arc<C>>().ok().map(|instance| *instance)
    }

    pub fn contains<C: ?Sized + 'static>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<C>())
    }

    /// Bound contracts, in registration order.
    pub fn contracts(&self) -> impl Iterator<Item = Contract> + '_ {
        self.entries.iter().map(|entry| entry.contract)
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|entry| (entry.contract, entry.implementation.name())),
            )
            .finish()
    }
}

fn instantiate(binding: &Binding) -> Result<Entry, WiringError> {
    let contract = binding.contract();
    let implementation = binding.shared_implementation().clone();

    trace!(%contract, implementation = implementation.name(), "instantiating");
    let instance = implementation.instantiate().map_err(|source| {
        warn!(%contract, implementation = implementation.name(), error = %source, "instantiation failed");
        WiringError::InstantiationFailure {
            implementation: implementation.name(),
            source,
        }
    })?;

    // Conformance was checked at registration
    let view = implementation
        .view(&instance, &contract)
        .ok_or(WiringError::InvalidArgument {
            contract: contract.name(),
            implementation: implementation.name(),
        })?;

    Ok(Entry {
        contract,
        implementation,
        instance,
        view,
    })
}
