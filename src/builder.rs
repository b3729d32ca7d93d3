use std::sync::Arc;

use tracing::{debug, warn};

use crate::*;

/// A contract associated to the implementation that will provide it
#[derive(Debug, Clone)]
pub struct Binding {
    contract: Contract,
    implementation: Arc<Implementation>,
}

impl Binding {
    pub fn contract(&self) -> Contract {
        self.contract
    }

    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    pub(crate) fn shared_implementation(&self) -> &Arc<Implementation> {
        &self.implementation
    }
}

/// Collect bindings and build [Context]s from them.
///
/// Registration validates each binding immediately. [ContainerBuilder::build] only takes a
/// snapshot of the current bindings: the builder can keep accepting bindings and build other,
/// fully independent contexts.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    bindings: Vec<Binding>,
    config: ContainerConfig,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Bind a contract to the implementation providing it.
    ///
    /// Return an error if the contract is already bound in this builder,
    /// or if the implementation does not declare conformance to the contract.
    pub fn add_binding(
        &mut self,
        contract: Contract,
        implementation: Implementation,
    ) -> Result<&mut Self, WiringError> {
        if self.bindings.iter().any(|b| b.contract == contract) {
            warn!(%contract, implementation = implementation.name(), "contract already bound");
            return Err(WiringError::DuplicateBinding {
                contract: contract.name(),
            });
        }
        if !implementation.conforms_to(&contract) {
            warn!(%contract, implementation = implementation.name(), "implementation does not conform");
            return Err(WiringError::InvalidArgument {
                contract: contract.name(),
                implementation: implementation.name(),
            });
        }

        debug!(%contract, implementation = implementation.name(), "binding registered");
        self.bindings.push(Binding {
            contract,
            implementation: Arc::new(implementation),
        });
        Ok(self)
    }

    /// Bind the contract `C` to the service type `T`.
    pub fn bind<C: ?Sized + 'static, T: Service>(&mut self) -> Result<&mut Self, WiringError> {
        self.add_binding(Contract::of::<C>(), Implementation::of::<T>())
    }

    pub fn is_bound<C: ?Sized + 'static>(&self) -> bool {
        let contract = Contract::of::<C>();
        self.bindings.iter().any(|b| b.contract == contract)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Instantiate and wire all bound implementations.
    ///
    /// Fails if any implementation could not be instantiated, in which case no context is produced.
    pub fn build(&self) -> Result<Context, WiringError> {
        Context::from_bindings(&self.bindings, self.config.clone())
    }
}
