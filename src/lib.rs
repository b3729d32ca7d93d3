//! Minimal dependency injection container with field injection.
//!
//! # Simple use case
//!
//! ```
//! # use std::sync::Arc;
//! # use wirebox::*;
//! // Define traits and implementors
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! trait Names: Send + Sync {
//!     fn name(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct World;
//!
//! impl Names for World {
//!     fn name(&self) -> String {
//!         "world".into()
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Hello {
//!     names: Inject<dyn Names>,
//! }
//!
//! impl Greeter for Hello {
//!     fn greet(&self) -> String {
//!         let name = self.names.get().map(|n| n.name()).unwrap_or_default();
//!         format!("hello {name}")
//!     }
//! }
//!
//! // Declare the contracts of each implementor and its injectable fields
//! service!(World => dyn Names);
//! service!(Hello => dyn Greeter; inject names);
//!
//! # fn main() -> Result<(), WiringError> {
//! // Register bindings in any order, then build the context
//! let context = ContainerBuilder::new()
//!     .bind::<dyn Greeter, Hello>()?
//!     .bind::<dyn Names, World>()?
//!     .build()?;
//!
//! let greeter: Arc<dyn Greeter> = context.get_service().expect("greeter is bound");
//! assert_eq!(greeter.greet(), "hello world");
//! # Ok(())
//! # }
//! ```
//!
//! # Mechanism
//!
//! The container combines a type map based on the ```Any``` trait with conformance
//! information declared by each implementation, so that no runtime reflection is needed.
//!
//! * The ```Service``` trait provides the zero-argument constructor of an implementation,
//!   the contracts (usually trait objects) it conforms to, and its dependency slots.
//! * The ```ContainerBuilder``` collects bindings between a contract and an implementation.
//!   Each binding is validated when it is added: a contract can only be bound once,
//!   and the implementation must declare conformance to it.
//! * The ```Context``` is created by the builder. It first creates one instance for each binding,
//!   then fills the ```Inject``` slots of all instances with the first compatible instance.
//!   Slots without a compatible instance stay empty.

mod builder;
mod config;
mod context;
mod helpers;
mod inject;
mod resolve;

pub use builder::{Binding, ContainerBuilder};
pub use config::ContainerConfig;
pub use context::Context;
pub use inject::{DependencySlot, Inject};
pub use resolve::{BoxError, Conformance, Contract, Implementation, Service, WiringError};
