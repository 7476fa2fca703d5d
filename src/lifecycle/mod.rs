//! System lifecycle and orchestration.
//!
//! Individual actors are simple; wiring them together is where the
//! complexity lives. [`DispatchSystem`] is the conductor: it creates the
//! actors, injects their dependencies at `run()` time (late binding, so
//! construction never needs circular references), and coordinates graceful
//! shutdown by dropping the clients and awaiting the actor tasks.
//!
//! The drone actor starts with no dependencies; the order actor's context
//! carries a clone of the drone client plus the external collaborator
//! handles. The dependency graph is acyclic, so channel closure alone is a
//! sufficient shutdown signal.

pub mod dispatch_system;
pub mod tracing;

pub use dispatch_system::*;
pub use tracing::*;
