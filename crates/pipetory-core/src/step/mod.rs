//! Steps de un pipe.
//!
//! - `StepRegistry`: nombre -> función (o pipe anidado), en orden de registro.
//! - `LockTable` y `LockPolicy`: bloqueo por step consultado en `compile`.

pub mod lock;
pub mod registry;

pub use lock::{LockPolicy, LockTable};
pub use registry::{StepBody, StepEntry, StepFn, StepRegistry};
