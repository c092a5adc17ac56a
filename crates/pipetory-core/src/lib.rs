//! pipetory-core: composición lineal de steps con nombre.
//!
//! Un `Pipe` registra funciones por nombre, las compila en una función
//! compuesta por step (`f_k ∘ … ∘ f_1`) y permite invocar el pipe completo o
//! cualquier resultado intermedio.
pub mod errors;
pub mod factory;
pub mod hashing;
pub mod pipe;
pub mod step;
pub mod types;

pub use errors::{PipeError, StepErrorKind};
pub use factory::factory;
pub use pipe::Pipe;
pub use step::{LockPolicy, LockTable, StepRegistry};
pub use types::{Arity, Dataset, IntoPipeKind, PipeKind};
