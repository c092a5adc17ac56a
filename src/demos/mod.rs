//! Escenarios de referencia construidos sobre `pipetory_core`.
//!
//! - `numeric`: matriz con `square` y `weighted_log`.
//! - `table`: registros tabulares (tipos, fechas, nombres).
//! - `split_merge`: splitter + merger anidados en un sequencer.

pub mod numeric;
pub mod split_merge;
pub mod table;
