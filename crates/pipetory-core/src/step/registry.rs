//! Registro ordenado de steps.
//!
//! Conserva el orden de inserción: sobrescribir un nombre existente reemplaza
//! la entrada en su posición original.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::PipeError;
use crate::pipe::Pipe;

/// Función de un step ya normalizada a la forma falible.
pub type StepFn<D> = Arc<dyn Fn(D) -> Result<D, PipeError> + Send + Sync>;

/// What a step runs: a function or a nested pipe.
pub enum StepBody<D> {
    Func(StepFn<D>),
    Pipe(Box<Pipe<D>>),
}

pub struct StepEntry<D> {
    pub(crate) body: StepBody<D>,
    /// Params ligados en el registro (`Value::Null` si no hay).
    pub(crate) params: Value,
}

impl<D> StepEntry<D> {
    pub fn func(f: StepFn<D>, params: Value) -> Self {
        Self { body: StepBody::Func(f),
               params }
    }

    pub fn pipe(pipe: Pipe<D>) -> Self {
        Self { body: StepBody::Pipe(Box::new(pipe)),
               params: Value::Null }
    }

    pub fn body(&self) -> &StepBody<D> {
        &self.body
    }

    pub fn params(&self) -> &Value {
        &self.params
    }
}

impl<D> fmt::Debug for StepEntry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            StepBody::Func(_) => "fn".to_string(),
            StepBody::Pipe(p) => p.repr(),
        };
        f.debug_struct("StepEntry")
         .field("body", &body)
         .field("params", &self.params)
         .finish()
    }
}

#[derive(Debug)]
pub struct StepRegistry<D> {
    entries: IndexMap<String, StepEntry<D>>,
}

impl<D> Default for StepRegistry<D> {
    fn default() -> Self {
        Self { entries: IndexMap::new() }
    }
}

impl<D> StepRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces. Returns `true` when `name` was already registered.
    pub fn insert(&mut self, name: &str, entry: StepEntry<D>) -> bool {
        self.entries.insert(name.to_string(), entry).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&StepEntry<D>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.keys().last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StepEntry<D>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut StepEntry<D>)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: i32) -> StepEntry<i32> {
        StepEntry::func(Arc::new(move |x: i32| -> Result<i32, PipeError> { Ok(x + n) }), Value::Null)
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut r = StepRegistry::new();
        r.insert("b", entry(1));
        r.insert("a", entry(2));
        r.insert("c", entry(3));
        assert_eq!(r.names(), vec!["b", "a", "c"]);
        assert_eq!(r.last(), Some("c"));
    }

    #[test]
    fn overwrite_keeps_position_and_count() {
        let mut r = StepRegistry::new();
        assert!(!r.insert("a", entry(1)));
        assert!(!r.insert("b", entry(2)));
        assert!(r.insert("a", entry(10)));
        assert_eq!(r.names(), vec!["a", "b"]);
        assert_eq!(r.len(), 2);
        match r.get("a").map(StepEntry::body) {
            Some(StepBody::Func(f)) => assert_eq!(f(0), Ok(10)),
            _ => panic!("expected function entry"),
        }
    }
}
