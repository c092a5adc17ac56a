//! `Pipe`: registro + tabla de bloqueos + compilador detrás de una sola API.
//!
//! Las variantes Sequencer / Merger / Splitter son el mismo motor con una
//! etiqueta `PipeKind` distinta. Uso típico:
//!
//! ```
//! use pipetory_core::Pipe;
//!
//! let mut pipe = Pipe::sequencer("numbers");
//! pipe.register(|x: f64| x * x, "square")
//!     .register_with(|x: f64, w: &f64| w * x.ln(), "weighted_log", 0.5)
//!     .compile();
//!
//! assert_eq!(pipe.call(3.0, Some("square")).unwrap(), 9.0);
//! assert_eq!(pipe.run(1.0).unwrap(), 0.0);
//! ```

mod compiler;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::PipeError;
use crate::hashing::hash_value;
use crate::step::{LockPolicy, LockTable, StepBody, StepEntry, StepFn, StepRegistry};
use crate::types::PipeKind;

/// Resultado de la última compilación.
struct Compiled<D> {
    funcs: IndexMap<String, StepFn<D>>,
    definition_hash: String,
}

pub struct Pipe<D> {
    name: String,
    kind: PipeKind,
    registry: StepRegistry<D>,
    locks: LockTable,
    policy: LockPolicy,
    /// `None` hasta el primer `compile` y tras cualquier registro posterior.
    compiled: Option<Compiled<D>>,
}

impl<D> Pipe<D> {
    pub fn new(kind: PipeKind, name: impl Into<String>) -> Self {
        Self { name: name.into(),
               kind,
               registry: StepRegistry::new(),
               locks: LockTable::new(),
               policy: LockPolicy::default(),
               compiled: None }
    }

    pub fn sequencer(name: impl Into<String>) -> Self {
        Self::new(PipeKind::Sequential, name)
    }

    pub fn merger(name: impl Into<String>) -> Self {
        Self::new(PipeKind::Merger, name)
    }

    pub fn splitter(name: impl Into<String>) -> Self {
        Self::new(PipeKind::Splitter, name)
    }

    pub fn with_lock_policy(mut self, policy: LockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Takes effect on the next `compile`.
    pub fn set_lock_policy(&mut self, policy: LockPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PipeKind {
        self.kind
    }

    pub fn lock_policy(&self) -> LockPolicy {
        self.policy
    }

    /// `Sequencer(name=...)`, `Merger(name=...)` o `Splitter(name=...)`.
    pub fn repr(&self) -> String {
        format!("{}(name={})", self.kind.variant_name(), self.name)
    }

    // ----------------------------------------------------------------
    // Registro
    // ----------------------------------------------------------------

    /// Step names in registration order.
    pub fn steps(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains_step(&self, step: &str) -> bool {
        self.registry.contains(step)
    }

    /// Params bound to `step` at registration, `Value::Null` when none.
    pub fn params(&self, step: &str) -> Option<&Value> {
        self.registry.get(step).map(StepEntry::params)
    }

    /// Nested pipe registered under `step`, if that step holds one.
    pub fn step_pipe(&self, step: &str) -> Option<&Pipe<D>> {
        match self.registry.get(step).map(StepEntry::body) {
            Some(StepBody::Pipe(p)) => Some(p),
            _ => None,
        }
    }

    fn insert_entry(&mut self, step: &str, entry: StepEntry<D>) -> &mut Self {
        if self.registry.insert(step, entry) {
            warn!("register:overwrite pipe={} step={step}", self.name);
        } else {
            debug!("register pipe={} step={step} position={}", self.name, self.registry.len() - 1);
        }
        self.locks.track(step);
        if self.compiled.take().is_some() {
            debug!("register:invalidate pipe={} step={step}", self.name);
        }
        self
    }

    // ----------------------------------------------------------------
    // Bloqueos
    // ----------------------------------------------------------------

    pub fn lock(&mut self, step: &str) -> Result<&mut Self, PipeError> {
        self.locks.lock(step, &self.name)?;
        Ok(self)
    }

    pub fn unlock(&mut self, step: &str) -> Result<&mut Self, PipeError> {
        self.locks.unlock(step, &self.name)?;
        Ok(self)
    }

    pub fn lock_all(&mut self) -> &mut Self {
        self.locks.lock_all();
        self
    }

    pub fn unlock_all(&mut self) -> &mut Self {
        self.locks.unlock_all();
        self
    }

    pub fn is_locked(&self, step: &str) -> Result<bool, PipeError> {
        self.locks.is_locked(step, &self.name)
    }

    pub fn locked_steps(&self) -> Vec<&str> {
        self.locks.locked_steps()
    }

    // ----------------------------------------------------------------
    // Diagnóstico
    // ----------------------------------------------------------------

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Hash of the definition captured by the last `compile`.
    pub fn compiled_hash(&self) -> Option<&str> {
        self.compiled.as_ref().map(|c| c.definition_hash.as_str())
    }

    /// Hash (blake3, hex) of name, kind, step order and bound params.
    /// Function bodies cannot be hashed: re-registering a step with a
    /// different function and the same params keeps the hash.
    pub fn definition_hash(&self) -> String {
        hash_value(&self.definition_json(false))
    }

    /// JSON description of the pipe including lock state, for logs.
    pub fn describe(&self) -> Value {
        self.definition_json(true)
    }

    fn definition_json(&self, with_state: bool) -> Value {
        let steps: Vec<Value> = self.registry
                                    .iter()
                                    .map(|(name, entry)| {
                                        let mut v = match entry.body() {
                                            StepBody::Func(_) => json!({ "name": name, "params": entry.params() }),
                                            StepBody::Pipe(p) => json!({ "name": name, "pipe": p.definition_json(with_state) }),
                                        };
                                        if with_state {
                                            v["locked"] = json!(self.locks.locked(name));
                                        }
                                        v
                                    })
                                    .collect();
        let mut out = json!({ "name": self.name, "kind": self.kind, "steps": steps });
        if with_state {
            out["lock_policy"] = json!(self.policy);
            out["compiled"] = json!(self.is_compiled());
        }
        out
    }
}

impl<D: 'static> Pipe<D> {
    /// Registers `func` under `step`. An existing step is overwritten in place
    /// (same position) and a warning is logged.
    pub fn register<F>(&mut self, func: F, step: &str) -> &mut Self
        where F: Fn(D) -> D + Send + Sync + 'static
    {
        let f: StepFn<D> = Arc::new(move |data: D| -> Result<D, PipeError> { Ok(func(data)) });
        self.insert_entry(step, StepEntry::func(f, Value::Null))
    }

    /// Registers `func` with `params` bound: every invocation receives
    /// `&params` after the data.
    ///
    /// `params` must be `Serialize` so it can be recorded in `params` and the
    /// definition hash. Values that cannot be serialized are bound by
    /// capturing them in a closure passed to `register`.
    pub fn register_with<F, P>(&mut self, func: F, step: &str, params: P) -> &mut Self
        where F: Fn(D, &P) -> D + Send + Sync + 'static,
              P: Serialize + Send + Sync + 'static
    {
        let recorded = serde_json::to_value(&params).unwrap_or_else(|e| {
                                                         warn!("register:params pipe={} step={step} err={e}", self.name);
                                                         Value::Null
                                                     });
        let f: StepFn<D> = Arc::new(move |data: D| -> Result<D, PipeError> { Ok(func(data, &params)) });
        self.insert_entry(step, StepEntry::func(f, recorded))
    }

    /// Registers a function that may fail. Its error is reported as
    /// `PipeError::StepFailed` and stops the composition.
    pub fn register_fallible<F, E>(&mut self, func: F, step: &str) -> &mut Self
        where F: Fn(D) -> Result<D, E> + Send + Sync + 'static,
              E: fmt::Display
    {
        let step_name = step.to_string();
        let pipeline = self.name.clone();
        let f: StepFn<D> = Arc::new(move |data: D| -> Result<D, PipeError> {
            func(data).map_err(|e| PipeError::StepFailed { step: step_name.clone(),
                                                            pipeline: pipeline.clone(),
                                                            message: e.to_string() })
        });
        self.insert_entry(step, StepEntry::func(f, Value::Null))
    }

    /// Registers a nested pipe. It is compiled together with this pipe and
    /// acts as its last-step composition.
    pub fn register_pipe(&mut self, pipe: Pipe<D>, step: &str) -> &mut Self {
        self.insert_entry(step, StepEntry::pipe(pipe))
    }

    /// Decorator form of `register`: the returned closure registers the
    /// function it receives and hands it back unchanged.
    ///
    /// ```
    /// use pipetory_core::Pipe;
    ///
    /// let mut pipe = Pipe::sequencer("p");
    /// let double = pipe.observe("double")(|x: i32| x * 2);
    /// assert_eq!(double(4), 8);
    /// pipe.compile();
    /// assert_eq!(pipe.run(4).unwrap(), 8);
    /// ```
    pub fn observe<F>(&mut self, step: &str) -> impl FnOnce(F) -> F + '_
        where F: Fn(D) -> D + Clone + Send + Sync + 'static
    {
        let step = step.to_string();
        move |func: F| {
            self.register(func.clone(), &step);
            func
        }
    }

    /// Decorator form of `register_with`.
    pub fn observe_with<F, P>(&mut self, step: &str, params: P) -> impl FnOnce(F) -> F + '_
        where F: Fn(D, &P) -> D + Clone + Send + Sync + 'static,
              P: Serialize + Send + Sync + 'static
    {
        let step = step.to_string();
        move |func: F| {
            self.register_with(func.clone(), &step, params);
            func
        }
    }

    // ----------------------------------------------------------------
    // Compilación y ejecución
    // ----------------------------------------------------------------

    /// Rebuilds the composed function of every step. Nested pipes are
    /// compiled first. Lock flags are read now, according to the lock policy.
    pub fn compile(&mut self) -> &mut Self {
        debug!("compile:start pipe={} steps={} policy={:?}", self.name, self.registry.len(), self.policy);
        let funcs = compiler::compile_steps(&self.name, &mut self.registry, &self.locks, self.policy);
        let definition_hash = self.definition_hash();
        debug!("compile:done pipe={} compiled={} hash={definition_hash}", self.name, funcs.len());
        self.compiled = Some(Compiled { funcs,
                                        definition_hash });
        self
    }

    /// Runs the composition up to `step` (the last registered step when
    /// `None`) on `data`.
    pub fn call(&self, data: D, step: Option<&str>) -> Result<D, PipeError> {
        let step = match step {
            Some(s) => s,
            None => self.registry
                        .last()
                        .ok_or_else(|| PipeError::EmptyPipe { pipeline: self.name.clone() })?,
        };
        if !self.registry.contains(step) {
            return Err(PipeError::undefined_step(step, &self.name));
        }
        let func = self.compiled
                       .as_ref()
                       .and_then(|c| c.funcs.get(step))
                       .ok_or_else(|| PipeError::NotCompiled { pipeline: self.name.clone() })?;
        trace!("call pipe={} step={step}", self.name);
        func(data)
    }

    /// Same as `call(data, None)`.
    pub fn run(&self, data: D) -> Result<D, PipeError> {
        self.call(data, None)
    }

    /// Function equivalent to `run`, snapshotting the current compiled state.
    /// Used when this pipe is nested as a step of another pipe.
    pub(crate) fn default_fn(&self) -> StepFn<D> {
        let compiled = self.registry
                           .last()
                           .and_then(|last| self.compiled.as_ref().and_then(|c| c.funcs.get(last)))
                           .cloned();
        match compiled {
            Some(f) => f,
            None => {
                let err = PipeError::EmptyPipe { pipeline: self.name.clone() };
                Arc::new(move |_: D| -> Result<D, PipeError> { Err(err.clone()) })
            }
        }
    }
}

impl<D> fmt::Display for Pipe<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl<D> fmt::Debug for Pipe<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
         .field("name", &self.name)
         .field("kind", &self.kind)
         .field("steps", &self.registry.names())
         .field("locked", &self.locks.locked_steps())
         .field("policy", &self.policy)
         .field("compiled", &self.is_compiled())
         .finish()
    }
}
