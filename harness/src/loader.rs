//! Dynamic loading of compiled user implementations.
//!
//! Every call to [`Loader::load`] reads the artifact from disk and compiles a
//! new module. Nothing is cached by name or by hash, so an artifact rebuilt
//! after an edit is always picked up by the next load.
//!
//! Loaded code runs in-process with no fuel, memory, or time limits. Module
//! freshness is the only isolation provided.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, instrument};
use wasmtime::{Engine, Instance, Linker, Module, Store};

use crate::core::value::Value;
use crate::error::{HarnessError, Result};

/// Kind of the single argument an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Passed as one `i32`.
    Int,
    /// Copied into guest memory and passed as `(ptr: i32, len: i32)`.
    IntArray,
}

/// Kind of value an operation returns. Both travel as one `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// Any non-zero result is `true`.
    Bool,
    Int,
}

/// Name and shape of the operation an exercise demands from user code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub name: &'static str,
    pub param: ParamKind,
    pub returns: ReturnKind,
}

/// Capability implemented by loaded user code.
pub trait Implementation {
    /// Create a fresh instance and run the operation described by `signature`.
    fn invoke(&self, signature: &Signature, argument: &Value) -> Result<Value>;
}

/// Loads compiled artifacts. Holds only the engine; modules are never reused.
#[derive(Clone, Default)]
pub struct Loader {
    engine: Engine,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a compiled module (binary or text wasm) from `path`.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<WasmImplementation> {
        let bytes = fs::read(path).map_err(|err| HarnessError::load(path, err))?;
        let module = Module::new(&self.engine, &bytes)
            .map_err(|err| HarnessError::load(path, format!("{err:#}")))?;
        let code_hash = hex::encode(Sha256::digest(&bytes));
        debug!(bytes = bytes.len(), code_hash = %code_hash, "artifact loaded");
        Ok(WasmImplementation {
            engine: self.engine.clone(),
            module,
            path: path.to_path_buf(),
            code_hash,
        })
    }
}

/// A compiled user module. Each [`Implementation::invoke`] instantiates it
/// again, so no state survives between calls.
pub struct WasmImplementation {
    engine: Engine,
    module: Module,
    path: PathBuf,
    code_hash: String,
}

impl fmt::Debug for WasmImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasmImplementation")
            .field("path", &self.path)
            .field("code_hash", &self.code_hash)
            .finish_non_exhaustive()
    }
}

impl WasmImplementation {
    /// SHA-256 of the artifact bytes this module was compiled from.
    pub fn code_hash(&self) -> &str {
        &self.code_hash
    }

    fn instantiate(&self, store: &mut Store<()>) -> Result<Instance> {
        let linker = Linker::new(&self.engine);
        linker
            .instantiate(&mut *store, &self.module)
            .map_err(|err| HarnessError::Reflection(format!("instantiate module: {err:#}")))
    }

    fn call_int(
        &self,
        store: &mut Store<()>,
        instance: &Instance,
        name: &str,
        value: i32,
    ) -> Result<i32> {
        let func = instance
            .get_typed_func::<i32, i32>(&mut *store, name)
            .map_err(|err| HarnessError::Reflection(format!("export `{name}`: {err:#}")))?;
        func.call(&mut *store, value)
            .map_err(|err| HarnessError::Invocation(format!("{name}: {err:#}")))
    }

    fn call_int_array(
        &self,
        store: &mut Store<()>,
        instance: &Instance,
        name: &str,
        items: &[i32],
    ) -> Result<i32> {
        let memory = instance
            .get_memory(&mut *store, "memory")
            .ok_or_else(|| HarnessError::Reflection("module has no `memory` export".to_string()))?;
        let allocate = instance
            .get_typed_func::<i32, i32>(&mut *store, "allocate")
            .map_err(|err| HarnessError::Reflection(format!("export `allocate`: {err:#}")))?;
        let func = instance
            .get_typed_func::<(i32, i32), i32>(&mut *store, name)
            .map_err(|err| HarnessError::Reflection(format!("export `{name}`: {err:#}")))?;

        let bytes: Vec<u8> = items.iter().flat_map(|item| item.to_le_bytes()).collect();
        let size = i32::try_from(bytes.len())
            .map_err(|_| HarnessError::Invocation("argument too large".to_string()))?;
        let len = i32::try_from(items.len())
            .map_err(|_| HarnessError::Invocation("argument too large".to_string()))?;

        let ptr = allocate
            .call(&mut *store, size)
            .map_err(|err| HarnessError::Invocation(format!("allocate: {err:#}")))?;
        let offset = usize::try_from(ptr).map_err(|_| {
            HarnessError::Invocation(format!("allocate returned negative pointer {ptr}"))
        })?;
        memory
            .write(&mut *store, offset, &bytes)
            .map_err(|err| HarnessError::Invocation(format!("write argument at {offset}: {err}")))?;

        func.call(&mut *store, (ptr, len))
            .map_err(|err| HarnessError::Invocation(format!("{name}: {err:#}")))
    }
}

impl Implementation for WasmImplementation {
    fn invoke(&self, signature: &Signature, argument: &Value) -> Result<Value> {
        let mut store = Store::new(&self.engine, ());
        let instance = self.instantiate(&mut store)?;

        let raw = match (signature.param, argument) {
            (ParamKind::Int, Value::Int(value)) => {
                self.call_int(&mut store, &instance, signature.name, *value)?
            }
            (ParamKind::IntArray, value) => {
                let items = value.as_int_array().ok_or_else(|| {
                    HarnessError::Reflection(format!(
                        "`{}` expects an int array, got {value}",
                        signature.name
                    ))
                })?;
                self.call_int_array(&mut store, &instance, signature.name, &items)?
            }
            (ParamKind::Int, other) => {
                return Err(HarnessError::Reflection(format!(
                    "`{}` expects an int, got {other}",
                    signature.name
                )));
            }
        };

        Ok(match signature.returns {
            ReturnKind::Bool => Value::Bool(raw != 0),
            ReturnKind::Int => Value::Int(raw),
        })
    }
}
