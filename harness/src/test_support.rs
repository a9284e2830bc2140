//! Test-only helpers: fixture directories, sample modules, and native
//! implementations that stand in for compiled user code.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rand::rngs::StdRng;
use tempfile::TempDir;

use crate::core::case_result::CaseResult;
use crate::core::value::Value;
use crate::error::HarnessError;
use crate::io::config::HarnessConfig;
use crate::io::descriptor::{Category, DESCRIPTOR_SUFFIX, Descriptor};
use crate::loader::{Implementation, ParamKind, ReturnKind, Signature};
use crate::repository::ProjectRepository;
use crate::runners::{Runner, RunnerCatalog};

/// Correct `has_triple` over an array copied in by the host.
pub const HAS_TRIPLE_WAT: &str = r#"(module
  (memory (export "memory") 1)
  (global $next (mut i32) (i32.const 1024))
  (func (export "allocate") (param $size i32) (result i32)
    (local $ptr i32)
    (local.set $ptr (global.get $next))
    (global.set $next (i32.add (global.get $next) (local.get $size)))
    (local.get $ptr))
  (func $at (param $ptr i32) (param $i i32) (result i32)
    (i32.load (i32.add (local.get $ptr) (i32.shl (local.get $i) (i32.const 2)))))
  (func (export "has_triple") (param $ptr i32) (param $len i32) (result i32)
    (local $i i32)
    (block $done
      (loop $scan
        (br_if $done (i32.ge_s (i32.add (local.get $i) (i32.const 2)) (local.get $len)))
        (if (i32.and
              (i32.eq (call $at (local.get $ptr) (local.get $i))
                      (call $at (local.get $ptr) (i32.add (local.get $i) (i32.const 1))))
              (i32.eq (call $at (local.get $ptr) (local.get $i))
                      (call $at (local.get $ptr) (i32.add (local.get $i) (i32.const 2)))))
          (then (return (i32.const 1))))
        (local.set $i (i32.add (local.get $i) (i32.const 1)))
        (br $scan)))
    (i32.const 0)))"#;

/// `has_triple` exported with a single `i32` parameter instead of `(ptr, len)`.
pub const WRONG_SIGNATURE_WAT: &str = r#"(module
  (memory (export "memory") 1)
  (func (export "allocate") (param $size i32) (result i32)
    (i32.const 1024))
  (func (export "has_triple") (param $ptr i32) (result i32)
    (i32.const 0)))"#;

/// `has_triple` that traps on every call.
pub const TRAPPING_WAT: &str = r#"(module
  (memory (export "memory") 1)
  (func (export "allocate") (param $size i32) (result i32)
    (i32.const 1024))
  (func (export "has_triple") (param $ptr i32) (param $len i32) (result i32)
    (unreachable)))"#;

/// Build a descriptor with a fixed prompt.
pub fn descriptor(category: Category, skeleton: &str) -> Descriptor {
    Descriptor {
        category,
        prompt: "Return true if the array holds three equal values in a row.".to_string(),
        skeleton: skeleton.to_string(),
    }
}

/// Native stand-in for a loaded implementation.
pub struct NativeImplementation {
    call: Box<dyn Fn(&Value) -> Result<Value, HarnessError>>,
}

impl NativeImplementation {
    /// Implementation of an `IntArray -> Bool` operation.
    pub fn int_array_to_bool(f: impl Fn(&[i32]) -> bool + 'static) -> Self {
        Self {
            call: Box::new(move |argument| {
                let items = argument.as_int_array().ok_or_else(|| {
                    HarnessError::Reflection(format!("expected int array, got {argument}"))
                })?;
                Ok(Value::Bool(f(&items)))
            }),
        }
    }

    /// Implementation that fails every call as if the user code trapped.
    pub fn failing(message: &'static str) -> Self {
        Self {
            call: Box::new(move |_| Err(HarnessError::Invocation(message.to_string()))),
        }
    }
}

impl Implementation for NativeImplementation {
    fn invoke(&self, signature: &Signature, argument: &Value) -> Result<Value, HarnessError> {
        if signature.param != ParamKind::IntArray || signature.returns != ReturnKind::Bool {
            return Err(HarnessError::Reflection(format!(
                "native stand-in cannot serve `{}`",
                signature.name
            )));
        }
        (self.call)(argument)
    }
}

/// Runner with an arbitrary id that produces no cases. Lets tests register
/// ids other than the built-in exercises.
pub struct NamedRunner(pub &'static str);

impl Runner for NamedRunner {
    fn id(&self) -> &'static str {
        self.0
    }

    fn signature(&self) -> Signature {
        Signature {
            name: "noop",
            param: ParamKind::Int,
            returns: ReturnKind::Int,
        }
    }

    fn try_results(
        &self,
        _implementation: &dyn Implementation,
        _rng: &mut StdRng,
    ) -> Result<Vec<CaseResult>, HarnessError> {
        Ok(Vec::new())
    }
}

/// Temporary exercise layout rooted in a temp directory.
pub struct Fixture {
    temp: TempDir,
    pub config: HarnessConfig,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("tempdir")?;
        let config = HarnessConfig::rooted_at(temp.path());
        for dir in [&config.descriptor_dir, &config.artifact_dir, &config.code_dir] {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(Self { temp, config })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write (or overwrite) `<id>Runner.toml`.
    pub fn add_exercise(&self, id: &str, category: Category, skeleton: &str) -> Result<PathBuf> {
        let path = self
            .config
            .descriptor_dir
            .join(format!("{id}{DESCRIPTOR_SUFFIX}"));
        let contents =
            toml::to_string(&descriptor(category, skeleton)).context("serialize descriptor")?;
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write `<id>.wasm` (binary or text module).
    pub fn write_artifact(&self, id: &str, module: &str) -> Result<PathBuf> {
        let path = self.config.artifact_dir.join(format!("{id}.wasm"));
        fs::write(&path, module).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write the user source file for `id`.
    pub fn write_source(&self, id: &str, code: &str) -> Result<PathBuf> {
        let path = self
            .config
            .code_dir
            .join(format!("{id}.{}", self.config.source_extension));
        fs::write(&path, code).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Discover with the built-in catalog.
    pub fn repository(&self) -> Result<ProjectRepository> {
        ProjectRepository::discover(self.config.clone(), RunnerCatalog::builtin())
            .map_err(|err| anyhow!("discover: {err:#}"))
    }
}
