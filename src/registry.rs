use std::sync::OnceLock;

use crate::module::{ArtModule, Metadata};

/// Factory producing a fresh module instance per invocation.
pub type ModuleFactory = fn() -> Box<dyn ArtModule>;

/// One loadable entry in the registry: a stable identifier (the manifest
/// `fileName`, without extension) and its factory.
#[derive(Clone, Copy)]
pub struct ModuleHandle {
    file_name: &'static str,
    factory: ModuleFactory,
}

impl ModuleHandle {
    pub const fn new(file_name: &'static str, factory: ModuleFactory) -> Self {
        Self { file_name, factory }
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn instantiate(&self) -> Box<dyn ArtModule> {
        (self.factory)()
    }

    pub fn metadata(&self) -> Metadata {
        self.instantiate().metadata()
    }
}

impl std::fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("file_name", &self.file_name)
            .finish()
    }
}

/// Static mapping from module identifier to loadable module.
///
/// Populated at compile time from the built-in piece list; a lookup miss
/// therefore signals a manifest/registry mismatch, never a transient error.
pub struct Registry {
    entries: Vec<ModuleHandle>,
}

impl Registry {
    pub fn from_entries(entries: Vec<ModuleHandle>) -> Self {
        Self { entries }
    }

    /// The registry of all built-in pieces, in display order.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| Registry::from_entries(crate::art::builtin_entries()))
    }

    pub fn resolve(&self, file_name: &str) -> Option<&ModuleHandle> {
        let stem = file_name
            .strip_suffix(".rs")
            .or_else(|| file_name.strip_suffix(".js"))
            .unwrap_or(file_name);
        self.entries.iter().find(|h| h.file_name == stem)
    }

    pub fn handles(&self) -> impl Iterator<Item = &ModuleHandle> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
