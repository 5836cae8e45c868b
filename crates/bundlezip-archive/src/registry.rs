//! Archive format registry and the encrypted format registrar.
//!
//! The standard `zip` format is always available. The password-capable
//! `zip-encryptable` variant is registered lazily, the first time an
//! encrypted archive is created, through [`EncryptedFormatRegistrar`].

use crate::{ArchiveError, ArchiveResult};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Name of the standard zip format.
pub const ZIP_FORMAT: &str = "zip";

/// Name of the password-capable zip format.
pub const ZIP_ENCRYPTABLE_FORMAT: &str = "zip-encryptable";

/// Describes a registered archive format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Format identifier used for lookups.
    pub name: &'static str,
    /// Whether entries written in this format can be password protected.
    pub supports_password: bool,
}

impl FormatDescriptor {
    /// The standard, unencrypted zip format.
    pub const fn zip() -> Self {
        Self {
            name: ZIP_FORMAT,
            supports_password: false,
        }
    }

    /// The password-capable zip format.
    pub const fn zip_encryptable() -> Self {
        Self {
            name: ZIP_ENCRYPTABLE_FORMAT,
            supports_password: true,
        }
    }
}

/// Registry of archive formats known to the writer.
pub struct FormatRegistry {
    formats: RwLock<HashMap<&'static str, FormatDescriptor>>,
}

impl FormatRegistry {
    /// Create a registry containing only the standard zip format.
    pub fn new() -> Self {
        let mut formats = HashMap::new();
        formats.insert(ZIP_FORMAT, FormatDescriptor::zip());
        Self {
            formats: RwLock::new(formats),
        }
    }

    /// Get the process-wide registry.
    pub fn global() -> &'static FormatRegistry {
        static INSTANCE: OnceCell<FormatRegistry> = OnceCell::new();
        INSTANCE.get_or_init(FormatRegistry::new)
    }

    /// Register a format.
    ///
    /// Fails if a format with the same name is already present.
    pub fn register(&self, descriptor: FormatDescriptor) -> ArchiveResult<()> {
        let mut formats = self.formats.write();
        if formats.contains_key(descriptor.name) {
            return Err(ArchiveError::FormatAlreadyRegistered(
                descriptor.name.to_string(),
            ));
        }
        formats.insert(descriptor.name, descriptor);
        Ok(())
    }

    /// Look up a format by name.
    pub fn lookup(&self, name: &str) -> Option<FormatDescriptor> {
        self.formats.read().get(name).copied()
    }

    /// Check whether a format is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.formats.read().contains_key(name)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers the `zip-encryptable` format at most once.
pub struct EncryptedFormatRegistrar<'r> {
    registry: &'r FormatRegistry,
    latch: OnceCell<()>,
}

impl<'r> EncryptedFormatRegistrar<'r> {
    /// Create a registrar bound to a registry.
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self {
            registry,
            latch: OnceCell::new(),
        }
    }

    /// Make sure the encrypted format is registered.
    ///
    /// Only the first call touches the registry; later calls return
    /// immediately. A format someone else already registered under the same
    /// name counts as registered.
    pub fn ensure_registered(&self) -> ArchiveResult<()> {
        self.latch.get_or_try_init(|| {
            match self.registry.register(FormatDescriptor::zip_encryptable()) {
                Ok(()) => {
                    tracing::debug!(format = ZIP_ENCRYPTABLE_FORMAT, "registered archive format");
                    Ok(())
                }
                Err(ArchiveError::FormatAlreadyRegistered(_)) => Ok(()),
                Err(e) => Err(e),
            }
        })?;
        Ok(())
    }

    /// The registry this registrar writes to.
    pub fn registry(&self) -> &'r FormatRegistry {
        self.registry
    }

    /// Check whether this registrar has already run.
    pub fn is_latched(&self) -> bool {
        self.latch.get().is_some()
    }
}

impl EncryptedFormatRegistrar<'static> {
    /// Get the registrar bound to [`FormatRegistry::global`].
    pub fn global() -> &'static EncryptedFormatRegistrar<'static> {
        static INSTANCE: OnceCell<EncryptedFormatRegistrar<'static>> = OnceCell::new();
        INSTANCE.get_or_init(|| EncryptedFormatRegistrar::new(FormatRegistry::global()))
    }
}

/// Register the encrypted format with the process-wide registry.
pub fn ensure_encrypted_format_registered() -> ArchiveResult<()> {
    EncryptedFormatRegistrar::global().ensure_registered()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn FormatRegistry___new___contains_only_zip() {
        let registry = FormatRegistry::new();

        assert!(registry.is_registered(ZIP_FORMAT));
        assert!(!registry.is_registered(ZIP_ENCRYPTABLE_FORMAT));
    }

    #[test]
    fn FormatRegistry___register___makes_format_available() {
        let registry = FormatRegistry::new();

        registry
            .register(FormatDescriptor::zip_encryptable())
            .unwrap();

        let found = registry.lookup(ZIP_ENCRYPTABLE_FORMAT).unwrap();
        assert!(found.supports_password);
    }

    #[test]
    fn FormatRegistry___register_twice___fails() {
        let registry = FormatRegistry::new();

        let result = registry.register(FormatDescriptor::zip());

        assert!(matches!(
            result,
            Err(ArchiveError::FormatAlreadyRegistered(name)) if name == ZIP_FORMAT
        ));
    }

    #[test]
    fn EncryptedFormatRegistrar___ensure_registered___registers_once() {
        let registry = FormatRegistry::new();
        let registrar = EncryptedFormatRegistrar::new(&registry);
        assert!(!registrar.is_latched());

        registrar.ensure_registered().unwrap();
        registrar.ensure_registered().unwrap();
        registrar.ensure_registered().unwrap();

        assert!(registrar.is_latched());
        assert!(registry.is_registered(ZIP_ENCRYPTABLE_FORMAT));
    }

    #[test]
    fn EncryptedFormatRegistrar___format_registered_elsewhere___still_succeeds() {
        let registry = FormatRegistry::new();
        registry
            .register(FormatDescriptor::zip_encryptable())
            .unwrap();
        let registrar = EncryptedFormatRegistrar::new(&registry);

        registrar.ensure_registered().unwrap();

        assert!(registrar.is_latched());
    }

    #[test]
    fn ensure_encrypted_format_registered___global___is_idempotent() {
        ensure_encrypted_format_registered().unwrap();
        ensure_encrypted_format_registered().unwrap();

        assert!(FormatRegistry::global().is_registered(ZIP_ENCRYPTABLE_FORMAT));
    }
}
