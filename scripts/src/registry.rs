//! The persisted registry of deployed addresses, keyed by chain ID

use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{constants::REGISTRY_INDENT, errors::ScriptError};

/// The in-memory contents of a registry: one record per chain ID.
///
/// Serialized as a JSON object whose keys are the stringified chain IDs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry<R> {
    /// The records, keyed by chain ID
    entries: BTreeMap<u64, R>,
}

impl<R> Default for Registry<R> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<R> Registry<R> {
    /// The record for a chain, if one exists
    pub fn get(&self, chain_id: u64) -> Option<&R> {
        self.entries.get(&chain_id)
    }

    /// The chain IDs with a record, in ascending order
    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }

    /// The number of chains with a record
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the record for `chain_id` wholesale, leaving every other chain untouched
    pub fn merge(mut self, chain_id: u64, record: R) -> Self {
        self.entries.insert(chain_id, record);
        self
    }
}

/// A registry file on disk.
///
/// Assumes a single writer: concurrent runs may race on the
/// read-modify-write cycle.
#[derive(Clone, Debug)]
pub struct AddressRegistry<R> {
    /// The path of the registry file
    path: PathBuf,
    /// The per-chain record type
    _record: PhantomData<R>,
}

impl<R: Serialize + DeserializeOwned> AddressRegistry<R> {
    /// A registry stored at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// The path of the registry file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the registry, returning an empty one if the file does not exist
    pub fn load(&self) -> Result<Registry<R>, ScriptError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no registry at {}, starting empty", self.path.display());
                return Ok(Registry::default());
            }
            Err(e) => {
                return Err(ScriptError::ReadRegistry(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&contents)
            .map_err(|e| ScriptError::RegistryFormat(format!("{}: {}", self.path.display(), e)))
    }

    /// Replace the registry file with `registry`.
    ///
    /// The contents are written to a temporary file beside the target and
    /// renamed over it, so a crash never leaves a partially written registry.
    pub fn persist(&self, registry: &Registry<R>) -> Result<(), ScriptError> {
        let write_err = |e: &dyn std::fmt::Display| {
            ScriptError::WriteRegistry(format!("{}: {}", self.path.display(), e))
        };

        let mut contents = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut contents,
            PrettyFormatter::with_indent(REGISTRY_INDENT),
        );
        registry.serialize(&mut serializer).map_err(|e| write_err(&e))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(&e))?;
        tmp.write_all(&contents).map_err(|e| write_err(&e))?;
        tmp.as_file().sync_all().map_err(|e| write_err(&e))?;
        tmp.persist(&self.path).map_err(|e| write_err(&e))?;

        info!(
            "wrote {} network(s) to {}",
            registry.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load the registry, replace the record for `chain_id`, and persist the result
    pub fn update(&self, chain_id: u64, record: R) -> Result<Registry<R>, ScriptError> {
        let registry = self.load()?.merge(chain_id, record);
        self.persist(&registry)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy_primitives::Address;

    use super::{AddressRegistry, Registry};
    use crate::{
        errors::ScriptError,
        types::{NetworkRecord, RegistryAddress},
    };

    fn record(role: &str, byte: u8) -> NetworkRecord {
        let mut record = NetworkRecord::default();
        record.insert(role, Address::repeat_byte(byte));
        record
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = Registry::default().merge(5, record("vBTC", 1));
        let twice = once.clone().merge(5, record("vBTC", 1));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_isolates_networks() {
        let registry = Registry::default()
            .merge(5, record("vBTC", 1))
            .merge(7, record("vBTR", 2));

        assert_eq!(registry.get(5), Some(&record("vBTC", 1)));
        assert_eq!(registry.get(7), Some(&record("vBTR", 2)));
    }

    #[test]
    fn test_merge_replaces_record_wholesale() {
        let mut old = record("vBTC", 1);
        old.insert("vBTR", Address::repeat_byte(2));

        let registry = Registry::default()
            .merge(5, old)
            .merge(5, record("vBTC", 3));
        assert_eq!(registry.get(5), Some(&record("vBTC", 3)));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = AddressRegistry::<NetworkRecord>::new(dir.path().join("addresses.json"));
        assert!(registry.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addresses.json");
        fs::write(&path, "{ not json").unwrap();

        let registry = AddressRegistry::<NetworkRecord>::new(&path);
        assert!(matches!(
            registry.load(),
            Err(ScriptError::RegistryFormat(_))
        ));
    }

    #[test]
    fn test_load_wrong_shape_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addresses.json");
        fs::write(&path, r#"{ "mainnet": "0x00" }"#).unwrap();

        let registry = AddressRegistry::<RegistryAddress>::new(&path);
        assert!(matches!(
            registry.load(),
            Err(ScriptError::RegistryFormat(_))
        ));
    }

    #[test]
    fn test_persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = AddressRegistry::<NetworkRecord>::new(dir.path().join("addresses.json"));

        let registry = Registry::default().merge(97, record("vBTC", 0xaa));
        store.persist(&registry).unwrap();

        assert_eq!(store.load().unwrap(), registry);
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert!(raw["97"]["vBTC"].is_string());
    }

    #[test]
    fn test_update_preserves_other_networks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staking_pool_actions_addresses.json");
        fs::write(
            &path,
            r#"{ "1": "0x1111111111111111111111111111111111111111" }"#,
        )
        .unwrap();

        let store = AddressRegistry::<RegistryAddress>::new(&path);
        store
            .update(42, RegistryAddress(Address::repeat_byte(0x42)))
            .unwrap();

        let registry = store.load().unwrap();
        assert_eq!(
            registry.get(1),
            Some(&RegistryAddress(Address::repeat_byte(0x11)))
        );
        assert_eq!(
            registry.get(42),
            Some(&RegistryAddress(Address::repeat_byte(0x42)))
        );
        assert_eq!(registry.chain_ids().collect::<Vec<_>>(), vec![1, 42]);
    }
}
