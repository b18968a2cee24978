use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::domain::{CustomerIdentity, CustomerName, CustomerRecord, Pet};
use super::ids::{CustomerNumber, PetId};

/// Ordered store keyed by identifier with insert-if-absent semantics.
#[derive(Debug, Clone)]
pub struct Registry<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> Registry<K, V> {
    /// Store `value` under `key` unless the key is taken. Returns the stored value and
    /// whether this call inserted it.
    pub fn insert_if_absent(&mut self, key: K, value: V) -> (&V, bool) {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => (&*entry.into_mut(), false),
            Entry::Vacant(entry) => (&*entry.insert(value), true),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type PetRegistry = Registry<PetId, Pet>;

/// Customer store keyed by customer number, with a secondary index on logical identity
/// so the same person cannot be registered twice.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    records: Registry<CustomerNumber, CustomerRecord>,
    identities: HashMap<CustomerIdentity, CustomerNumber>,
}

impl CustomerRegistry {
    pub fn ensure_unique(&self, identity: &CustomerIdentity) -> Result<(), RegistryError> {
        if self.identities.contains_key(identity) {
            return Err(RegistryError::DuplicateCustomer {
                name: identity.name.clone(),
                date_of_birth: identity.date_of_birth,
            });
        }
        Ok(())
    }

    pub fn insert(&mut self, record: CustomerRecord) -> Result<&CustomerRecord, RegistryError> {
        let identity = record.identity();
        self.ensure_unique(&identity)?;

        let number = record.customer_number().clone();
        if self.records.contains_key(&number) {
            return Err(RegistryError::DuplicateCustomerNumber(number));
        }

        self.identities.insert(identity, number.clone());
        let (stored, _) = self.records.insert_if_absent(number, record);
        Ok(stored)
    }

    pub fn get(&self, number: &CustomerNumber) -> Option<&CustomerRecord> {
        self.records.get(number)
    }

    pub fn find(&self, identity: &CustomerIdentity) -> Option<&CustomerRecord> {
        self.identities
            .get(identity)
            .and_then(|number| self.records.get(number))
    }

    pub fn values(&self) -> impl Iterator<Item = &CustomerRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("customer {name} born {date_of_birth} already has a shelter record")]
    DuplicateCustomer {
        name: CustomerName,
        date_of_birth: NaiveDate,
    },
    #[error("customer number {0} is already registered")]
    DuplicateCustomerNumber(CustomerNumber),
}
