//! # Typed Entities
//!
//! Stored rows are bincode-encoded. The [`Entity`] trait binds a Rust type to
//! its collection and id so callers never juggle raw bytes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{EntityKind, StoreError, WriteOp};
use crate::ports::EntityStore;

/// A record that lives in one collection of the entity store.
pub trait Entity: Serialize + DeserializeOwned {
    const KIND: EntityKind;

    /// Canonical id within [`Entity::KIND`].
    fn entity_id(&self) -> String;
}

pub fn encode<E: Entity>(entity: &E) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(entity).map_err(|e| StoreError::Codec {
        kind: E::KIND,
        id: entity.entity_id(),
        message: e.to_string(),
    })
}

pub fn decode<E: Entity>(id: &str, bytes: &[u8]) -> Result<E, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Codec {
        kind: E::KIND,
        id: id.to_string(),
        message: e.to_string(),
    })
}

/// Encode an entity into a batch operation.
pub fn write_op<E: Entity>(entity: &E) -> Result<WriteOp, StoreError> {
    Ok(WriteOp::new(E::KIND, entity.entity_id(), encode(entity)?))
}

/// Load and decode one entity.
pub fn load_entity<E, S>(store: &S, id: &str) -> Result<Option<E>, StoreError>
where
    E: Entity,
    S: EntityStore + ?Sized,
{
    match store.load(E::KIND, id)? {
        Some(bytes) => decode(id, &bytes).map(Some),
        None => Ok(None),
    }
}

/// Encode and upsert one entity.
pub fn save_entity<E, S>(store: &S, entity: &E) -> Result<(), StoreError>
where
    E: Entity,
    S: EntityStore + ?Sized,
{
    store.upsert(E::KIND, &entity.entity_id(), encode(entity)?)
}
