//! Game object types and related helpers.
//!
//! A `GameObject` is anything the player can interact with: a portable item, a container, or a
//! fixture such as a door. Objects are owned by value by whatever holds them (a scenario, the
//! player's inventory, or a container's contents), so an object can only ever be in one place and
//! every transfer is a move.

use crate::action::ObjectAction;
use crate::helpers::shout;
use crate::idgen::ObjectId;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An interactable entity: item, container, or fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    /// May enter the player's inventory.
    pub storable: bool,
    /// Contained objects, present only if this object is storage.
    pub contents: Option<Vec<GameObject>>,
    pub openable: bool,
    pub open: bool,
    /// Id of the object that unlocks this one. `None` means no key is required.
    pub key: Option<ObjectId>,
    pub action: Option<ObjectAction>,
}

/// Reasons an `unlock` or `lock` attempt is refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("Não é possível destrancar esse objeto. Ele não possui trancas.")]
    NoLockToOpen,
    #[error("Não é possível trancar esse objeto. Ele não possui trancas.")]
    NoLockToClose,
    #[error("Esse objeto já está destrancado.")]
    AlreadyOpen,
    #[error("Esse objeto já está trancado.")]
    AlreadyClosed,
    #[error("O objeto \"{0}\" está fechado. Você não possui um item que destranque \"{0}\".")]
    MissingKeyToOpen(String),
    #[error("Você não possui um item que tranque \"{0}\".")]
    MissingKeyToClose(String),
}

/// Reasons the contents of an object can't be retrieved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentsError {
    #[error("\"{0}\" não pode guardar objetos.")]
    NotStorage(String),
    #[error("Esse objeto está fechado. Abra-o primeiro.")]
    Closed,
    #[error("Esse objeto está vazio.")]
    Empty,
}

impl GameObject {
    /// Create a plain fixture: not storable, not storage, not openable, no action.
    pub fn new(id: ObjectId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            storable: false,
            contents: None,
            openable: false,
            open: false,
            key: None,
            action: None,
        }
    }

    #[must_use]
    pub fn storable(mut self) -> Self {
        self.storable = true;
        self
    }

    /// Turn this object into a container (with empty contents).
    #[must_use]
    pub fn as_storage(mut self) -> Self {
        self.contents = Some(Vec::new());
        self
    }

    /// Make this object openable, optionally requiring a key.
    #[must_use]
    pub fn with_lock(mut self, key: Option<ObjectId>, open: bool) -> Self {
        self.openable = true;
        self.key = key;
        self.open = open;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ObjectAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Put `object` inside this one. Ignored (and handed back) if this isn't storage.
    ///
    /// # Errors
    /// Returns the object unchanged if this object has no contents list.
    pub fn insert(&mut self, object: GameObject) -> Result<(), GameObject> {
        match &mut self.contents {
            Some(contents) if object.id != self.id => {
                contents.push(object);
                Ok(())
            },
            _ => Err(object),
        }
    }

    pub fn is_storage(&self) -> bool {
        self.contents.is_some()
    }

    /// Returns true if this object's contents can be reached (storage, and open if openable).
    pub fn is_accessible(&self) -> bool {
        self.is_storage() && (!self.openable || self.open)
    }

    /// Case-folded substring match on the object's name.
    pub fn matches(&self, pattern: &str) -> bool {
        self.name.to_lowercase().contains(&pattern.to_lowercase())
    }

    /// Open this object using a key from `inventory`.
    ///
    /// Returns the name of the key used, or `None` if the object needs no key.
    ///
    /// # Errors
    /// - object isn't openable, is already open, or no inventory item's id matches `key`
    pub fn unlock(&mut self, inventory: &[GameObject]) -> Result<Option<String>, LockError> {
        if !self.openable {
            return Err(LockError::NoLockToOpen);
        }
        if self.open {
            return Err(LockError::AlreadyOpen);
        }
        let Some(key_id) = self.key else {
            self.open = true;
            return Ok(None);
        };
        let key = inventory
            .iter()
            .find(|item| item.id == key_id)
            .ok_or_else(|| LockError::MissingKeyToOpen(shout(&self.name)))?;
        self.open = true;
        Ok(Some(key.name.clone()))
    }

    /// Close (and lock, if keyed) this object using a key from `inventory`.
    ///
    /// # Errors
    /// - object isn't openable, is already closed, or no inventory item's id matches `key`
    pub fn lock(&mut self, inventory: &[GameObject]) -> Result<Option<String>, LockError> {
        if !self.openable {
            return Err(LockError::NoLockToClose);
        }
        if !self.open {
            return Err(LockError::AlreadyClosed);
        }
        let Some(key_id) = self.key else {
            self.open = false;
            return Ok(None);
        };
        let key = inventory
            .iter()
            .find(|item| item.id == key_id)
            .ok_or_else(|| LockError::MissingKeyToClose(shout(&self.name)))?;
        self.open = false;
        Ok(Some(key.name.clone()))
    }

    /// Remove and return everything stored in this object, all or nothing.
    ///
    /// # Errors
    /// - not storage, closed, or already empty
    pub fn take_contents(&mut self) -> Result<Vec<GameObject>, ContentsError> {
        if !self.is_storage() {
            return Err(ContentsError::NotStorage(shout(&self.name)));
        }
        if !self.is_accessible() {
            return Err(ContentsError::Closed);
        }
        match &mut self.contents {
            Some(contents) if !contents.is_empty() => Ok(std::mem::take(contents)),
            _ => Err(ContentsError::Empty),
        }
    }
}

/// Anything that owns a list of `GameObject`s: scenarios and the player's inventory.
///
/// Name lookups are case-insensitive substring matches. When several objects match, the first one
/// in insertion order wins. This is a known ambiguity for content authors, e.g. "chave" matches
/// both "chave da cabana" and "chave do baú", whichever was placed first.
pub trait ObjectHolder {
    fn objects(&self) -> &[GameObject];
    fn objects_mut(&mut self) -> &mut Vec<GameObject>;

    fn add_object(&mut self, object: GameObject) {
        self.objects_mut().push(object);
    }

    /// Remove an object by identity.
    fn remove_object(&mut self, id: ObjectId) -> Option<GameObject> {
        let pos = self.objects().iter().position(|o| o.id == id)?;
        Some(self.objects_mut().remove(pos))
    }

    /// Remove the first object whose name contains `pattern`.
    fn remove_object_by_name(&mut self, pattern: &str) -> Option<GameObject> {
        let pos = self.objects().iter().position(|o| o.matches(pattern))?;
        Some(self.objects_mut().remove(pos))
    }

    /// Find the first object whose name contains `pattern`.
    fn find_object(&self, pattern: &str) -> Option<&GameObject> {
        self.objects().iter().find(|o| o.matches(pattern))
    }

    fn find_object_mut(&mut self, pattern: &str) -> Option<&mut GameObject> {
        self.objects_mut().iter_mut().find(|o| o.matches(pattern))
    }

    fn object_by_id_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects_mut().iter_mut().find(|o| o.id == id)
    }

    fn contains_object(&self, id: ObjectId) -> bool {
        self.objects().iter().any(|o| o.id == id)
    }
}
