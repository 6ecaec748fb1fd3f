use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use fairsplit_core::{DomainError, DomainResult, Entity, UserId};

/// A person taking part in shared expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    /// Names are trimmed; a blank name is rejected.
    pub fn new(id: UserId, name: impl AsRef<str>) -> DomainResult<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::validation("user name must not be blank"));
        }
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Users by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    users: HashMap<UserId, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `user.id()`, returning the previous one.
    pub fn insert(&mut self, user: User) -> Option<User> {
        self.users.insert(user.id().clone(), user)
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Look a user up, turning absence into [`DomainError::UnknownUser`].
    pub fn require(&self, id: &UserId) -> DomainResult<&User> {
        self.get(id).ok_or_else(|| DomainError::unknown_user(id))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// All users ordered by id.
    pub fn list(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));
        users
    }
}
