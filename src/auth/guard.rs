use crate::database::models::{Bookmark, User};

/// Outcome of an ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allowed
    }
}

/// Resources whose access is decided by a single owning user id
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Bookmark {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// A profile is owned by the user it describes
impl Owned for User {
    fn owner_id(&self) -> i64 {
        self.id
    }
}

/// Owner-equality check. Pure; callers load the resource first.
pub fn authorize(caller_id: i64, owner_id: i64) -> Access {
    if caller_id == owner_id {
        Access::Allowed
    } else {
        Access::Denied
    }
}

pub fn authorize_resource<R: Owned>(caller_id: i64, resource: &R) -> Access {
    authorize(caller_id, resource.owner_id())
}
