//! Request-scoped caller identity and the access rules built on top of it.

use crate::{Error, Result};

/// The authenticated user a request is performed on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub is_staff: bool,
}

impl Caller {
    /// Authors may change their own content, staff may change anything.
    pub fn can_modify(&self, owner_id: i64) -> bool {
        self.is_staff || self.id == owner_id
    }
}

/// Unwraps an optional caller, failing with an authentication error.
pub fn authenticated(caller: Option<&Caller>) -> Result<&Caller> {
    caller.ok_or_else(|| {
        Error::Unauthorized("Authentication credentials were not provided.".to_owned())
    })
}

pub fn owner_or_staff(caller: &Caller, owner_id: i64) -> Result<()> {
    if !caller.can_modify(owner_id) {
        crate::forbidden!();
    }

    Ok(())
}

pub fn staff(caller: &Caller) -> Result<()> {
    if !caller.is_staff {
        crate::forbidden!();
    }

    Ok(())
}
