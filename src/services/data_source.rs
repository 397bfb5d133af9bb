//! DataSource trait and credentials

use std::fmt;
use std::future::Future;

use crate::domain::{EntityType, RecordSet};
use crate::error::Result;

/// Credential for the CRM API
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    token: Option<String>,
}

impl Credential {
    /// Bearer token credential; a blank token means anonymous
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credential").field("token", &token).finish()
    }
}

/// Source of complete record snapshots
pub trait DataSource: Send + Sync {
    /// Fetch every record of `entity`.
    ///
    /// Best-effort complete: remote sources may cap the result at a
    /// configured ceiling.
    fn fetch_all(
        &self,
        entity: EntityType,
        credential: &Credential,
    ) -> impl Future<Output = Result<RecordSet>> + Send;
}
