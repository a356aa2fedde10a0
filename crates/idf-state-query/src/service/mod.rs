//! # State Query Service
//!
//! Read operations and the two in-scope mutations, composed from the
//! repository, resolution and policy components.
//!
//! ## Architecture
//!
//! - `repository`: typed record access, no business rules
//! - `resolution`: identity, accessor and proxy resolution
//! - `policy`: mode, namespace and minimum-IAL policy
//! - `discovery`: IdP and AS discovery
//! - `query`: the remaining point lookups
//! - `mutation`: node detail and address updates
//!
//! Queries are built over a [`CommittedView`]; mutations over a
//! [`WorkingView`].

mod api_impl;
mod discovery;
mod mutation;
mod policy;
mod query;
mod repository;
mod resolution;

pub use mutation::{MutationService, NodePatch};
pub use policy::{NamespacePolicy, PolicyResolver};
pub use repository::EntityRepository;
pub use resolution::{AccessorOwner, IdentitySelector, ProxyChain, ResolutionEngine};

use crate::domain::StateQueryConfig;
use crate::ports::{CommittedView, RecordCodec, StateReader, VersionedStore};
use std::fmt;

/// Status string attached to every query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Success,
    NotFound,
    ServiceInactive,
    /// Both a reference group code and an identity were supplied.
    ConflictingSelector,
    ReferenceGroupNotFound,
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Success => "success",
            QueryStatus::NotFound => "not found",
            QueryStatus::ServiceInactive => "service is not active",
            QueryStatus::ConflictingSelector => {
                "Found reference group code and identity detail in parameter"
            }
            QueryStatus::ReferenceGroupNotFound => "Reference group not found",
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result body plus status. A `None` body is rendered as an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome<T> {
    pub body: Option<T>,
    pub status: QueryStatus,
}

impl<T> QueryOutcome<T> {
    pub fn success(body: T) -> Self {
        Self {
            body: Some(body),
            status: QueryStatus::Success,
        }
    }

    /// Well-formed default body with a "not found" status.
    pub fn not_found(body: T) -> Self {
        Self {
            body: Some(body),
            status: QueryStatus::NotFound,
        }
    }

    /// Empty-object body with the given status.
    pub fn empty(status: QueryStatus) -> Self {
        Self { body: None, status }
    }

    pub fn with_status(body: T, status: QueryStatus) -> Self {
        Self {
            body: Some(body),
            status,
        }
    }

    /// "success" unless `is_empty`, in which case "not found".
    pub fn listing(body: T, is_empty: bool) -> Self {
        if is_empty {
            Self::not_found(body)
        } else {
            Self::success(body)
        }
    }
}

/// Read-only operations over committed state.
pub struct QueryService<'a, R: StateReader, C: RecordCodec> {
    repo: EntityRepository<'a, R, C>,
    config: &'a StateQueryConfig,
}

impl<'a, S: VersionedStore + ?Sized, C: RecordCodec> QueryService<'a, CommittedView<'a, S>, C> {
    pub fn new(
        view: &'a CommittedView<'a, S>,
        codec: &'a C,
        config: &'a StateQueryConfig,
    ) -> Self {
        Self {
            repo: EntityRepository::new(view, codec),
            config,
        }
    }
}

impl<'a, R: StateReader, C: RecordCodec> QueryService<'a, R, C> {
    pub(crate) fn resolver(&self) -> ResolutionEngine<'_, 'a, R, C> {
        ResolutionEngine::new(&self.repo)
    }

    pub(crate) fn policy(&self) -> PolicyResolver<'_, 'a, R, C> {
        PolicyResolver::new(&self.repo, self.config)
    }

    pub fn height(&self) -> Result<u64, crate::domain::StateError> {
        self.repo.height()
    }
}
