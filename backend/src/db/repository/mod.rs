//! Repository traits: the storage interface every backend implements.
//!
//! Lookups that may legitimately miss return `Option`; `NotFound` errors are
//! reserved for writes that target a row which disappeared.

use async_trait::async_trait;

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::{
    AstronautDetail, AstronautDuty, NewAstronautDetail, NewAstronautDuty, Person, PersonAstronaut,
    PersonId,
};

/// Repository trait for person records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request handlers.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Check that the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a person. Fails with `ConflictError` if the name is taken.
    async fn insert_person(&self, name: &str) -> RepositoryResult<Person>;

    /// Every person, joined with its astronaut detail, ordered by id.
    async fn list_people(&self) -> RepositoryResult<Vec<PersonAstronaut>>;

    async fn find_person_by_id(&self, person_id: PersonId) -> RepositoryResult<Option<Person>>;

    /// Exact, case-sensitive name lookup.
    async fn find_person_by_name(&self, name: &str) -> RepositoryResult<Option<Person>>;

    /// Exact name lookup joined with the person's astronaut detail.
    async fn find_person_astronaut_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<PersonAstronaut>>;

    /// Rename a person. Fails with `ConflictError` if the new name is taken.
    async fn rename_person(&self, person_id: PersonId, new_name: &str) -> RepositoryResult<Person>;
}

/// Repository trait for astronaut details and duties.
#[async_trait]
pub trait AstronautRepository: Send + Sync {
    async fn list_astronaut_details(&self) -> RepositoryResult<Vec<AstronautDetail>>;

    async fn find_astronaut_detail(
        &self,
        person_id: PersonId,
    ) -> RepositoryResult<Option<AstronautDetail>>;

    /// Insert a detail. Fails with `ConflictError` if the person already has one.
    async fn insert_astronaut_detail(
        &self,
        detail: &NewAstronautDetail,
    ) -> RepositoryResult<AstronautDetail>;

    async fn count_astronaut_duties(&self, person_id: PersonId) -> RepositoryResult<u64>;

    /// Duties of a person, newest start date first.
    async fn list_astronaut_duties(&self, person_id: PersonId)
        -> RepositoryResult<Vec<AstronautDuty>>;

    /// Insert a duty in one atomic step:
    /// - open duties that started earlier get `end = day before the new start`
    /// - the person's detail, if any, takes the new rank and title
    /// - a `RETIRED` duty also sets the detail's career end to that same day
    async fn insert_astronaut_duty(&self, duty: &NewAstronautDuty)
        -> RepositoryResult<AstronautDuty>;
}

/// Everything the service layer needs from a store.
pub trait FullRepository: PersonRepository + AstronautRepository {}

impl<T> FullRepository for T where T: PersonRepository + AstronautRepository {}
