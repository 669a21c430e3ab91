//! Person commands and queries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{require_text, ServiceError, ServiceResult};
use super::mediator::Request;
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{PersonAstronaut, PersonId};

/// Create a person. The name is trimmed and must be unique.
#[derive(Debug, Clone)]
pub struct CreatePerson {
    pub name: String,
}

/// Id of a newly created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created<T> {
    pub id: T,
}

fn conflict_or(err: RepositoryError, name: &str) -> ServiceError {
    match err {
        RepositoryError::ConflictError { .. } => {
            ServiceError::Conflict(format!("Person with name '{}' already exists", name))
        }
        other => other.into(),
    }
}

#[async_trait]
impl Request for CreatePerson {
    type Response = Created<PersonId>;
    const NAME: &'static str = "CreatePerson";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response> {
        require_text("Name", &self.name)?;
        let name = self.name.trim();

        let person = repo
            .insert_person(name)
            .await
            .map_err(|e| conflict_or(e, name))?;
        info!(person_id = %person.id, "Person created");
        Ok(Created { id: person.id })
    }
}

/// Rename a person. `new_name = None` leaves the record unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePerson {
    pub name: String,
    pub new_name: Option<String>,
}

#[async_trait]
impl Request for UpdatePerson {
    type Response = ();
    const NAME: &'static str = "UpdatePerson";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<()> {
        let person = repo
            .find_person_by_name(&self.name)
            .await?
            .ok_or_else(ServiceError::person_not_found)?;

        let Some(new_name) = self.new_name else {
            return Ok(());
        };
        require_text("NewName", &new_name)?;
        let new_name = new_name.trim();
        if new_name == person.name {
            return Ok(());
        }

        repo.rename_person(person.id, new_name)
            .await
            .map_err(|e| conflict_or(e, new_name))?;
        info!(person_id = %person.id, "Person renamed");
        Ok(())
    }
}

/// All people with their astronaut summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPeople;

#[async_trait]
impl Request for GetPeople {
    type Response = Vec<PersonAstronaut>;
    const NAME: &'static str = "GetPeople";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response> {
        Ok(repo.list_people().await?)
    }
}

/// One person by exact name.
#[derive(Debug, Clone)]
pub struct GetPersonByName {
    pub name: String,
}

#[async_trait]
impl Request for GetPersonByName {
    type Response = PersonAstronaut;
    const NAME: &'static str = "GetPersonByName";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response> {
        repo.find_person_astronaut_by_name(&self.name)
            .await?
            .ok_or_else(ServiceError::person_not_found)
    }
}
