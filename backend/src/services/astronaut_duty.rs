//! Astronaut duty commands and queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{require_text, ServiceError, ServiceResult};
use super::mediator::Request;
use crate::db::repository::FullRepository;
use crate::models::{AstronautDuty, NewAstronautDuty, PersonAstronaut};

/// Record a new duty for a person, identified by name.
///
/// The new duty must start after the person's latest duty. Any open duty is
/// closed the day before the new one starts. If the person already has an
/// astronaut detail, the repository brings it in line with the new duty in
/// the same write; a `RETIRED` duty also ends the career the day before it
/// starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAstronautDuty {
    pub name: String,
    pub rank: String,
    pub duty_title: String,
    pub duty_start_date: DateTime<Utc>,
}

#[async_trait]
impl Request for CreateAstronautDuty {
    type Response = AstronautDuty;
    const NAME: &'static str = "CreateAstronautDuty";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response> {
        require_text("Rank", &self.rank)?;
        require_text("DutyTitle", &self.duty_title)?;

        let person = repo
            .find_person_by_name(&self.name)
            .await?
            .ok_or_else(ServiceError::person_not_found)?;

        let new_duty = NewAstronautDuty {
            person_id: person.id,
            rank: self.rank.trim().to_string(),
            duty_title: self.duty_title.trim().to_string(),
            duty_start_date: self.duty_start_date,
        };

        let existing = repo.list_astronaut_duties(person.id).await?;
        if existing.iter().any(|d| {
            d.duty_title == new_duty.duty_title && d.duty_start_date == new_duty.duty_start_date
        }) {
            return Err(ServiceError::Conflict(format!(
                "Duty '{}' starting {} already exists for this person",
                new_duty.duty_title,
                new_duty.duty_start_date.date_naive()
            )));
        }

        if let Some(latest) = existing.first() {
            if latest.duty_start_date >= new_duty.duty_start_date {
                return Err(ServiceError::InvalidInput(format!(
                    "DutyStartDate must be after {}, the start of the latest duty",
                    latest.duty_start_date.date_naive()
                )));
            }
        }

        let duty = repo.insert_astronaut_duty(&new_duty).await?;

        info!(person_id = %person.id, duty_id = %duty.id, "AstronautDuty created");
        Ok(duty)
    }
}

/// A person's summary together with their duty history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDuties {
    pub person: PersonAstronaut,
    pub astronaut_duties: Vec<AstronautDuty>,
}

#[derive(Debug, Clone)]
pub struct GetAstronautDutiesByName {
    pub name: String,
}

#[async_trait]
impl Request for GetAstronautDutiesByName {
    type Response = PersonDuties;
    const NAME: &'static str = "GetAstronautDutiesByName";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response> {
        let person = repo
            .find_person_astronaut_by_name(&self.name)
            .await?
            .ok_or_else(ServiceError::person_not_found)?;
        let astronaut_duties = repo.list_astronaut_duties(person.person_id).await?;
        Ok(PersonDuties {
            person,
            astronaut_duties,
        })
    }
}
