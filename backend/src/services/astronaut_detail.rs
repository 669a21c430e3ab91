//! Astronaut detail commands and queries.
//!
//! [`CreateAstronautDetail`] is the single entry point for detail creation;
//! both HTTP routes that add a detail dispatch it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{require_text, ServiceError, ServiceResult};
use super::mediator::Request;
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{AstronautDetail, NewAstronautDetail, PersonId};

pub const MISSING_DUTY_MESSAGE: &str =
    "Person must have at least one AstronautDuty before adding AstronautDetail";
pub const DUPLICATE_DETAIL_MESSAGE: &str = "Person already has an AstronautDetail";

/// Create the astronaut detail for a person that already has a duty on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAstronautDetail {
    pub person_id: PersonId,
    pub current_rank: String,
    pub current_duty_title: String,
    pub career_start_date: DateTime<Utc>,
    #[serde(default)]
    pub career_end_date: Option<DateTime<Utc>>,
}

impl CreateAstronautDetail {
    fn validate(&self) -> ServiceResult<()> {
        require_text("CurrentRank", &self.current_rank)?;
        require_text("CurrentDutyTitle", &self.current_duty_title)?;
        if let Some(end) = self.career_end_date {
            if end < self.career_start_date {
                return Err(ServiceError::InvalidInput(
                    "CareerEndDate must not precede CareerStartDate".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Request for CreateAstronautDetail {
    type Response = AstronautDetail;
    const NAME: &'static str = "CreateAstronautDetail";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response> {
        self.validate()?;

        if repo.find_person_by_id(self.person_id).await?.is_none() {
            return Err(ServiceError::person_not_found());
        }
        if repo.count_astronaut_duties(self.person_id).await? == 0 {
            return Err(ServiceError::PreconditionFailed(
                MISSING_DUTY_MESSAGE.to_string(),
            ));
        }
        if repo.find_astronaut_detail(self.person_id).await?.is_some() {
            return Err(ServiceError::Conflict(DUPLICATE_DETAIL_MESSAGE.to_string()));
        }

        let new_detail = NewAstronautDetail {
            person_id: self.person_id,
            current_rank: self.current_rank.trim().to_string(),
            current_duty_title: self.current_duty_title.trim().to_string(),
            career_start_date: self.career_start_date,
            career_end_date: self.career_end_date,
        };
        let detail = repo
            .insert_astronaut_detail(&new_detail)
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent insert for the same person.
                RepositoryError::ConflictError { .. } => {
                    ServiceError::Conflict(DUPLICATE_DETAIL_MESSAGE.to_string())
                }
                other => other.into(),
            })?;

        info!(person_id = %detail.person_id, detail_id = %detail.id, "AstronautDetail created");
        Ok(detail)
    }
}

/// Every astronaut detail on record.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAstronautDetails;

#[async_trait]
impl Request for GetAstronautDetails {
    type Response = Vec<AstronautDetail>;
    const NAME: &'static str = "GetAstronautDetails";

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response> {
        Ok(repo.list_astronaut_details().await?)
    }
}
