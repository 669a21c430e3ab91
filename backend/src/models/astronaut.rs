//! Astronaut career records: the per-person detail summary and individual duty assignments.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::PersonId;

crate::define_id_type!(i64, AstronautDetailId);
crate::define_id_type!(i64, AstronautDutyId);

/// Duty title that marks the end of an astronaut career.
pub const RETIRED_DUTY_TITLE: &str = "RETIRED";

/// Career summary. At most one per person, and only for people with a duty on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstronautDetail {
    pub id: AstronautDetailId,
    pub person_id: PersonId,
    pub current_rank: String,
    pub current_duty_title: String,
    pub career_start_date: DateTime<Utc>,
    pub career_end_date: Option<DateTime<Utc>>,
}

/// Insert shape for [`AstronautDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAstronautDetail {
    pub person_id: PersonId,
    pub current_rank: String,
    pub current_duty_title: String,
    pub career_start_date: DateTime<Utc>,
    pub career_end_date: Option<DateTime<Utc>>,
}

impl NewAstronautDetail {
    /// Materialize the row once the store has assigned an id.
    pub fn into_detail(self, id: AstronautDetailId) -> AstronautDetail {
        AstronautDetail {
            id,
            person_id: self.person_id,
            current_rank: self.current_rank,
            current_duty_title: self.current_duty_title,
            career_start_date: self.career_start_date,
            career_end_date: self.career_end_date,
        }
    }
}

/// A single duty assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstronautDuty {
    pub id: AstronautDutyId,
    pub person_id: PersonId,
    pub rank: String,
    pub duty_title: String,
    pub duty_start_date: DateTime<Utc>,
    pub duty_end_date: Option<DateTime<Utc>>,
}

impl AstronautDuty {
    pub fn is_open(&self) -> bool {
        self.duty_end_date.is_none()
    }
}

/// Insert shape for [`AstronautDuty`]. New duties are always open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAstronautDuty {
    pub person_id: PersonId,
    pub rank: String,
    pub duty_title: String,
    pub duty_start_date: DateTime<Utc>,
}

impl NewAstronautDuty {
    /// End date assigned to the person's previously open duties.
    pub fn previous_duty_end(&self) -> DateTime<Utc> {
        day_before(self.duty_start_date)
    }

    pub fn is_retirement(&self) -> bool {
        self.duty_title == RETIRED_DUTY_TITLE
    }

    pub fn into_duty(self, id: AstronautDutyId) -> AstronautDuty {
        AstronautDuty {
            id,
            person_id: self.person_id,
            rank: self.rank,
            duty_title: self.duty_title,
            duty_start_date: self.duty_start_date,
            duty_end_date: None,
        }
    }
}

pub fn day_before(date: DateTime<Utc>) -> DateTime<Utc> {
    date - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_previous_duty_end_is_one_day_earlier() {
        let duty = NewAstronautDuty {
            person_id: PersonId::new(1),
            rank: "1LT".to_string(),
            duty_title: "Pilot".to_string(),
            duty_start_date: Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap(),
        };
        assert_eq!(
            duty.previous_duty_end(),
            Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_retirement_title_is_exact_match() {
        let mut duty = NewAstronautDuty {
            person_id: PersonId::new(1),
            rank: "COL".to_string(),
            duty_title: RETIRED_DUTY_TITLE.to_string(),
            duty_start_date: Utc::now(),
        };
        assert!(duty.is_retirement());
        duty.duty_title = "Retired".to_string();
        assert!(!duty.is_retirement());
    }

    #[test]
    fn test_into_duty_is_open() {
        let duty = NewAstronautDuty {
            person_id: PersonId::new(2),
            rank: "CPT".to_string(),
            duty_title: "Commander".to_string(),
            duty_start_date: Utc::now(),
        }
        .into_duty(AstronautDutyId::new(9));
        assert!(duty.is_open());
        assert_eq!(duty.id.value(), 9);
    }
}
