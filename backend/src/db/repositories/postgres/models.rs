use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{astronaut_detail, astronaut_duty, person};
use crate::models::{
    AstronautDetail, AstronautDetailId, AstronautDuty, AstronautDutyId, NewAstronautDetail,
    NewAstronautDuty, Person, PersonId,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = person)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PersonRow {
    pub id: i64,
    pub name: String,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: PersonId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = person)]
pub struct NewPersonRow<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = astronaut_detail)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AstronautDetailRow {
    pub id: i64,
    pub person_id: i64,
    pub current_rank: String,
    pub current_duty_title: String,
    pub career_start_date: DateTime<Utc>,
    pub career_end_date: Option<DateTime<Utc>>,
}

impl From<AstronautDetailRow> for AstronautDetail {
    fn from(row: AstronautDetailRow) -> Self {
        AstronautDetail {
            id: AstronautDetailId::new(row.id),
            person_id: PersonId::new(row.person_id),
            current_rank: row.current_rank,
            current_duty_title: row.current_duty_title,
            career_start_date: row.career_start_date,
            career_end_date: row.career_end_date,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = astronaut_detail)]
pub struct NewAstronautDetailRow {
    pub person_id: i64,
    pub current_rank: String,
    pub current_duty_title: String,
    pub career_start_date: DateTime<Utc>,
    pub career_end_date: Option<DateTime<Utc>>,
}

impl From<&NewAstronautDetail> for NewAstronautDetailRow {
    fn from(detail: &NewAstronautDetail) -> Self {
        Self {
            person_id: detail.person_id.value(),
            current_rank: detail.current_rank.clone(),
            current_duty_title: detail.current_duty_title.clone(),
            career_start_date: detail.career_start_date,
            career_end_date: detail.career_end_date,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = astronaut_duty)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AstronautDutyRow {
    pub id: i64,
    pub person_id: i64,
    pub rank: String,
    pub duty_title: String,
    pub duty_start_date: DateTime<Utc>,
    pub duty_end_date: Option<DateTime<Utc>>,
}

impl From<AstronautDutyRow> for AstronautDuty {
    fn from(row: AstronautDutyRow) -> Self {
        AstronautDuty {
            id: AstronautDutyId::new(row.id),
            person_id: PersonId::new(row.person_id),
            rank: row.rank,
            duty_title: row.duty_title,
            duty_start_date: row.duty_start_date,
            duty_end_date: row.duty_end_date,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = astronaut_duty)]
pub struct NewAstronautDutyRow {
    pub person_id: i64,
    pub rank: String,
    pub duty_title: String,
    pub duty_start_date: DateTime<Utc>,
}

impl From<&NewAstronautDuty> for NewAstronautDutyRow {
    fn from(duty: &NewAstronautDuty) -> Self {
        Self {
            person_id: duty.person_id.value(),
            rank: duty.rank.clone(),
            duty_title: duty.duty_title.clone(),
            duty_start_date: duty.duty_start_date,
        }
    }
}

/// Flat row of `person LEFT JOIN astronaut_detail`.
pub type PersonAstronautTuple = (
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<DateTime<Utc>>,
    Option<DateTime<Utc>>,
);
