//! Person records and the person/astronaut read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AstronautDetail;

crate::define_id_type!(i64, PersonId);

/// A named individual. Names are unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

/// A person joined with its (optional) astronaut detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAstronaut {
    pub person_id: PersonId,
    pub name: String,
    pub current_rank: Option<String>,
    pub current_duty_title: Option<String>,
    pub career_start_date: Option<DateTime<Utc>>,
    pub career_end_date: Option<DateTime<Utc>>,
}

impl PersonAstronaut {
    /// Build the read model from a person row and the detail row it owns, if any.
    pub fn from_parts(person: Person, detail: Option<&AstronautDetail>) -> Self {
        Self {
            person_id: person.id,
            name: person.name,
            current_rank: detail.map(|d| d.current_rank.clone()),
            current_duty_title: detail.map(|d| d.current_duty_title.clone()),
            career_start_date: detail.map(|d| d.career_start_date),
            career_end_date: detail.and_then(|d| d.career_end_date),
        }
    }

    /// Whether this person has an astronaut detail on record.
    pub fn is_astronaut(&self) -> bool {
        self.current_duty_title.is_some()
    }
}
