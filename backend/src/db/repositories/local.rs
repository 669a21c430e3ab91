//! In-memory repository for unit testing and local development.
//!
//! All tables live behind one `RwLock`, which gives every write the same
//! all-or-nothing behaviour a database transaction would.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::db::repository::{
    AstronautRepository, ErrorContext, PersonRepository, RepositoryError, RepositoryResult,
};
use crate::models::{
    AstronautDetail, AstronautDetailId, AstronautDuty, AstronautDutyId, NewAstronautDetail,
    NewAstronautDuty, Person, PersonAstronaut, PersonId,
};

#[derive(Debug, Default)]
struct Tables {
    people: BTreeMap<PersonId, Person>,
    details: BTreeMap<AstronautDetailId, AstronautDetail>,
    duties: BTreeMap<AstronautDutyId, AstronautDuty>,
    next_person_id: i64,
    next_detail_id: i64,
    next_duty_id: i64,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<PersonId>) -> bool {
        self.people
            .values()
            .any(|p| p.name == name && Some(p.id) != except)
    }

    fn detail_for(&self, person_id: PersonId) -> Option<&AstronautDetail> {
        self.details.values().find(|d| d.person_id == person_id)
    }

    fn person_astronaut(&self, person: &Person) -> PersonAstronaut {
        PersonAstronaut::from_parts(person.clone(), self.detail_for(person.id))
    }

    fn require_person(&self, person_id: PersonId, operation: &str) -> RepositoryResult<()> {
        if self.people.contains_key(&person_id) {
            Ok(())
        } else {
            Err(RepositoryError::ValidationError {
                message: format!("Person {} does not exist", person_id),
                context: ErrorContext::new(operation)
                    .with_entity("person")
                    .with_entity_id(person_id),
            })
        }
    }
}

/// In-memory implementation of the repository traits.
#[derive(Debug, Default)]
pub struct LocalRepository {
    tables: RwLock<Tables>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn insert_person(&self, name: &str) -> RepositoryResult<Person> {
        let mut tables = self.tables.write();
        if tables.name_taken(name, None) {
            return Err(RepositoryError::conflict_with_context(
                format!("Person with name '{}' already exists", name),
                ErrorContext::new("insert_person").with_entity("person"),
            ));
        }

        tables.next_person_id += 1;
        let person = Person {
            id: PersonId::new(tables.next_person_id),
            name: name.to_string(),
        };
        tables.people.insert(person.id, person.clone());
        Ok(person)
    }

    async fn list_people(&self) -> RepositoryResult<Vec<PersonAstronaut>> {
        let tables = self.tables.read();
        Ok(tables
            .people
            .values()
            .map(|p| tables.person_astronaut(p))
            .collect())
    }

    async fn find_person_by_id(&self, person_id: PersonId) -> RepositoryResult<Option<Person>> {
        Ok(self.tables.read().people.get(&person_id).cloned())
    }

    async fn find_person_by_name(&self, name: &str) -> RepositoryResult<Option<Person>> {
        Ok(self
            .tables
            .read()
            .people
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn find_person_astronaut_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<PersonAstronaut>> {
        let tables = self.tables.read();
        Ok(tables
            .people
            .values()
            .find(|p| p.name == name)
            .map(|p| tables.person_astronaut(p)))
    }

    async fn rename_person(&self, person_id: PersonId, new_name: &str) -> RepositoryResult<Person> {
        let mut tables = self.tables.write();
        if tables.name_taken(new_name, Some(person_id)) {
            return Err(RepositoryError::conflict_with_context(
                format!("Person with name '{}' already exists", new_name),
                ErrorContext::new("rename_person")
                    .with_entity("person")
                    .with_entity_id(person_id),
            ));
        }

        let person = tables.people.get_mut(&person_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "Person not found",
                ErrorContext::new("rename_person")
                    .with_entity("person")
                    .with_entity_id(person_id),
            )
        })?;
        person.name = new_name.to_string();
        Ok(person.clone())
    }
}

#[async_trait]
impl AstronautRepository for LocalRepository {
    async fn list_astronaut_details(&self) -> RepositoryResult<Vec<AstronautDetail>> {
        Ok(self.tables.read().details.values().cloned().collect())
    }

    async fn find_astronaut_detail(
        &self,
        person_id: PersonId,
    ) -> RepositoryResult<Option<AstronautDetail>> {
        Ok(self.tables.read().detail_for(person_id).cloned())
    }

    async fn insert_astronaut_detail(
        &self,
        detail: &NewAstronautDetail,
    ) -> RepositoryResult<AstronautDetail> {
        let mut tables = self.tables.write();
        tables.require_person(detail.person_id, "insert_astronaut_detail")?;
        if tables.detail_for(detail.person_id).is_some() {
            return Err(RepositoryError::conflict_with_context(
                "Person already has an AstronautDetail",
                ErrorContext::new("insert_astronaut_detail")
                    .with_entity("astronaut_detail")
                    .with_entity_id(detail.person_id),
            ));
        }

        tables.next_detail_id += 1;
        let row = detail
            .clone()
            .into_detail(AstronautDetailId::new(tables.next_detail_id));
        tables.details.insert(row.id, row.clone());
        Ok(row)
    }

    async fn count_astronaut_duties(&self, person_id: PersonId) -> RepositoryResult<u64> {
        Ok(self
            .tables
            .read()
            .duties
            .values()
            .filter(|d| d.person_id == person_id)
            .count() as u64)
    }

    async fn list_astronaut_duties(
        &self,
        person_id: PersonId,
    ) -> RepositoryResult<Vec<AstronautDuty>> {
        let tables = self.tables.read();
        let mut duties: Vec<AstronautDuty> = tables
            .duties
            .values()
            .filter(|d| d.person_id == person_id)
            .cloned()
            .collect();
        duties.sort_by(|a, b| {
            b.duty_start_date
                .cmp(&a.duty_start_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(duties)
    }

    async fn insert_astronaut_duty(
        &self,
        duty: &NewAstronautDuty,
    ) -> RepositoryResult<AstronautDuty> {
        let mut tables = self.tables.write();
        tables.require_person(duty.person_id, "insert_astronaut_duty")?;

        let closed_at = duty.previous_duty_end();
        for open in tables.duties.values_mut().filter(|d| {
            d.person_id == duty.person_id && d.is_open() && d.duty_start_date < duty.duty_start_date
        }) {
            open.duty_end_date = Some(closed_at);
        }

        if let Some(detail) = tables
            .details
            .values_mut()
            .find(|d| d.person_id == duty.person_id)
        {
            detail.current_rank = duty.rank.clone();
            detail.current_duty_title = duty.duty_title.clone();
            if duty.is_retirement() {
                detail.career_end_date = Some(closed_at);
            }
        }

        tables.next_duty_id += 1;
        let row = duty
            .clone()
            .into_duty(AstronautDutyId::new(tables.next_duty_id));
        tables.duties.insert(row.id, row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn new_duty(person_id: PersonId, title: &str, year: i32) -> NewAstronautDuty {
        NewAstronautDuty {
            person_id,
            rank: "1LT".to_string(),
            duty_title: title.to_string(),
            duty_start_date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = LocalRepository::new();
        let a = repo.insert_person("A").await.unwrap();
        let b = repo.insert_person("B").await.unwrap();
        assert!(a.id < b.id);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let repo = LocalRepository::new();
        repo.insert_person("A").await.unwrap();
        let err = repo.insert_person("A").await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConflictError { .. }));
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let repo = LocalRepository::new();
        let a = repo.insert_person("A").await.unwrap();
        let renamed = repo.rename_person(a.id, "A").await.unwrap();
        assert_eq!(renamed.name, "A");
    }

    #[tokio::test]
    async fn test_rename_missing_person_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .rename_person(PersonId::new(99), "Z")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_insert_duty_closes_open_duties() {
        let repo = LocalRepository::new();
        let p = repo.insert_person("A").await.unwrap();
        let first = repo
            .insert_astronaut_duty(&new_duty(p.id, "Pilot", 2010))
            .await
            .unwrap();
        repo.insert_astronaut_duty(&new_duty(p.id, "Commander", 2015))
            .await
            .unwrap();

        let duties = repo.list_astronaut_duties(p.id).await.unwrap();
        assert_eq!(duties.len(), 2);
        assert_eq!(duties[0].duty_title, "Commander");
        assert!(duties[0].is_open());
        assert_eq!(duties[1].id, first.id);
        assert_eq!(
            duties[1].duty_end_date,
            Some(Utc.with_ymd_and_hms(2014, 12, 31, 0, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_detail_requires_existing_person() {
        let repo = LocalRepository::new();
        let err = repo
            .insert_astronaut_detail(&NewAstronautDetail {
                person_id: PersonId::new(5),
                current_rank: "CPT".to_string(),
                current_duty_title: "Pilot".to_string(),
                career_start_date: Utc::now(),
                career_end_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert!(repo.list_astronaut_details().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_earlier_duty_leaves_later_open_duty_alone() {
        let repo = LocalRepository::new();
        let p = repo.insert_person("A").await.unwrap();
        repo.insert_astronaut_duty(&new_duty(p.id, "Commander", 2020))
            .await
            .unwrap();
        repo.insert_astronaut_duty(&new_duty(p.id, "Pilot", 2010))
            .await
            .unwrap();

        let duties = repo.list_astronaut_duties(p.id).await.unwrap();
        assert_eq!(duties[0].duty_title, "Commander");
        assert!(duties[0].is_open());
        for duty in &duties {
            if let Some(end) = duty.duty_end_date {
                assert!(end >= duty.duty_start_date);
            }
        }
    }

    #[tokio::test]
    async fn test_insert_duty_syncs_detail_in_same_call() {
        let repo = LocalRepository::new();
        let p = repo.insert_person("A").await.unwrap();
        repo.insert_astronaut_duty(&new_duty(p.id, "Pilot", 2010))
            .await
            .unwrap();
        repo.insert_astronaut_detail(&NewAstronautDetail {
            person_id: p.id,
            current_rank: "1LT".to_string(),
            current_duty_title: "Pilot".to_string(),
            career_start_date: Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap(),
            career_end_date: None,
        })
        .await
        .unwrap();

        repo.insert_astronaut_duty(&new_duty(p.id, "RETIRED", 2020))
            .await
            .unwrap();

        let detail = repo.find_astronaut_detail(p.id).await.unwrap().unwrap();
        assert_eq!(detail.current_duty_title, "RETIRED");
        assert_eq!(
            detail.career_end_date,
            Some(Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap())
        );
    }
}
