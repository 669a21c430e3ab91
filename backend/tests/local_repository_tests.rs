//! Tests for the in-memory LocalRepository.
//!
//! Covers store-level constraints and concurrent access from many tasks.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use stargate_api::db::repositories::LocalRepository;
use stargate_api::db::repository::{AstronautRepository, PersonRepository, RepositoryError};
use stargate_api::models::{NewAstronautDetail, NewAstronautDuty, PersonId};

fn detail_for(person_id: PersonId) -> NewAstronautDetail {
    NewAstronautDetail {
        person_id,
        current_rank: "CPT".to_string(),
        current_duty_title: "Pilot".to_string(),
        career_start_date: Utc.with_ymd_and_hms(2018, 3, 1, 0, 0, 0).unwrap(),
        career_end_date: None,
    }
}

fn duty_for(person_id: PersonId, title: &str, year: i32) -> NewAstronautDuty {
    NewAstronautDuty {
        person_id,
        rank: "CPT".to_string(),
        duty_title: title.to_string(),
        duty_start_date: Utc.with_ymd_and_hms(year, 3, 1, 0, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_empty_repository() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.unwrap());
    assert!(repo.list_people().await.unwrap().is_empty());
    assert!(repo.list_astronaut_details().await.unwrap().is_empty());
    assert!(repo.find_person_by_name("Nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_people_in_id_order_with_details() {
    let repo = LocalRepository::new();
    let a = repo.insert_person("Alpha").await.unwrap();
    let b = repo.insert_person("Bravo").await.unwrap();
    repo.insert_astronaut_detail(&detail_for(b.id)).await.unwrap();

    let people = repo.list_people().await.unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].person_id, a.id);
    assert!(!people[0].is_astronaut());
    assert_eq!(people[1].person_id, b.id);
    assert_eq!(people[1].current_rank.as_deref(), Some("CPT"));
}

#[tokio::test]
async fn test_second_detail_for_person_conflicts() {
    let repo = LocalRepository::new();
    let p = repo.insert_person("Alpha").await.unwrap();
    repo.insert_astronaut_detail(&detail_for(p.id)).await.unwrap();

    let err = repo
        .insert_astronaut_detail(&detail_for(p.id))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConflictError { .. }));
    assert_eq!(repo.list_astronaut_details().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_onto_existing_name_conflicts() {
    let repo = LocalRepository::new();
    repo.insert_person("Alpha").await.unwrap();
    let b = repo.insert_person("Bravo").await.unwrap();

    let err = repo.rename_person(b.id, "Alpha").await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConflictError { .. }));
    assert_eq!(
        repo.find_person_by_id(b.id).await.unwrap().unwrap().name,
        "Bravo"
    );
}

#[tokio::test]
async fn test_duty_without_detail_creates_no_detail() {
    let repo = LocalRepository::new();
    let p = repo.insert_person("Alpha").await.unwrap();
    repo.insert_astronaut_duty(&duty_for(p.id, "RETIRED", 2020))
        .await
        .unwrap();

    assert!(repo.find_astronaut_detail(p.id).await.unwrap().is_none());
    assert!(repo.list_astronaut_details().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duty_for_missing_person_is_rejected() {
    let repo = LocalRepository::new();
    let err = repo
        .insert_astronaut_duty(&duty_for(PersonId::new(3), "Pilot", 2020))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
    assert_eq!(repo.count_astronaut_duties(PersonId::new(3)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_only_one_open_duty_after_many_inserts() {
    let repo = LocalRepository::new();
    let p = repo.insert_person("Alpha").await.unwrap();
    for (i, year) in (2000..2010).enumerate() {
        repo.insert_astronaut_duty(&duty_for(p.id, &format!("Post {}", i), year))
            .await
            .unwrap();
    }

    let duties = repo.list_astronaut_duties(p.id).await.unwrap();
    assert_eq!(duties.len(), 10);
    assert_eq!(duties.iter().filter(|d| d.is_open()).count(), 1);
    assert_eq!(duties[0].duty_title, "Post 9");
}

#[tokio::test]
async fn test_concurrent_inserts_get_unique_ids() {
    let repo = Arc::new(LocalRepository::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.insert_person(&format!("Person {}", i)).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}

#[tokio::test]
async fn test_concurrent_same_name_inserts_admit_one() {
    let repo = Arc::new(LocalRepository::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.insert_person("Same Name").await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(repo.list_people().await.unwrap().len(), 1);
}
