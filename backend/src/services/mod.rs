//! Service layer: commands, queries and their handlers.
//!
//! This module sits between the HTTP layer and the repository. Each operation
//! is a request struct dispatched through the [`Mediator`], which hands it the
//! shared repository. Handlers enforce the business rules:
//!
//! - person names are unique and non-blank
//! - an astronaut detail needs an existing person with at least one duty
//! - a person has at most one astronaut detail
//! - a new duty closes the open one and keeps the detail current

pub mod astronaut_detail;
pub mod astronaut_duty;
pub mod error;
pub mod mediator;
pub mod person;

pub use astronaut_detail::{CreateAstronautDetail, GetAstronautDetails};
pub use astronaut_duty::{CreateAstronautDuty, GetAstronautDutiesByName, PersonDuties};
pub use error::{ServiceError, ServiceResult};
pub use mediator::{Mediator, Request};
pub use person::{CreatePerson, Created, GetPeople, GetPersonByName, UpdatePerson};
