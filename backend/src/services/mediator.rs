//! Request dispatch.
//!
//! Every command and query is a plain struct implementing [`Request`]. The
//! [`Mediator`] owns the repository handle and runs a request's handler.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::{ServiceError, ServiceResult};
use crate::db::repository::FullRepository;

/// A command or query together with its handler.
#[async_trait]
pub trait Request: Send + Sized {
    /// Value produced on success.
    type Response: Send;

    /// Name used in logs.
    const NAME: &'static str;

    async fn handle(self, repo: &dyn FullRepository) -> ServiceResult<Self::Response>;
}

/// Dispatches requests against a shared repository.
#[derive(Clone)]
pub struct Mediator {
    repository: Arc<dyn FullRepository>,
}

impl Mediator {
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn FullRepository> {
        &self.repository
    }

    pub async fn send<R: Request>(&self, request: R) -> ServiceResult<R::Response> {
        debug!(request = R::NAME, "Dispatching request");
        let result = request.handle(self.repository.as_ref()).await;
        match &result {
            Ok(_) => debug!(request = R::NAME, "Request succeeded"),
            Err(ServiceError::Repository(e)) => {
                warn!(request = R::NAME, error = %e, "Request failed in repository")
            }
            Err(e) => debug!(request = R::NAME, reason = %e, "Request rejected"),
        }
        result
    }
}
