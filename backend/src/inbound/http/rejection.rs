//! Rendering of business-rule outcomes.
//!
//! Rule violations are answered with the bare message as a JSON string. The
//! status code depends on [`RejectionStatus`].

use std::str::FromStr;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::info;

use crate::domain::{GuestListOutcome, GuestListRejection};

use super::error::status_for;

/// Status code policy for rejected requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RejectionStatus {
    /// Always answer 200, as existing clients expect.
    #[default]
    Compatible,
    /// Answer with the rejection's category (400, 404 or 409).
    Mapped,
}

impl RejectionStatus {
    fn status_for(self, rejection: &GuestListRejection) -> StatusCode {
        match self {
            Self::Compatible => StatusCode::OK,
            Self::Mapped => status_for(rejection.code()),
        }
    }
}

/// Error returned for unrecognised [`RejectionStatus`] names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rejection status policy {0:?}")]
pub struct UnknownRejectionStatus(String);

impl FromStr for RejectionStatus {
    type Err = UnknownRejectionStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compatible" => Ok(Self::Compatible),
            "mapped" => Ok(Self::Mapped),
            _ => Err(UnknownRejectionStatus(s.to_owned())),
        }
    }
}

/// Turn an outcome into a response: the payload with 200 when accepted, the
/// rejection message otherwise.
pub(crate) fn outcome_response<T: Serialize>(
    outcome: GuestListOutcome<T>,
    policy: RejectionStatus,
) -> HttpResponse {
    match outcome {
        GuestListOutcome::Accepted(body) => HttpResponse::Ok().json(body),
        GuestListOutcome::Rejected(rejection) => {
            info!(code = ?rejection.code(), reason = %rejection, "guest list request rejected");
            HttpResponse::build(policy.status_for(&rejection)).json(rejection.to_string())
        }
    }
}
