//! Translation of driven-port failures into API errors.

use std::fmt::Display;

use serde_json::json;
use tracing::{error, warn};

use super::Error;
use super::ports::{APPLICATION_STUDENT_COURSE_KEY, RepositoryError, constrained_field};

/// Map a repository failure onto the API error taxonomy.
///
/// `entity` names the aggregate in the message, for example `"course"`.
pub(crate) fn map_repository_error(entity: &str, error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            warn!(entity, %message, "repository unavailable");
            Error::service_unavailable(format!("{entity} repository unavailable"))
        }
        RepositoryError::Query { message } => {
            error!(entity, %message, "repository query failed");
            Error::internal(format!("{entity} repository error: {message}"))
        }
        RepositoryError::Duplicate { constraint } => duplicate_error(entity, &constraint),
    }
}

/// `not_found` error naming the entity kind and the id that was looked up.
pub(crate) fn entity_not_found(entity: &str, id: impl Display) -> Error {
    let id = id.to_string();
    Error::not_found(format!("{entity} {id} not found"))
        .with_details(json!({ "entity": entity, "id": id }))
}

fn duplicate_error(entity: &str, constraint: &str) -> Error {
    let message = match (constraint, constrained_field(constraint)) {
        (APPLICATION_STUDENT_COURSE_KEY, _) => {
            "student has already applied to this course".to_owned()
        }
        (_, Some(field)) => format!("{entity} with this {field} already exists"),
        (_, None) => format!("{entity} already exists"),
    };
    Error::conflict(message).with_details(json!({
        "constraint": constraint,
        "field": constrained_field(constraint),
    }))
}
