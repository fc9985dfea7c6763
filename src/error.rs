use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why a single patch entry could not be written to a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("no field named `{0}`")]
    FieldNotFound(String),

    #[error("field `{field}` has unsupported type {type_name}")]
    UnsupportedField {
        field: String,
        type_name: &'static str,
    },

    #[error("cannot coerce {value} into {expected} for field `{field}`: {reason}")]
    Coercion {
        field: String,
        expected: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Failed to patch field: {field}")]
    InvalidOperation {
        field: String,
        #[source]
        source: PatchError,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ProfileError {
    pub fn invalid_operation(source: PatchError) -> Self {
        let field = match &source {
            PatchError::FieldNotFound(field) => field.clone(),
            PatchError::UnsupportedField { field, .. } => field.clone(),
            PatchError::Coercion { field, .. } => field.clone(),
        };
        ProfileError::InvalidOperation { field, source }
    }

    /// The patch failure behind an `InvalidOperation`, if that is what this is.
    pub fn patch_error(&self) -> Option<&PatchError> {
        match self {
            ProfileError::InvalidOperation { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type ProfileResult<T> = Result<T, ProfileError>;

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        let status = match self {
            ProfileError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProfileError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ProfileError::InvalidOperation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ProfileError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            ProfileError::InvalidOperation { source, .. } => format!("{self}: {source}"),
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (ProfileError::NotFound("User".into()), StatusCode::NOT_FOUND),
            (ProfileError::InvalidArgument("User ID cannot be null"), StatusCode::BAD_REQUEST),
            (
                ProfileError::invalid_operation(PatchError::FieldNotFound("shoeSize".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ProfileError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn invalid_operation_keeps_the_patch_cause() {
        let err = ProfileError::invalid_operation(PatchError::Coercion {
            field: "familySize".into(),
            expected: "integer",
            value: "\"four\"".into(),
            reason: "invalid digit found in string".into(),
        });

        assert_eq!(err.to_string(), "Failed to patch field: familySize");
        assert!(matches!(err.patch_error(), Some(PatchError::Coercion { .. })));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert!(source.unwrap().contains("integer"));
    }
}
