use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::Request;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("autograder call failed: {0}")]
    Rpc(#[from] tonic::Status),
    #[error("not enrolled in course {0}")]
    NotEnrolled(u64),
    #[error("not a teacher in course {0}")]
    NotTeacher(u64),
    #[error("assignment {0} not found")]
    AssignmentNotFound(u64),
    #[error("student {0} not found")]
    StudentNotFound(u64),
    #[error("invalid submission status {0:?}")]
    InvalidStatus(String),
}

impl PortalError {
    pub fn status(&self) -> Status {
        match self {
            PortalError::Rpc(s) => match s.code() {
                tonic::Code::NotFound => Status::NotFound,
                tonic::Code::PermissionDenied => Status::Forbidden,
                tonic::Code::Unauthenticated => Status::Unauthorized,
                _ => Status::InternalServerError,
            },
            PortalError::NotEnrolled(_) | PortalError::NotTeacher(_) => Status::Forbidden,
            PortalError::AssignmentNotFound(_) | PortalError::StudentNotFound(_) => Status::NotFound,
            PortalError::InvalidStatus(_) => Status::UnprocessableEntity,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for PortalError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        log::error!("{} {}: {}", req.method(), req.uri(), self);
        status::Custom(self.status(), self.to_string()).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_codes_map_to_http() {
        let err = PortalError::from(tonic::Status::not_found("gone"));
        assert_eq!(err.status(), Status::NotFound);
        let err = PortalError::from(tonic::Status::permission_denied("no"));
        assert_eq!(err.status(), Status::Forbidden);
        let err = PortalError::from(tonic::Status::unavailable("down"));
        assert_eq!(err.status(), Status::InternalServerError);
        assert!(err.to_string().starts_with("autograder call failed"));
    }

    #[test]
    fn access_errors_are_forbidden() {
        assert_eq!(PortalError::NotEnrolled(1).status(), Status::Forbidden);
        assert_eq!(PortalError::NotTeacher(1).status(), Status::Forbidden);
        assert_eq!(
            PortalError::InvalidStatus(String::from("x")).status(),
            Status::UnprocessableEntity
        );
    }
}
