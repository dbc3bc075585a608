use super::ag::{autograder_service_client::*, autograder_service_server::*, *};
use super::utils::*;
use std::sync::{Arc, Mutex};
use tokio_test::block_on;
use tonic::body::BoxBody;
use tonic::codegen::http;
use tower::ServiceBuilder;

#[test]
fn build_submission_reaches_service_path() {
    let mut mock = MockAutograderService::default();
    mock.build_submission_set(Submission {
        id: 7,
        assignment_id: 3,
        ..Default::default()
    });
    let paths = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = paths.clone();
    let channel = ServiceBuilder::new()
        .map_request(move |req: http::Request<BoxBody>| {
            seen.lock().unwrap().push(req.uri().path().to_string());
            req
        })
        .service(AutograderServiceServer::new(mock.clone()));
    let mut client = AutograderServiceClient::new(channel);

    let response = block_on(client.build_submission(with_user(
        11,
        BuildRequest {
            course_id: 1,
            assignment_id: 3,
            user_id: 11,
            group_id: 0,
        },
    )))
    .unwrap()
    .into_inner();

    assert_eq!(response.id, 7);
    assert_eq!(
        *paths.lock().unwrap(),
        vec![method_path("BuildSubmission")]
    );
    let calls = mock.calls_to("build_submission");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].user.as_deref(), Some("11"));
    assert!(calls[0].request.contains("assignment_id: 3"));
}

#[test]
fn unset_mock_method_is_internal_error() {
    let mock = MockAutograderService::default();
    let mut client = AutograderServiceClient::new(AutograderServiceServer::new(mock));
    let err = block_on(client.get_user(Void {})).unwrap_err();
    assert_eq!(err.code(), tonic::Code::Internal);
}

#[test]
fn mock_error_is_forwarded() {
    let mut mock = MockAutograderService::default();
    mock.get_course_set_err(tonic::Status::not_found("no such course"));
    let mut client = AutograderServiceClient::new(AutograderServiceServer::new(mock));
    let err = block_on(client.get_course(CourseRequest { course_id: 5 })).unwrap_err();
    assert_eq!(err.code(), tonic::Code::NotFound);
    assert_eq!(err.message(), "no such course");
}

#[test]
fn calls_are_shared_between_clones() {
    let mut mock = MockAutograderService::default();
    mock.rebuild_submission_set(Submission::default());
    mock.update_submission_set(Void {});
    let mut client = AutograderServiceClient::new(AutograderServiceServer::new(mock.clone()));
    block_on(client.rebuild_submission(RebuildRequest {
        assignment_id: 1,
        submission_id: 2,
    }))
    .unwrap();
    block_on(client.update_submission(UpdateSubmissionRequest {
        submission_id: 2,
        status: submission::Status::Approved as i32,
        ..Default::default()
    }))
    .unwrap();
    let methods: Vec<_> = mock.calls().into_iter().map(|c| c.method).collect();
    assert_eq!(methods, vec!["rebuild_submission", "update_submission"]);
    assert_eq!(mock.calls()[0].user, None);
}

#[test]
fn method_paths_are_fixed() {
    assert_eq!(method_path("GetUser"), "/ag.AutograderService/GetUser");
    assert_eq!(
        method_path("IsEmptyRepo"),
        "/ag.AutograderService/IsEmptyRepo"
    );
}

#[test]
fn build_log_of_unbuilt_submission_is_empty() {
    let mut submission = Submission::default();
    assert_eq!(submission.build_log(), "");
    submission.build_info = Some(BuildInfo {
        build_log: String::from("ok\ndone"),
        ..Default::default()
    });
    assert_eq!(submission.build_log(), "ok\ndone");
}

#[test]
fn status_names() {
    assert_eq!(submission::Status::Revision.to_string(), "Revision");
    assert_eq!(
        "Approved".parse::<submission::Status>().unwrap(),
        submission::Status::Approved
    );
}
