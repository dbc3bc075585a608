use super::clients::*;
use super::config::PortalConfig;
use protos::ag;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use tokio_test::block_on;

async fn logged_in_client(mock: AutograderClient) -> Client {
    let client = Client::tracked(super::app().manage(mock))
        .await
        .expect("valid rocket instance");
    let response = client
        .post("/api/login")
        .header(ContentType::Form)
        .body("user_id=1")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/courses"));
    drop(response);
    client
}

fn mock() -> AutograderClient {
    get_autograder_client(&PortalConfig::default()).unwrap()
}

#[test]
fn pages_need_login() {
    block_on(async {
        let client = Client::tracked(super::app().manage(mock())).await.unwrap();
        let response = client.get("/courses/1/lab/1").dispatch().await;
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(response.headers().get_one("Location"), Some("/"));
    });
}

#[test]
fn login_is_refused_for_unknown_user() {
    block_on(async {
        let mut mock = mock();
        mock.get_user_set_err(tonic::Status::not_found("no user"));
        let client = Client::tracked(super::app().manage(mock)).await.unwrap();
        let response = client
            .post("/api/login")
            .header(ContentType::Form)
            .body("user_id=5")
            .dispatch()
            .await;
        assert_eq!(response.headers().get_one("Location"), Some("/"));
    });
}

#[test]
fn lab_with_tests_only_shows_score_table() {
    block_on(async {
        let client = logged_in_client(mock()).await;
        let response = client.get("/courses/1/lab/1").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().await.unwrap();
        assert!(body.contains("lab1"));
        assert!(body.contains("--- PASS: TestLab1"));
        assert!(body.contains("id=\"score-table\""));
        assert!(!body.contains("id=\"release\""));
    });
}

#[test]
fn lab_without_submission_offers_first_build() {
    block_on(async {
        let mock = mock();
        let client = logged_in_client(mock.clone()).await;
        let response = client.get("/courses/1/lab/3").dispatch().await;
        let body = response.into_string().await.unwrap();
        assert!(body.contains("No submissions yet"));
        assert!(body.contains("First build"));
        assert!(!body.contains("id=\"result\""));

        let response = client.post("/api/courses/1/lab/3/build").dispatch().await;
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(
            response.headers().get_one("Location"),
            Some("/courses/1/lab/3")
        );
        let builds = mock.calls_to("build_submission");
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].user.as_deref(), Some("1"));
        assert!(builds[0].request.contains("assignment_id: 3"));
    });
}

#[test]
fn released_review_lists_ready_reviewers() {
    block_on(async {
        let client = logged_in_client(mock()).await;
        let body = client
            .get("/courses/1/lab/2")
            .dispatch()
            .await
            .into_string()
            .await
            .unwrap();
        assert!(body.contains("id=\"release\""));
        assert!(body.contains("reviewer-2"));
        assert!(!body.contains("id=\"score-table\""));
    });
}

#[test]
fn unknown_lab_is_not_found() {
    block_on(async {
        let client = logged_in_client(mock()).await;
        let response = client.get("/courses/1/lab/99").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    });
}

#[test]
fn teacher_updates_status() {
    block_on(async {
        let mock = mock();
        let client = logged_in_client(mock.clone()).await;
        let response = client.get("/teacher/courses/1/lab/1/1").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().await.unwrap().contains("Rebuild"));

        let response = client
            .post("/api/teacher/courses/1/lab/1/1/status/10")
            .header(ContentType::Form)
            .body("status=Bogus")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);

        let response = client
            .post("/api/teacher/courses/1/lab/1/1/status/10")
            .header(ContentType::Form)
            .body("status=Rejected")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::SeeOther);
        let updates = mock.calls_to("update_submission");
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].user.as_deref(), Some("1"));
        assert!(updates[0].request.contains("submission_id: 10"));
        assert!(updates[0].request.contains("status: Rejected"));
    });
}

#[test]
fn students_cannot_rebuild() {
    block_on(async {
        let mut mock = mock();
        mock.get_enrollments_by_user_set(protos::ag::Enrollments {
            enrollments: vec![protos::ag::Enrollment {
                course_id: 1,
                user_id: 1,
                status: protos::ag::enrollment::UserStatus::Student as i32,
                ..Default::default()
            }],
        });
        let client = logged_in_client(mock.clone()).await;
        let response = client
            .post("/api/teacher/courses/1/lab/1/1/rebuild/10")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Forbidden);
        assert!(mock.calls_to("rebuild_submission").is_empty());
    });
}

#[test]
fn teacher_rebuilds_submission() {
    block_on(async {
        let mock = mock();
        let client = logged_in_client(mock.clone()).await;
        let response = client
            .post("/api/teacher/courses/1/lab/1/1/rebuild/10")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(
            response.headers().get_one("Location"),
            Some("/teacher/courses/1/lab/1/1")
        );
        let rebuilds = mock.calls_to("rebuild_submission");
        assert_eq!(rebuilds.len(), 1);
        assert_eq!(rebuilds[0].user.as_deref(), Some("1"));
        assert!(rebuilds[0]
            .request
            .contains("assignment_id: 1, submission_id: 10"));
    });
}

fn group_lab_mock() -> AutograderClient {
    let mut mock = mock();
    mock.get_assignments_set(ag::Assignments {
        assignments: vec![ag::Assignment {
            id: 4,
            course_id: 1,
            name: String::from("lab4"),
            deadline: String::from("2021-04-15T12:00:00"),
            is_group_lab: true,
            score_limit: 80,
            ..Default::default()
        }],
    });
    // in group 5, but the group itself is not embedded
    mock.get_enrollments_by_user_set(ag::Enrollments {
        enrollments: vec![ag::Enrollment {
            course_id: 1,
            user_id: 1,
            group_id: 5,
            status: ag::enrollment::UserStatus::Student as i32,
            used_slip_days: vec![ag::UsedSlipDays {
                assignment_id: 4,
                used_slip_days: 2,
                ..Default::default()
            }],
            ..Default::default()
        }],
    });
    mock.get_submissions_set(ag::Submissions {
        submissions: vec![ag::Submission {
            id: 20,
            assignment_id: 4,
            group_id: 5,
            score: 85,
            build_info: Some(ag::BuildInfo {
                build_date: String::from("2021-04-14T10:00:00"),
                build_log: String::from("ok"),
                ..Default::default()
            }),
            ..Default::default()
        }],
    });
    mock
}

#[test]
fn group_lab_without_group_name_shows_student() {
    block_on(async {
        let client = logged_in_client(group_lab_mock()).await;
        let response = client.get("/courses/1/lab/4").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().await.unwrap();
        assert!(body.contains("lab4"));
        assert!(body.contains("Ola Nordmann"));
        assert!(body.contains("2 used on this lab"));
    });
}

#[test]
fn group_lab_is_built_for_the_group() {
    block_on(async {
        let mock = group_lab_mock();
        let client = logged_in_client(mock.clone()).await;
        let response = client.post("/api/courses/1/lab/4/build").dispatch().await;
        assert_eq!(response.status(), Status::SeeOther);
        let builds = mock.calls_to("build_submission");
        assert_eq!(builds.len(), 1);
        assert!(builds[0].request.contains("assignment_id: 4"));
        assert!(builds[0].request.contains("user_id: 1"));
        assert!(builds[0].request.contains("group_id: 5"));
    });
}
