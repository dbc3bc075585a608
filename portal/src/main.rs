use rocket::fairing::{self, AdHoc};
use rocket::*;
use rocket_dyn_templates::Template;

#[cfg(feature = "mock")]
mod clients {
    use super::config::PortalConfig;
    pub use protos::ag::autograder_service_server::AutograderService;
    use protos::ag::{self, enrollment, submission};
    // client for testing
    pub type AutograderClient = ag::MockAutograderService;
    use fake::{Fake, Faker};
    pub fn get_autograder_client(_config: &PortalConfig) -> Result<AutograderClient, String> {
        let mut mock = ag::MockAutograderService::default();

        let user = ag::User {
            id: 1,
            name: String::from("Ola Nordmann"),
            login: String::from("ola"),
            ..Faker.fake()
        };
        mock.get_user_set(user.clone());

        let course = ag::Course {
            id: 1,
            name: String::from("Operating Systems"),
            code: String::from("DAT320"),
            year: 2021,
            slip_days: 7,
            ..Faker.fake()
        };
        mock.get_course_set(course.clone());
        mock.get_courses_by_user_set(ag::Courses {
            courses: vec![course],
        });
        mock.get_enrollments_by_user_set(ag::Enrollments {
            enrollments: vec![ag::Enrollment {
                course_id: 1,
                user_id: 1,
                group_id: 0,
                user: Some(user.clone()),
                course: None,
                group: None,
                status: enrollment::UserStatus::Teacher as i32,
                used_slip_days: vec![],
                ..Faker.fake()
            }],
        });
        mock.get_enrollments_by_course_set(ag::Enrollments {
            enrollments: vec![ag::Enrollment {
                course_id: 1,
                user_id: 1,
                group_id: 0,
                user: Some(user),
                course: None,
                group: None,
                status: enrollment::UserStatus::Student as i32,
                used_slip_days: vec![],
                ..Faker.fake()
            }],
        });

        mock.get_assignments_set(ag::Assignments {
            assignments: vec![
                ag::Assignment {
                    id: 1,
                    course_id: 1,
                    name: String::from("lab1"),
                    deadline: String::from("2021-01-15 12:00"),
                    order: 1,
                    is_group_lab: false,
                    score_limit: 80,
                    reviewers: 0,
                    grading_benchmarks: vec![],
                    ..Faker.fake()
                },
                ag::Assignment {
                    id: 2,
                    course_id: 1,
                    name: String::from("lab2"),
                    deadline: String::from("2021-02-15T12:00:00"),
                    order: 2,
                    is_group_lab: false,
                    score_limit: 80,
                    reviewers: 1,
                    grading_benchmarks: vec![],
                    ..Faker.fake()
                },
                ag::Assignment {
                    id: 3,
                    course_id: 1,
                    name: String::from("lab3"),
                    deadline: String::from("2021-03-15T12:00:00"),
                    order: 3,
                    is_group_lab: false,
                    score_limit: 80,
                    reviewers: 0,
                    grading_benchmarks: vec![],
                    ..Faker.fake()
                },
            ],
        });

        let build_info = ag::BuildInfo {
            build_date: String::from("2021-01-14T10:00:00"),
            build_log: String::from("running tests\n--- PASS: TestLab1\nok"),
            exec_time: 1200,
            ..Faker.fake()
        };
        mock.get_submissions_set(ag::Submissions {
            submissions: vec![
                ag::Submission {
                    id: 10,
                    assignment_id: 1,
                    user_id: 1,
                    group_id: 0,
                    score: 90,
                    released: false,
                    status: submission::Status::Approved as i32,
                    reviews: vec![],
                    build_info: Some(build_info.clone()),
                    scores: Faker.fake(),
                    ..Faker.fake()
                },
                ag::Submission {
                    id: 11,
                    assignment_id: 2,
                    user_id: 1,
                    group_id: 0,
                    score: 75,
                    released: true,
                    status: submission::Status::Revision as i32,
                    reviews: vec![ag::Review {
                        reviewer_id: 2,
                        ready: true,
                        ..Faker.fake()
                    }],
                    build_info: Some(build_info),
                    scores: vec![],
                    ..Faker.fake()
                },
            ],
        });

        mock.build_submission_set(Faker.fake());
        mock.rebuild_submission_set(Faker.fake());
        mock.update_submission_set(ag::Void {});

        Ok(mock)
    }
}

#[cfg(not(feature = "mock"))]
mod clients {
    use super::config::PortalConfig;
    use protos::ag::autograder_service_client;
    use tonic::transport::Channel;
    // client for production
    pub type AutograderClient = autograder_service_client::AutograderServiceClient<Channel>;
    pub fn get_autograder_client(config: &PortalConfig) -> Result<AutograderClient, String> {
        protos::utils::get_new_channel(&config.autograder_addr)
            .map(AutograderClient::new)
            .map_err(|e| e.to_string())
    }
}

mod actions;
mod auth;
mod config;
mod error;
mod lab_result;
mod labs;
mod links;

// route tests need the mock client: cargo test --features mock
#[cfg(all(test, feature = "mock"))]
mod tests;

async fn attach_client(rocket: Rocket<Build>) -> fairing::Result {
    let config = rocket
        .state::<config::PortalConfig>()
        .cloned()
        .unwrap_or_default();
    match clients::get_autograder_client(&config) {
        Ok(client) => {
            ::log::info!("using autograder service at {}", config.autograder_addr);
            Ok(rocket.manage(client))
        }
        Err(e) => {
            ::log::error!(
                "cannot reach autograder service at {}: {}",
                config.autograder_addr, e
            );
            Err(rocket)
        }
    }
}

/// The portal without its autograder client.
pub fn app() -> Rocket<Build> {
    rocket::build()
        .attach(AdHoc::config::<config::PortalConfig>())
        .mount(
            "/",
            routes![
                auth::root,
                auth::not_logged_redirect,
                auth::login,
                auth::logout,
                labs::root_logged,
                labs::courses,
                labs::course,
                labs::student_lab,
                labs::teacher_lab,
                labs::build,
                labs::rebuild,
                labs::update_status,
            ],
        )
        .attach(Template::fairing())
}

#[launch]
fn rocket() -> _ {
    app().attach(AdHoc::try_on_ignite("Autograder client", attach_client))
}
