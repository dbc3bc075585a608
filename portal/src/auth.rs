use super::clients::*;
use super::error::PortalError;
use protos::ag::{enrollment, Enrollment, EnrollmentRequest, EnrollmentStatusRequest, Void};
use protos::utils::with_user;
use rocket::form::{Form, Strict};
use rocket::http::{Cookie, CookieJar};
use rocket::outcome::IntoOutcome;
use rocket::request::{self, FromRequest};
use rocket::response::Redirect;
use rocket::*;
use rocket_dyn_templates::Template;
use std::collections::HashMap;

/// Id of the logged in user, kept in a private cookie.
pub struct User(pub u64);
#[rocket::async_trait]
impl<'r> FromRequest<'r> for User {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> request::Outcome<User, ()> {
        request
            .cookies()
            .get_private("user")
            .and_then(|cookie| cookie.value().parse().ok())
            .map(User)
            .or_forward(rocket::http::Status::NotFound)
    }
}

#[get("/", rank = 2)]
pub async fn root() -> Template {
    Template::render("login", HashMap::<String, String>::new())
}

#[get("/<_path..>", rank = 8)]
pub async fn not_logged_redirect(_path: std::path::PathBuf) -> Redirect {
    Redirect::to(uri!(root))
}

// login and logout apis
#[derive(FromForm)]
pub struct Login {
    user_id: u64,
}
#[post("/api/login", data = "<login>")]
pub async fn login(
    cookies: &CookieJar<'_>,
    client: &State<AutograderClient>,
    login: Form<Strict<Login>>,
) -> Redirect {
    let mut client = client.inner().clone();
    match client.get_user(with_user(login.user_id, Void {})).await {
        Ok(response) => {
            let user = response.into_inner();
            ::log::info!("{} logged in", user.login);
            cookies.add_private(Cookie::new("user", user.id.to_string()));
            Redirect::to(uri!(super::labs::courses))
        }
        Err(e) => {
            ::log::warn!("login of user {} refused: {}", login.user_id, e);
            Redirect::to(uri!(root))
        }
    }
}

#[get("/api/logout")]
pub async fn logout(cookies: &CookieJar<'_>) -> Redirect {
    cookies.remove_private(Cookie::named("user"));
    Redirect::to(uri!(root))
}

// enrollment lookups guarding course pages

/// Enrollment of `user_id` in `course_id` as student or teacher.
pub async fn enrollment_in(
    client: &mut AutograderClient,
    user_id: u64,
    course_id: u64,
) -> Result<Enrollment, PortalError> {
    let request = EnrollmentStatusRequest {
        user_id,
        statuses: vec![
            enrollment::UserStatus::Student as i32,
            enrollment::UserStatus::Teacher as i32,
        ],
    };
    client
        .get_enrollments_by_user(with_user(user_id, request))
        .await?
        .into_inner()
        .enrollments
        .into_iter()
        .find(|e| e.course_id == course_id)
        .ok_or(PortalError::NotEnrolled(course_id))
}

pub async fn require_teacher(
    client: &mut AutograderClient,
    user_id: u64,
    course_id: u64,
) -> Result<Enrollment, PortalError> {
    let enrollment = enrollment_in(client, user_id, course_id).await?;
    if !enrollment.is_teacher() {
        return Err(PortalError::NotTeacher(course_id));
    }
    Ok(enrollment)
}

/// Enrollment of a student in the course, looked up by a teacher.
pub async fn student_enrollment(
    client: &mut AutograderClient,
    teacher_id: u64,
    course_id: u64,
    student_id: u64,
) -> Result<Enrollment, PortalError> {
    let request = EnrollmentRequest {
        course_id,
        ..Default::default()
    };
    client
        .get_enrollments_by_course(with_user(teacher_id, request))
        .await?
        .into_inner()
        .enrollments
        .into_iter()
        .find(|e| e.user_id == student_id)
        .ok_or(PortalError::StudentNotFound(student_id))
}
