use super::actions::AutograderActions;
use super::auth::*;
use super::clients::*;
use super::config::PortalConfig;
use super::error::PortalError;
use super::lab_result::{LabInfo, LabResultView, Rendered, SubmissionActions};
use super::links::{self, Submitter};
use protos::ag::{
    enrollment, submission, Course, CourseRequest, Enrollment, EnrollmentStatusRequest,
    SubmissionRequest, Void,
};
use protos::utils::with_user;
use rocket::form::{Form, Strict};
use rocket::response::Redirect;
use rocket::serde::Serialize;
use rocket::*;
use rocket_dyn_templates::Template;
use std::str::FromStr;
use utils::slipdays;

#[get("/")]
pub async fn root_logged(_user: User) -> Redirect {
    Redirect::to(uri!(courses))
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CourseItem {
    id: u64,
    name: String,
    code: String,
    year: u32,
}
impl From<Course> for CourseItem {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            code: c.code,
            year: c.year,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CoursesTemplate {
    courses: Vec<CourseItem>,
}

#[get("/courses")]
pub async fn courses(
    user: User,
    client: &State<AutograderClient>,
) -> Result<Template, PortalError> {
    let mut client = client.inner().clone();
    let request = EnrollmentStatusRequest {
        user_id: user.0,
        statuses: vec![
            enrollment::UserStatus::Student as i32,
            enrollment::UserStatus::Teacher as i32,
        ],
    };
    let courses = client
        .get_courses_by_user(with_user(user.0, request))
        .await?
        .into_inner()
        .courses
        .into_iter()
        .map(CourseItem::from)
        .collect();
    Ok(Template::render("courses", CoursesTemplate { courses }))
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AssignmentItem {
    id: u64,
    name: String,
    deadline: String,
    is_group_lab: bool,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CourseTemplate {
    course: CourseItem,
    teacher: bool,
    assignments: Vec<AssignmentItem>,
}

#[get("/courses/<course_id>")]
pub async fn course(
    user: User,
    course_id: u64,
    client: &State<AutograderClient>,
) -> Result<Template, PortalError> {
    let mut client = client.inner().clone();
    let enrollment = enrollment_in(&mut client, user.0, course_id).await?;
    let mut cc0 = client.clone();
    let mut cc1 = client.clone();
    let (course, assignments) = futures::join!(
        cc0.get_course(with_user(user.0, CourseRequest { course_id })),
        cc1.get_assignments(with_user(user.0, CourseRequest { course_id })),
    );
    let mut assignments = assignments?.into_inner().assignments;
    assignments.sort_by_key(|a| a.order);
    let assignments = assignments
        .into_iter()
        .map(|a| AssignmentItem {
            deadline: utils::deadline::fix_deadline(&a.deadline).unwrap_or(a.deadline),
            id: a.id,
            name: a.name,
            is_group_lab: a.is_group_lab,
        })
        .collect();
    Ok(Template::render(
        "course",
        CourseTemplate {
            course: course?.into_inner().into(),
            teacher: enrollment.is_teacher(),
            assignments,
        },
    ))
}

/// Collects what the result view of `assignment_id` needs for the student
/// behind `enrollment`, with every call made on behalf of `viewer_id`.
async fn load_lab(
    client: &AutograderClient,
    config: &PortalConfig,
    viewer_id: u64,
    assignment_id: u64,
    enrollment: &Enrollment,
    student: protos::ag::User,
    teacher_page_view: bool,
) -> Result<(Course, LabInfo), PortalError> {
    let course_id = enrollment.course_id;
    let group_id = enrollment.group_id;
    let mut cc0 = client.clone();
    let mut cc1 = client.clone();
    let mut cc2 = client.clone();
    let mut cc3 = client.clone();
    let (course, assignments, submissions, group_submissions) = futures::join!(
        cc0.get_course(with_user(viewer_id, CourseRequest { course_id })),
        cc1.get_assignments(with_user(viewer_id, CourseRequest { course_id })),
        cc2.get_submissions(with_user(
            viewer_id,
            SubmissionRequest {
                user_id: student.id,
                group_id: 0,
                course_id,
            }
        )),
        async {
            if group_id == 0 {
                return Ok(None);
            }
            cc3.get_submissions(with_user(
                viewer_id,
                SubmissionRequest {
                    user_id: 0,
                    group_id,
                    course_id,
                },
            ))
            .await
            .map(Some)
        },
    );
    let course = course?.into_inner();
    let student_submitter = Submitter {
        name: student.name.clone(),
        submissions: submissions?.into_inner().submissions,
    };
    let group_submitter = group_submissions?.map(|response| Submitter {
        name: enrollment
            .group
            .as_ref()
            .map(|g| g.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| student.name.clone()),
        submissions: response.into_inner().submissions,
    });
    let link = links::find_link(
        links::link_submissions(
            assignments?.into_inner().assignments,
            &student_submitter,
            group_submitter.as_ref(),
        ),
        assignment_id,
    )
    .ok_or(PortalError::AssignmentNotFound(assignment_id))?;
    let info = LabInfo {
        submission_link: link,
        student,
        course_url: config.course_url(course_id),
        slipdays: slipdays::remaining(course.slip_days, &enrollment.used_slip_days),
        assignment_slipdays: slipdays::used_for_assignment(&enrollment.used_slip_days, assignment_id),
        teacher_page_view,
    };
    Ok((course, info))
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LabTemplate {
    course_id: u64,
    course_name: String,
    assignment_id: u64,
    student_id: u64,
    teacher_view: bool,
    lab: Rendered,
}
impl LabTemplate {
    fn new(course: Course, view: &LabResultView) -> Self {
        let props = view.props();
        Self {
            course_id: course.id,
            course_name: course.name,
            assignment_id: props.submission_link.assignment.id,
            student_id: props.student.id,
            teacher_view: props.teacher_page_view,
            lab: view.render(),
        }
    }
}

#[get("/courses/<course_id>/lab/<assignment_id>")]
pub async fn student_lab(
    user: User,
    course_id: u64,
    assignment_id: u64,
    client: &State<AutograderClient>,
    config: &State<PortalConfig>,
) -> Result<Template, PortalError> {
    let mut cc = client.inner().clone();
    let enrollment = enrollment_in(&mut cc, user.0, course_id).await?;
    let student = cc.get_user(with_user(user.0, Void {})).await?.into_inner();
    let (course, info) = load_lab(
        client.inner(),
        config.inner(),
        user.0,
        assignment_id,
        &enrollment,
        student,
        false,
    )
    .await?;
    let view = LabResultView::new(info);
    Ok(Template::render("lab_result", LabTemplate::new(course, &view)))
}

#[get("/teacher/courses/<course_id>/lab/<assignment_id>/<student_id>")]
pub async fn teacher_lab(
    user: User,
    course_id: u64,
    assignment_id: u64,
    student_id: u64,
    client: &State<AutograderClient>,
    config: &State<PortalConfig>,
) -> Result<Template, PortalError> {
    let mut cc = client.inner().clone();
    require_teacher(&mut cc, user.0, course_id).await?;
    let enrollment = student_enrollment(&mut cc, user.0, course_id, student_id).await?;
    let student = enrollment
        .user
        .clone()
        .ok_or(PortalError::StudentNotFound(student_id))?;
    let (course, info) = load_lab(
        client.inner(),
        config.inner(),
        user.0,
        assignment_id,
        &enrollment,
        student,
        true,
    )
    .await?;
    let view = LabResultView::new(info);
    Ok(Template::render("lab_result", LabTemplate::new(course, &view)))
}

#[post("/api/courses/<course_id>/lab/<assignment_id>/build")]
pub async fn build(
    user: User,
    course_id: u64,
    assignment_id: u64,
    client: &State<AutograderClient>,
    config: &State<PortalConfig>,
) -> Result<Redirect, PortalError> {
    let mut cc = client.inner().clone();
    let enrollment = enrollment_in(&mut cc, user.0, course_id).await?;
    let student = cc.get_user(with_user(user.0, Void {})).await?.into_inner();
    let (_, info) = load_lab(
        client.inner(),
        config.inner(),
        user.0,
        assignment_id,
        &enrollment,
        student,
        false,
    )
    .await?;
    let view = LabResultView::new(info);
    let group_id = if view.props().submission_link.assignment.is_group_lab {
        enrollment.group_id
    } else {
        0
    };
    let mut actions = AutograderActions::new(&mut cc, user.0, course_id).for_group(group_id);
    view.build_submission(&mut actions).await;
    Ok(Redirect::to(uri!(student_lab(course_id, assignment_id))))
}

#[post("/api/teacher/courses/<course_id>/lab/<assignment_id>/<student_id>/rebuild/<submission_id>")]
pub async fn rebuild(
    user: User,
    course_id: u64,
    assignment_id: u64,
    student_id: u64,
    submission_id: u64,
    client: &State<AutograderClient>,
) -> Result<Redirect, PortalError> {
    let mut cc = client.inner().clone();
    require_teacher(&mut cc, user.0, course_id).await?;
    let mut actions = AutograderActions::new(&mut cc, user.0, course_id);
    actions.rebuild(assignment_id, submission_id).await;
    Ok(Redirect::to(uri!(teacher_lab(
        course_id,
        assignment_id,
        student_id
    ))))
}

#[derive(FromForm)]
pub struct StatusForm {
    status: String,
}
#[post(
    "/api/teacher/courses/<course_id>/lab/<assignment_id>/<student_id>/status/<submission_id>",
    data = "<form>"
)]
pub async fn update_status(
    user: User,
    course_id: u64,
    assignment_id: u64,
    student_id: u64,
    submission_id: u64,
    form: Form<Strict<StatusForm>>,
    client: &State<AutograderClient>,
) -> Result<Redirect, PortalError> {
    let status = submission::Status::from_str(&form.status)
        .map_err(|_| PortalError::InvalidStatus(form.status.clone()))?;
    let mut cc = client.inner().clone();
    require_teacher(&mut cc, user.0, course_id).await?;
    let mut actions = AutograderActions::new(&mut cc, user.0, course_id);
    actions.update_status(submission_id, status).await;
    Ok(Redirect::to(uri!(teacher_lab(
        course_id,
        assignment_id,
        student_id
    ))))
}
