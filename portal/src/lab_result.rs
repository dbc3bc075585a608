//! Result view of a single lab.
//!
//! Given a [`SubmissionLink`] the view decides what the student (or the
//! teacher looking at a student) gets to see: a prompt to trigger the first
//! build when nothing was submitted yet, otherwise a result panel made of the
//! score/status widget, the last build information, the build log and either
//! the legacy test score table or the review panel.

use protos::ag::{submission, Assignment, Review, Submission, User};
use rocket::serde::Serialize;
use utils::{deadline, review, scoring};

/// Assignment paired with the current submission of a student or group.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLink {
    pub assignment: Assignment,
    pub submission: Option<Submission>,
    pub author_name: String,
}

/// Everything the owner hands to the view.
#[derive(Debug, Clone, Default)]
pub struct LabInfo {
    pub submission_link: SubmissionLink,
    pub student: User,
    pub course_url: String,
    pub slipdays: u32,
    /// slip days already spent on this assignment
    pub assignment_slipdays: u32,
    pub teacher_page_view: bool,
}

/// Hooks the owner provides for the actions offered by the view.
#[rocket::async_trait]
pub trait SubmissionActions: Send {
    async fn update_status(&mut self, submission_id: u64, status: submission::Status);
    /// Returns whether the rebuild was accepted.
    async fn rebuild(&mut self, assignment_id: u64, submission_id: u64) -> bool;
    /// Returns whether the build was accepted.
    async fn build(&mut self, assignment_id: u64) -> bool;
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct LabResult {
    pub assignment_id: u64,
    pub submission_id: u64,
    pub score_limit: u32,
    pub teacher_view: bool,
    pub lab: String,
    pub progress: u32,
    pub status: String,
    pub author_name: String,
    pub passed: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct LastBuildInfo {
    pub build_date: String,
    pub deadline: String,
    pub slipdays: u32,
    pub assignment_slipdays: u32,
    pub exec_time: String,
    /// slip days the delivery costs, if it was late
    pub late_days: Option<u32>,
    pub approved: bool,
    pub approved_date: String,
    pub commit_hash: String,
    pub teacher_view: bool,
}

/// Legacy score table, shown for assignments graded by tests only.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct LastBuild {
    pub test_cases: Vec<scoring::TestRow>,
    pub score: u32,
    pub score_limit: u32,
    pub weight: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ReviewSummary {
    pub reviewer_id: u64,
    pub score: u32,
    pub feedback: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct Release {
    pub submission_id: u64,
    pub assignment_id: u64,
    pub assignment_name: String,
    pub score: u32,
    pub user_is_course_creator: bool,
    pub author_name: String,
    pub author_login: String,
    pub student_number: u32,
    pub course_url: String,
    pub teacher_view: bool,
    pub is_selected: bool,
    pub reviewers: Vec<User>,
    pub reviews: Vec<ReviewSummary>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde", tag = "kind", rename_all = "snake_case")]
pub enum ReviewPanel {
    /// teachers grade elsewhere; the panel is an empty row
    Teacher,
    Release(Release),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ResultPanel {
    pub lab_result: LabResult,
    pub last_build_info: LastBuildInfo,
    pub score_table: Option<LastBuild>,
    pub review: Option<ReviewPanel>,
    pub build_log: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde", tag = "kind", rename_all = "snake_case")]
pub enum Rendered {
    NoSubmission { assignment_id: u64 },
    Result(ResultPanel),
}

pub struct LabResultView {
    props: LabInfo,
}

impl LabResultView {
    pub fn new(props: LabInfo) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &LabInfo {
        &self.props
    }

    fn assignment(&self) -> &Assignment {
        &self.props.submission_link.assignment
    }

    pub fn render(&self) -> Rendered {
        match &self.props.submission_link.submission {
            Some(current) => Rendered::Result(self.render_result(current)),
            None => Rendered::NoSubmission {
                assignment_id: self.assignment().id,
            },
        }
    }

    fn render_result(&self, current: &Submission) -> ResultPanel {
        let assignment = self.assignment();
        let score_table = if assignment.reviewers > 0 {
            None
        } else {
            Some(self.last_build_table(current))
        };
        let review = if assignment.reviewers > 0 && current.released {
            Some(self.render_review_info(current))
        } else {
            None
        };
        ResultPanel {
            lab_result: self.lab_result(current),
            last_build_info: self.last_build_info(current),
            score_table,
            review,
            build_log: current.build_log().split('\n').map(String::from).collect(),
        }
    }

    fn lab_result(&self, current: &Submission) -> LabResult {
        let assignment = self.assignment();
        LabResult {
            assignment_id: assignment.id,
            submission_id: current.id,
            score_limit: assignment.score_limit,
            teacher_view: self.props.teacher_page_view,
            lab: assignment.name.clone(),
            progress: current.score,
            status: current.status().to_string(),
            author_name: self.props.submission_link.author_name.clone(),
            passed: scoring::passed(current.score, assignment.score_limit),
        }
    }

    fn last_build_info(&self, current: &Submission) -> LastBuildInfo {
        let assignment = self.assignment();
        let build = current.build_info.clone().unwrap_or_default();
        let deadline =
            deadline::fix_deadline(&assignment.deadline).unwrap_or_else(|_| assignment.deadline.clone());
        let late_days = deadline::lateness(&build.build_date, &deadline)
            .ok()
            .flatten()
            .map(|l| l.slip_days);
        LastBuildInfo {
            build_date: build.build_date,
            deadline,
            slipdays: self.props.slipdays,
            assignment_slipdays: self.props.assignment_slipdays,
            exec_time: deadline::format_exec_time(build.exec_time),
            late_days,
            approved: current.status() == submission::Status::Approved,
            approved_date: current.approved_date.clone(),
            commit_hash: current.commit_hash.clone(),
            teacher_view: self.props.teacher_page_view,
        }
    }

    fn last_build_table(&self, current: &Submission) -> LastBuild {
        LastBuild {
            test_cases: scoring::test_rows(&current.scores),
            score: current.score,
            score_limit: self.assignment().score_limit,
            weight: 100,
        }
    }

    /// Reviewers shown to the student: one id-only user per ready review.
    pub fn reviewers_for_student_page(&self, submission: &Submission) -> Vec<User> {
        review::ready_reviewers(&submission.reviews)
    }

    fn render_review_info(&self, current: &Submission) -> ReviewPanel {
        if self.props.teacher_page_view {
            return ReviewPanel::Teacher;
        }
        let assignment = self.assignment();
        ReviewPanel::Release(Release {
            submission_id: current.id,
            assignment_id: assignment.id,
            assignment_name: assignment.name.clone(),
            score: current.score,
            user_is_course_creator: false,
            author_name: self.props.student.name.clone(),
            author_login: self.props.student.login.clone(),
            student_number: 0,
            course_url: self.props.course_url.clone(),
            teacher_view: false,
            is_selected: true,
            reviewers: self.reviewers_for_student_page(current),
            reviews: current
                .reviews
                .iter()
                .filter(|r| r.ready)
                .map(ReviewSummary::from)
                .collect(),
        })
    }

    /// Triggers the first build of the lab. The outcome is only logged.
    pub async fn build_submission<A: SubmissionActions + ?Sized>(&self, actions: &mut A) {
        let assignment_id = self.assignment().id;
        let accepted = actions.build(assignment_id).await;
        log::info!(
            "build of assignment {} for {} accepted: {}",
            assignment_id,
            self.props.student.login,
            accepted
        );
    }
}

impl From<&Review> for ReviewSummary {
    fn from(r: &Review) -> Self {
        Self {
            reviewer_id: r.reviewer_id,
            score: r.score,
            feedback: r.feedback.clone(),
        }
    }
}
