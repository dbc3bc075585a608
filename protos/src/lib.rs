#[macro_use]
mod mock_macro;

pub use mock_macro::MockCall;

pub mod ag {
    tonic::include_proto!("ag");
    rpc_mock_server!(autograder_service_server::AutograderService; MockAutograderService;
        (get_user, Void, User),
        (get_users, Void, Users),
        (get_user_by_course, CourseUserRequest, User),
        (update_user, User, Void),
        (is_authorized_teacher, Void, AuthorizationResponse),
        (get_group, GetGroupRequest, Group),
        (get_group_by_user_and_course, GroupRequest, Group),
        (get_groups_by_course, CourseRequest, Groups),
        (create_group, Group, Group),
        (update_group, Group, Void),
        (delete_group, GroupRequest, Void),
        (get_course, CourseRequest, Course),
        (get_courses, Void, Courses),
        (get_courses_by_user, EnrollmentStatusRequest, Courses),
        (create_course, Course, Course),
        (update_course, Course, Void),
        (update_course_visibility, Enrollment, Void),
        (get_assignments, CourseRequest, Assignments),
        (update_assignments, CourseRequest, Void),
        (get_enrollments_by_user, EnrollmentStatusRequest, Enrollments),
        (get_enrollments_by_course, EnrollmentRequest, Enrollments),
        (create_enrollment, Enrollment, Void),
        (update_enrollment, Enrollment, Void),
        (update_enrollments, CourseRequest, Void),
        (get_submissions, SubmissionRequest, Submissions),
        (get_submissions_by_course, SubmissionsForCourseRequest, CourseSubmissions),
        (update_submission, UpdateSubmissionRequest, Void),
        (update_submissions, UpdateSubmissionsRequest, Void),
        (build_submission, BuildRequest, Submission),
        (rebuild_submission, RebuildRequest, Submission),
        (rebuild_submissions, AssignmentRequest, Void),
        (create_benchmark, GradingBenchmark, GradingBenchmark),
        (update_benchmark, GradingBenchmark, Void),
        (delete_benchmark, GradingBenchmark, Void),
        (create_criterion, GradingCriterion, GradingCriterion),
        (update_criterion, GradingCriterion, Void),
        (delete_criterion, GradingCriterion, Void),
        (create_review, ReviewRequest, Review),
        (update_review, ReviewRequest, Review),
        (get_reviewers, SubmissionReviewersRequest, Reviewers),
        (load_criteria, AssignmentRequest, Benchmarks),
        (get_providers, Void, Providers),
        (get_organization, OrgRequest, Organization),
        (get_repositories, UrlRequest, Repositories),
        (is_empty_repo, RepositoryRequest, Void)
    );

    impl Submission {
        /// Build log of the last build, empty when the submission was never built.
        pub fn build_log(&self) -> &str {
            self.build_info
                .as_ref()
                .map(|b| b.build_log.as_str())
                .unwrap_or_default()
        }
    }

    impl Enrollment {
        pub fn is_teacher(&self) -> bool {
            self.status() == enrollment::UserStatus::Teacher
        }
    }
}

pub mod utils {
    use std::error::Error;
    use tonic::transport::Channel;

    pub const SERVICE_NAME: &str = "ag.AutograderService";

    /// Path of the unary call `method` on the autograder service.
    pub fn method_path(method: &str) -> String {
        format!("/{}/{}", SERVICE_NAME, method)
    }

    pub fn get_new_channel(addr: &str) -> Result<Channel, Box<dyn Error + Send + Sync>> {
        Ok(Channel::from_shared(addr.to_string())?.connect_lazy()?)
    }

    /// Wraps `message` in a request identifying the caller through the
    /// `user` metadata entry.
    pub fn with_user<T>(user_id: u64, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        request.metadata_mut().insert("user", user_id.into());
        request
    }

    #[cfg(not(feature = "loopback"))]
    pub fn get_remote_address() -> &'static str {
        "http://autograder:9090"
    }
    #[cfg(feature = "loopback")]
    pub fn get_remote_address() -> &'static str {
        "http://127.0.0.1:9090"
    }
}

#[cfg(test)]
mod tests;
