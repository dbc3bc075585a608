use super::clients::*;
use super::lab_result::SubmissionActions;
use protos::ag::{submission, BuildRequest, RebuildRequest, UpdateSubmissionRequest};
use protos::utils::with_user;

/// Submission actions carried out on the autograder service on behalf of
/// the logged in user.
pub struct AutograderActions<'a> {
    client: &'a mut AutograderClient,
    user_id: u64,
    course_id: u64,
    group_id: u64,
}

impl<'a> AutograderActions<'a> {
    pub fn new(client: &'a mut AutograderClient, user_id: u64, course_id: u64) -> Self {
        Self {
            client,
            user_id,
            course_id,
            group_id: 0,
        }
    }

    /// Builds of group labs are made for `group_id`.
    pub fn for_group(mut self, group_id: u64) -> Self {
        self.group_id = group_id;
        self
    }
}

#[rocket::async_trait]
impl<'a> SubmissionActions for AutograderActions<'a> {
    async fn update_status(&mut self, submission_id: u64, status: submission::Status) {
        let request = UpdateSubmissionRequest {
            submission_id,
            course_id: self.course_id,
            status: status as i32,
            ..Default::default()
        };
        match self
            .client
            .update_submission(with_user(self.user_id, request))
            .await
        {
            Ok(_) => log::info!("submission {} set to {}", submission_id, status),
            Err(e) => log::error!("failed to update submission {}: {}", submission_id, e),
        }
    }

    async fn rebuild(&mut self, assignment_id: u64, submission_id: u64) -> bool {
        let request = RebuildRequest {
            assignment_id,
            submission_id,
        };
        match self
            .client
            .rebuild_submission(with_user(self.user_id, request))
            .await
        {
            Ok(_) => {
                log::info!("rebuilt submission {} of assignment {}", submission_id, assignment_id);
                true
            }
            Err(e) => {
                log::error!("failed to rebuild submission {}: {}", submission_id, e);
                false
            }
        }
    }

    async fn build(&mut self, assignment_id: u64) -> bool {
        let request = BuildRequest {
            course_id: self.course_id,
            assignment_id,
            user_id: self.user_id,
            group_id: self.group_id,
        };
        match self
            .client
            .build_submission(with_user(self.user_id, request))
            .await
        {
            Ok(response) => {
                log::info!(
                    "assignment {} built as submission {}",
                    assignment_id,
                    response.into_inner().id
                );
                true
            }
            Err(e) => {
                log::error!("failed to build assignment {}: {}", assignment_id, e);
                false
            }
        }
    }
}
