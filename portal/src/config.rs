use rocket::serde::Deserialize;

fn default_autograder_addr() -> String {
    protos::utils::get_remote_address().to_string()
}

fn default_course_url_prefix() -> String {
    String::from("/courses")
}

/// Portal settings, read from `Rocket.toml` or `ROCKET_*` variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PortalConfig {
    #[serde(default = "default_autograder_addr")]
    pub autograder_addr: String,
    #[serde(default = "default_course_url_prefix")]
    pub course_url_prefix: String,
}

impl PortalConfig {
    pub fn course_url(&self, course_id: u64) -> String {
        format!("{}/{}", self.course_url_prefix.trim_end_matches('/'), course_id)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            autograder_addr: default_autograder_addr(),
            course_url_prefix: default_course_url_prefix(),
        }
    }
}
