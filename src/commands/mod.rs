pub mod args;
pub mod calc;
pub mod store;
pub mod tokens;
pub mod vars;

use std::path::PathBuf;

use crate::core::variables::Variables;

/// State owned by one shell or CLI run.
#[derive(Debug, Clone)]
pub struct Session {
    pub vars: Variables,
    pub save_file: PathBuf,
    pub json: bool,
}

impl Session {
    pub fn new(vars: Variables, save_file: impl Into<PathBuf>, json: bool) -> Self {
        Self { vars, save_file: save_file.into(), json }
    }
}
