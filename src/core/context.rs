use crate::config::Config;
use crate::core::auth::AuthContext;
use crate::core::cli::CliPaths;
use crate::core::persist::load_demos;
use crate::core::repository::{DemoBook, LeadBoard};
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use std::path::{Path, PathBuf};

/// Everything one session works against.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub logger: Logger,
    pub auth: AuthContext,
    pub demos: DemoBook,
    pub leads: LeadBoard,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn new_with_paths(paths: &CliPaths) -> Result<Self> {
        let config = Config::load_from(&paths.config_path)?;

        let logger = Logger::new();
        logger.set_log_dir(&paths.logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());

        Ok(Self {
            config,
            logger,
            auth: AuthContext::anonymous(),
            demos: DemoBook::new("Demo"),
            leads: LeadBoard::new("Lead"),
            config_path: paths.config_path.clone(),
            logs_dir: paths.logs_dir.clone(),
        })
    }

    /// Replace the demo book with the contents of `path`.
    pub fn load_demos(&mut self, path: &Path) -> Result<usize> {
        let demos = load_demos(path)?;
        let count = demos.len();
        self.demos.replace_all(demos);
        self.logger.info(
            format!("Loaded {count} demo(s) from {}", path.display()),
            LogTarget::FileOnly,
        );
        Ok(count)
    }
}
