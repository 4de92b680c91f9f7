pub mod archive;
pub mod domain;
pub mod publish;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    pub const PROJECT_ROOT_ENV: &str = "SWINGSIGNAL_ROOT";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub project_root: Option<PathBuf>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                project_root: std::env::var_os(PROJECT_ROOT_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from),
            })
        }

        /// Explicit override, then `SWINGSIGNAL_ROOT`, then the current directory.
        pub fn resolve_project_root(&self, cli_root: Option<PathBuf>) -> anyhow::Result<PathBuf> {
            if let Some(root) = cli_root.or_else(|| self.project_root.clone()) {
                return Ok(root);
            }
            std::env::current_dir().context("resolve current directory failed")
        }
    }

}
