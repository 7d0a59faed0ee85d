//! Git checkout fetcher.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;

use crate::config::GitSection;
use crate::error::RetrievalError;
use crate::package::PackageDescriptor;

use super::Fetcher;

const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

/// Clones `sourceUrl` into the destination and checks out `sourceReference`.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: PathBuf,
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::from_config(&GitSection::default())
    }
}

impl GitFetcher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &GitSection) -> Self {
        Self::new(&config.program)
    }

    fn git_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        for key in GIT_ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Run a git command, reporting stderr on failure.
    fn run_git(&self, cwd: Option<&Path>, args: &[&str]) -> Result<(), RetrievalError> {
        let mut cmd = self.git_command();
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let subcommand = args.first().copied().unwrap_or_default();
        let output = cmd
            .output()
            .map_err(|e| RetrievalError::git(subcommand, format!("failed to run git: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RetrievalError::git(subcommand, stderr.trim()));
        }
        Ok(())
    }

    /// Commit SHA of the checked-out HEAD.
    pub fn head_commit(checkout: &Path) -> Result<String, RetrievalError> {
        let repo = Repository::open(checkout)?;
        let commit = repo.revparse_single("HEAD")?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }
}

impl Fetcher for GitFetcher {
    fn fetch(
        &self,
        descriptor: &PackageDescriptor,
        destination: &Path,
    ) -> Result<(), RetrievalError> {
        let (Some(url), Some(reference)) = (descriptor.source_url(), descriptor.source_reference())
        else {
            return Err(RetrievalError::MissingLocation {
                name: descriptor.name().to_string(),
                expected: "source",
            });
        };

        // A leading dash would make git read the reference as an option.
        if reference.starts_with('-') {
            return Err(RetrievalError::git(
                "checkout",
                format!("refusing option-like reference '{reference}'"),
            ));
        }

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let dest = destination
            .to_str()
            .ok_or_else(|| RetrievalError::git("clone", "destination path is not valid UTF-8"))?;

        self.run_git(None, &["clone", "--no-checkout", "--quiet", "--", url, dest])?;
        // --no-checkout leaves an empty index, so a checkout of the already
        // current branch must be forced to populate the work tree.
        self.run_git(
            Some(destination),
            &["checkout", "--force", "--quiet", reference],
        )?;

        let commit = Self::head_commit(destination)?;
        tracing::info!(url, reference, commit = %commit, "checked out source");
        Ok(())
    }
}
