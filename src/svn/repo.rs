use crate::error::{Result, SvntlError};
use crate::model::{Revision, RevisionStore};
use crate::svn::command::{CommandRunner, SystemRunner};
use crate::svn::log::parse_log;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// A Subversion repository with its full LOC history reconstructed.
///
/// Construction walks the revision log once and assigns a line count to
/// every revision by diffing consecutive pairs, so the cost is proportional
/// to the amount of change rather than to tree size. The store is mutated
/// only here and is read-only afterwards.
#[derive(Debug)]
pub struct SvnRepository<R: CommandRunner = SystemRunner> {
    url: String,
    runner: R,
    revisions: RevisionStore,
}

impl SvnRepository<SystemRunner> {
    pub fn open(url: &str, progress: bool) -> Result<Self> {
        Self::with_runner(url, SystemRunner, progress)
    }
}

impl<R: CommandRunner> SvnRepository<R> {
    pub fn with_runner(url: &str, runner: R, progress: bool) -> Result<Self> {
        let mut repo = Self {
            url: url.to_string(),
            runner,
            revisions: RevisionStore::new(),
        };
        repo.revisions = repo.reconstruct(progress)?;
        Ok(repo)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn revisions(&self) -> &RevisionStore {
        &self.revisions
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.revision_count()
    }

    pub fn revision(&self, number: u64) -> Result<&Revision> {
        self.revisions.find(number)
    }

    /// Walk the log and compute a LOC value per revision.
    ///
    /// Each pair is diffed strictly after the previous one since every value
    /// builds on its predecessor. Any command failure outside the documented
    /// baseline fallback means the repository cannot be read at all and is
    /// reported as such.
    fn reconstruct(&self, progress: bool) -> Result<RevisionStore> {
        let log = match self.svn(&["log", &self.url]) {
            Ok(document) => document,
            Err(err) if err.is_command_failure() => {
                return Err(SvntlError::RepositoryUnavailable(self.url.clone()));
            }
            Err(err) => return Err(err),
        };

        let mut revisions: Vec<Revision> = parse_log(&log)
            .into_iter()
            .map(|entry| Revision::new(entry.number, entry.date))
            .collect();
        revisions.insert(0, Revision::new(0, None));
        revisions.sort_by_key(|r| r.number);

        let bar = if progress && revisions.len() > 1 {
            let bar = ProgressBar::new(revisions.len() as u64 - 1);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} diffing revisions {pos}/{len}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            Some(bar)
        } else {
            None
        };

        for curr in 1..revisions.len() {
            let prev = &revisions[curr - 1];
            let loc = match self.diff_loc(prev, revisions[curr].number) {
                Ok(loc) => loc,
                Err(err) if err.is_command_failure() && prev.number == 0 => {
                    // The path did not exist at revision 0 (it was created
                    // later inside the repository), so the incremental diff
                    // has no anchor. Recount the whole tree once.
                    debug!(revision = revisions[curr].number, "diff from r0 failed, recounting");
                    self.loc_at_revision(revisions[curr].number)
                        .map_err(|err| self.escalate(err))?
                }
                Err(err) => return Err(self.escalate(err)),
            };
            revisions[curr].loc = loc;

            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        Ok(RevisionStore::from_revisions(revisions))
    }

    /// LOC of `number` derived incrementally from the previous revision.
    fn diff_loc(&self, prev: &Revision, number: u64) -> Result<i64> {
        let range = format!("-r{}:{}", prev.number, number);
        let diff = self.svn(&[
            "diff",
            &range,
            "--diff-cmd",
            "diff",
            "-x",
            "--normal",
            &self.url,
        ])?;

        let removed = diff.lines().filter(|l| l.starts_with('<')).count() as i64;
        let added = diff.lines().filter(|l| l.starts_with('>')).count() as i64;
        Ok(prev.loc + added - removed)
    }

    /// LOC of `number` computed from scratch: list every file in the tree
    /// and sum the line counts of their contents.
    fn loc_at_revision(&self, number: u64) -> Result<i64> {
        let revision = format!("-r{number}");
        let listing = self.svn(&["ls", "-R", &revision, &self.url])?;

        let files: Vec<&str> = listing
            .lines()
            .map(str::trim_end)
            .filter(|entry| !entry.is_empty() && !entry.ends_with('/'))
            .collect();

        if files.len() == 1 {
            // A single entry may mean the URL points directly at a file, in
            // which case catting url/entry would miss.
            match self.cat_lines(number, &self.url) {
                Ok(loc) => return Ok(loc),
                Err(err) if err.is_command_failure() => {}
                Err(err) => return Err(err),
            }
        }

        let mut loc = 0;
        for file in files {
            loc += self.cat_lines(number, &format!("{}/{}", self.url, file))?;
        }
        Ok(loc)
    }

    fn cat_lines(&self, number: u64, target: &str) -> Result<i64> {
        let revision = format!("-r{number}");
        let contents = self.svn(&["cat", &revision, target])?;
        Ok(contents.lines().count() as i64)
    }

    fn svn(&self, args: &[&str]) -> Result<String> {
        let stdout = self.runner.run("svn", args)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// Command failures reaching this point are unexpected gaps in the
    /// history and mean the repository cannot be reconstructed.
    fn escalate(&self, err: SvntlError) -> SvntlError {
        if err.is_command_failure() {
            SvntlError::RepositoryUnavailable(self.url.clone())
        } else {
            err
        }
    }
}
