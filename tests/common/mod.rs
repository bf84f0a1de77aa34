use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io;
use svntl::error::{Result, SvntlError};
use svntl::svn::CommandRunner;

/// Scripted stand-in for the `svn` binary.
///
/// Configured with a LOC value per revision, it fabricates log, diff,
/// listing and cat output that is consistent with those values, the same
/// way a real repository would answer.
#[derive(Debug, Clone, Default)]
pub struct MockSvn {
    url: String,
    loc: BTreeMap<u64, i64>,
    dates: BTreeMap<u64, NaiveDate>,
    entries: BTreeMap<u64, Vec<(String, String)>>,
    missing_in_rev_zero: bool,
    fail_diff_from: Option<u64>,
    direct_cat_fails: bool,
}

impl MockSvn {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn loc(mut self, revision: u64, loc: i64) -> Self {
        self.loc.insert(revision, loc);
        self
    }

    pub fn date(mut self, revision: u64, date: NaiveDate) -> Self {
        self.dates.insert(revision, date);
        self
    }

    pub fn entry(mut self, revision: u64, name: &str, contents: &str) -> Self {
        self.entries
            .entry(revision)
            .or_default()
            .push((name.to_string(), contents.to_string()));
        self
    }

    /// The URL names a path that was only created after revision 0, so any
    /// diff anchored there fails.
    pub fn missing_in_rev_zero(mut self) -> Self {
        self.missing_in_rev_zero = true;
        self
    }

    /// Make diffs anchored at the given revision fail, to simulate an
    /// unexpected gap in the history.
    pub fn fail_diff_from(mut self, revision: u64) -> Self {
        self.fail_diff_from = Some(revision);
        self
    }

    /// Reject `svn cat` of the bare URL, as a directory URL would.
    pub fn direct_cat_fails(mut self) -> Self {
        self.direct_cat_fails = true;
        self
    }

    fn failure(&self, what: &str) -> SvntlError {
        SvntlError::CommandSpawn {
            command: what.to_string(),
            source: io::Error::new(io::ErrorKind::Other, "scripted failure"),
        }
    }

    fn loc_of(&self, revision: u64) -> i64 {
        if revision == 0 {
            0
        } else {
            self.loc.get(&revision).copied().unwrap_or(0)
        }
    }

    fn log_document(&self) -> String {
        const SEPARATOR: &str =
            "------------------------------------------------------------------------";

        let mut numbers: Vec<u64> = self
            .loc
            .keys()
            .chain(self.dates.keys())
            .copied()
            .collect();
        numbers.sort_unstable();
        numbers.dedup();

        let mut doc = String::new();
        // Newest first, as the real client prints it.
        for number in numbers.iter().rev() {
            let date = self
                .dates
                .get(number)
                .copied()
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(2006, 12, 13).unwrap());
            doc.push_str(SEPARATOR);
            doc.push('\n');
            doc.push_str(&format!(
                "r{number} | ruby | {date} 12:13:14 +0000 (Wed, 13 Dec 2006) | 1 line\n\nBugfixes.\n"
            ));
        }
        doc.push_str(SEPARATOR);
        doc.push('\n');
        doc
    }

    fn diff_document(&self, from: u64, to: u64) -> Result<String> {
        if self.missing_in_rev_zero && from == 0 {
            return Err(self.failure("diff"));
        }
        if self.fail_diff_from == Some(from) {
            return Err(self.failure("diff"));
        }

        let before = self.loc_of(from);
        let after = self.loc_of(to);
        if before == after {
            return Ok(String::new());
        }

        let mut doc = String::new();
        doc.push_str("1,2c1,6\n");
        for _ in 0..before {
            doc.push_str("< what goes away\n");
        }
        doc.push_str("---\n");
        for _ in 0..after {
            doc.push_str("> what goes in\n");
        }
        Ok(doc)
    }

    fn listing(&self, revision: u64) -> String {
        let mut doc = String::new();
        if let Some(entries) = self.entries.get(&revision) {
            for (name, _) in entries {
                doc.push_str(name);
                doc.push('\n');
            }
        }
        doc
    }

    fn cat(&self, revision: u64, target: &str) -> Result<String> {
        let entries = self
            .entries
            .get(&revision)
            .ok_or_else(|| self.failure("cat"))?;

        if target == self.url {
            if self.direct_cat_fails {
                return Err(self.failure("cat"));
            }
            return entries
                .first()
                .map(|(_, contents)| contents.clone())
                .ok_or_else(|| self.failure("cat"));
        }

        let name = target
            .strip_prefix(&self.url)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| self.failure("cat"))?;
        entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, contents)| contents.clone())
            .ok_or_else(|| self.failure("cat"))
    }
}

fn parse_revision_arg(arg: &str) -> Option<u64> {
    arg.strip_prefix("-r")?.parse().ok()
}

fn parse_range_arg(arg: &str) -> Option<(u64, u64)> {
    let (from, to) = arg.strip_prefix("-r")?.split_once(':')?;
    Some((from.parse().ok()?, to.parse().ok()?))
}

impl CommandRunner for MockSvn {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        assert_eq!(program, "svn");

        let document = match args {
            ["log", url] if *url == self.url => self.log_document(),
            ["diff", range, "--diff-cmd", "diff", "-x", "--normal", url] if *url == self.url => {
                let (from, to) =
                    parse_range_arg(range).ok_or_else(|| self.failure("diff range"))?;
                self.diff_document(from, to)?
            }
            ["ls", "-R", revision, url] if *url == self.url => {
                let revision =
                    parse_revision_arg(revision).ok_or_else(|| self.failure("ls revision"))?;
                self.listing(revision)
            }
            ["cat", revision, target] => {
                let revision =
                    parse_revision_arg(revision).ok_or_else(|| self.failure("cat revision"))?;
                self.cat(revision, target)?
            }
            _ => return Err(self.failure("unexpected command")),
        };

        Ok(document.into_bytes())
    }
}
