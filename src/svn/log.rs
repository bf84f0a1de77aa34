use chrono::NaiveDate;

/// One entry of `svn log` output: revision number plus commit date when the
/// backend printed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub number: u64,
    pub date: Option<NaiveDate>,
}

/// Parse plain `svn log` output into log entries sorted ascending by
/// revision number.
///
/// The format is a run of dash separator lines with headers of the shape
/// `r42 | author | 2006-12-13 12:13:14 +0000 (...) | 1 line` between them.
/// Some backends print newest-first, so ordering is normalized here. An
/// empty log yields an empty vec. Lines that do not parse as headers are
/// message text and are skipped.
pub fn parse_log(document: &str) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut at_boundary = true;

    for line in document.lines() {
        if is_separator(line) {
            at_boundary = true;
            continue;
        }
        if at_boundary {
            if let Some(entry) = parse_header(line) {
                entries.push(entry);
            }
        }
        at_boundary = false;
    }

    entries.sort_by_key(|e| e.number);
    entries
}

fn is_separator(line: &str) -> bool {
    line.len() >= 10 && line.bytes().all(|b| b == b'-')
}

fn parse_header(line: &str) -> Option<LogEntry> {
    let mut fields = line.split('|');

    let revision = fields.next()?.trim();
    let number = revision.strip_prefix('r')?.parse().ok()?;

    // Field order is revision | author | date | line count.
    let date = fields
        .nth(1)
        .map(str::trim)
        .and_then(|field| field.split_whitespace().next())
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok());

    Some(LogEntry { number, date })
}
