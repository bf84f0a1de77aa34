use crate::cli::CommonArgs;
use crate::model::{TimelineOutput, SCHEMA_VERSION};
use crate::svn::{CommandRunner, SvnRepository};
use crate::timeline;
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let progress = !common.quiet && !json && !ndjson;
    let repo = SvnRepository::open(&common.url, progress)
        .context("Failed to reconstruct repository history")?;

    let output = build_output(&repo);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for point in &output.per_commit {
            println!("{}", serde_json::to_string(point)?);
        }
    } else {
        output_table(&output);
    }

    Ok(())
}

fn build_output<R: CommandRunner>(repo: &SvnRepository<R>) -> TimelineOutput {
    let store = repo.revisions();
    TimelineOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        url: repo.url().to_string(),
        revision_count: store.revision_count(),
        per_commit: timeline::per_commit(store.real_revisions()),
        per_day: timeline::per_day(store.real_revisions()),
    }
}

fn output_table(output: &TimelineOutput) {
    println!(
        "{:<12} {:>12} {:>12}",
        style("Revision").bold(),
        style("LOC").bold(),
        style("Delta").bold()
    );
    println!("{}", "─".repeat(38));

    let mut previous = 0;
    for point in &output.per_commit {
        let delta = point.loc - previous;
        previous = point.loc;
        println!("r{:<11} {:>12} {:>+12}", point.revision, point.loc, delta);
    }

    println!(
        "\n{} revisions, {} lines of code at head",
        style(output.revision_count).cyan(),
        style(output.per_commit.last().map(|p| p.loc).unwrap_or(0)).cyan()
    );
}
