use crate::chart;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::svn::{CommandRunner, SvnRepository};
use anyhow::Context;
use chrono::Utc;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn exec_html(common: CommonArgs) -> anyhow::Result<()> {
    let repo = SvnRepository::open(&common.url, !common.quiet)
        .context("Failed to reconstruct repository history")?;

    generate_html(&repo, &common.output, common.title.as_deref())
        .context("Failed to write HTML report")?;
    Ok(())
}

/// Full statistics run: charts plus the HTML page that embeds them.
pub fn exec_report(common: CommonArgs) -> anyhow::Result<()> {
    let repo = SvnRepository::open(&common.url, !common.quiet)
        .context("Failed to reconstruct repository history")?;

    chart::generate_charts(&repo, &common.output, common.title.as_deref())
        .context("Failed to render charts")?;
    generate_html(&repo, &common.output, common.title.as_deref())
        .context("Failed to write HTML report")?;

    if !common.quiet {
        println!(
            "Report written to {}",
            common.output.join("index.html").display()
        );
    }
    Ok(())
}

/// Render `index.html` into `dir`, creating the directory if needed.
///
/// The page is standalone: inline styles, relative image references to the
/// charts living next to it.
pub fn generate_html<R: CommandRunner>(
    repo: &SvnRepository<R>,
    dir: &Path,
    title: Option<&str>,
) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let path = dir.join("index.html");
    fs::write(&path, render(repo, title))?;
    info!(report = %path.display(), "report written");
    Ok(())
}

fn render<R: CommandRunner>(repo: &SvnRepository<R>, title: Option<&str>) -> String {
    let title = title.unwrap_or_else(|| repo.url());
    let mut html = String::new();

    html.push_str(&render_head(title));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(title));
    html.push_str(&render_summary(repo));
    html.push_str(&render_chart_section(
        "Lines of code per commit",
        "loc_per_commit.png",
    ));
    html.push_str(&render_chart_section(
        "Lines of code per day",
        "loc_per_day.png",
    ));
    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn render_head(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>LOC timeline - {}</title>
    <style>
{CSS}
    </style>
</head>
"#,
        escape(title)
    )
}

fn render_header(title: &str) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    format!(
        r#"<div class="header">
    <h1>LOC timeline for {}</h1>
    <p class="timestamp">Generated {}</p>
</div>
"#,
        escape(title),
        timestamp
    )
}

fn render_summary<R: CommandRunner>(repo: &SvnRepository<R>) -> String {
    let store = repo.revisions();
    let last = store.real_revisions().last();
    let final_loc = last.map(|rev| rev.loc).unwrap_or(0);
    let first_date = store
        .real_revisions()
        .iter()
        .find_map(|rev| rev.date)
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let last_date = store
        .real_revisions()
        .iter()
        .rev()
        .find_map(|rev| rev.date)
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        r#"<div class="summary">
    <div class="stat"><span class="value">{}</span> revisions</div>
    <div class="stat"><span class="value">{}</span> lines of code at head</div>
    <div class="stat">first commit <span class="value">{}</span></div>
    <div class="stat">last commit <span class="value">{}</span></div>
</div>
"#,
        store.revision_count(),
        final_loc,
        first_date,
        last_date
    )
}

fn render_chart_section(heading: &str, image: &str) -> String {
    format!(
        r#"<div class="section">
    <h2>{heading}</h2>
    <img src="{image}" alt="{heading}">
</div>
"#
    )
}

fn render_footer() -> String {
    "<div class=\"footer\">svntl</div>\n".to_string()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CSS: &str = r#"        body { font-family: sans-serif; margin: 0; background: #f4f4f4; color: #222; }
        .container { max-width: 860px; margin: 0 auto; padding: 1rem; }
        .header h1 { margin-bottom: 0; font-size: 1.5rem; }
        .timestamp { color: #777; margin-top: 0.2rem; }
        .summary { display: flex; gap: 1.5rem; flex-wrap: wrap; margin: 1rem 0; }
        .stat { background: #fff; border-radius: 6px; padding: 0.6rem 1rem; box-shadow: 0 1px 2px rgba(0,0,0,0.1); }
        .stat .value { font-weight: bold; }
        .section { background: #fff; border-radius: 6px; padding: 1rem; margin: 1rem 0; box-shadow: 0 1px 2px rgba(0,0,0,0.1); }
        .section img { max-width: 100%; }
        .footer { color: #777; text-align: center; padding: 1rem 0; }"#;
