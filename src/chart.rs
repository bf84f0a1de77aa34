use crate::cli::CommonArgs;
use crate::error::{Result, SvntlError};
use crate::svn::{CommandRunner, SvnRepository};
use crate::timeline::{self, label_indexes, PER_COMMIT_LABELS, PER_DAY_LABELS};
use anyhow::Context;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

const CHART_SIZE: (u32, u32) = (800, 600);
const SMALL_CHART_SIZE: (u32, u32) = (200, 150);

pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let repo = SvnRepository::open(&common.url, !common.quiet)
        .context("Failed to reconstruct repository history")?;

    generate_charts(&repo, &common.output, common.title.as_deref())
        .context("Failed to render charts")?;
    Ok(())
}

/// Write the four timeline charts into `dir`, creating it if needed.
pub fn generate_charts<R: CommandRunner>(
    repo: &SvnRepository<R>,
    dir: &Path,
    title: Option<&str>,
) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let title = title.unwrap_or_else(|| repo.url());
    let revisions = repo.revisions().without_leading_zero_loc();

    let commits = timeline::per_commit(revisions);
    let commit_values: Vec<i64> = commits.iter().map(|p| p.loc).collect();
    let commit_labels: Vec<String> = commits.iter().map(|p| p.revision.to_string()).collect();

    let days = timeline::per_day(revisions);
    let day_values: Vec<i64> = days.iter().map(|p| p.loc).collect();
    let day_labels: Vec<String> = days.iter().map(|p| p.date.to_string()).collect();

    for (file, values, labels, max_labels, small) in [
        ("loc_per_commit.png", &commit_values, &commit_labels, PER_COMMIT_LABELS, false),
        ("loc_per_commit_small.png", &commit_values, &commit_labels, PER_COMMIT_LABELS, true),
        ("loc_per_day.png", &day_values, &day_labels, PER_DAY_LABELS, false),
        ("loc_per_day_small.png", &day_values, &day_labels, PER_DAY_LABELS, true),
    ] {
        let path = dir.join(file);
        render_line_chart(&path, title, values, labels, max_labels, small)?;
        info!(chart = %path.display(), "chart written");
    }

    Ok(())
}

/// Render one LOC line chart. `labels` holds one axis label per point; only
/// the thinned subset is drawn so the axis stays readable.
pub fn render_line_chart(
    path: &Path,
    title: &str,
    values: &[i64],
    labels: &[String],
    max_labels: usize,
    small: bool,
) -> Result<()> {
    let size = if small { SMALL_CHART_SIZE } else { CHART_SIZE };
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let x_max = (values.len() as i64 - 1).max(1);
    let y_min = values.iter().copied().min().unwrap_or(0).min(0);
    let y_max = values.iter().copied().max().unwrap_or(0).max(1);

    let caption_font = if small {
        ("sans-serif", 12)
    } else {
        ("sans-serif", 24)
    };

    let mut builder = ChartBuilder::on(&root);
    builder.caption(title, caption_font);
    if !small {
        builder
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 35);
    }
    let mut chart = builder
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(chart_error)?;

    if !small {
        let axis_labels: BTreeMap<i64, &str> = label_indexes(labels.len(), max_labels)
            .into_iter()
            .map(|idx| (idx as i64, labels[idx].as_str()))
            .collect();

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(axis_labels.len().max(2))
            .x_label_formatter(&|x| axis_labels.get(x).map(|l| l.to_string()).unwrap_or_default())
            .draw()
            .map_err(chart_error)?;
    }

    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(idx, &loc)| (idx as i64, loc)),
            &BLUE,
        ))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

fn chart_error<E: std::fmt::Display>(err: E) -> SvntlError {
    SvntlError::Chart(err.to_string())
}
