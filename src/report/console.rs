//! Terminal output.

use std::io::{self, Write};

use super::paint::Painter;
use super::{Report, new_commits};
use crate::models::CommitId;

pub fn render_console(report: &Report<'_>, color: bool) -> String {
    lines(report, Painter::new(color)).join("\n") + "\n"
}

pub fn write_report<W: Write>(report: &Report<'_>, color: bool, out: &mut W) -> io::Result<()> {
    out.write_all(render_console(report, color).as_bytes())?;
    out.flush()
}

fn lines(report: &Report<'_>, paint: Painter) -> Vec<String> {
    let repository = report.repository();
    let authors = report.authors();
    let (from, to) = report.range();

    let mut lines = vec![
        format!(
            "Check commits before {} deployment. ({} <- {}) {}",
            paint.red(&repository.name),
            paint.cyan(report.target),
            paint.cyan(report.source),
            paint.gray(&repository.compare_url(from, to)),
        ),
        format!("{}: {}", paint.yellow("Author"), authors.len()),
    ];

    let last = match report.last_commit {
        Some(id) => commit_line(report, id, paint),
        None => "(none)".to_string(),
    };
    lines.push(format!("{}: {}", paint.blue("Last commit"), last));

    for author in authors {
        lines.push(String::new());
        lines.push(paint.green(&format!("@{}", author.name)));
        for entry in &author.commits {
            let name = &report.registry.repositories.get(entry.repo).name;
            lines.push(format!(
                " > {}: {}",
                paint.yellow(name),
                new_commits(entry.commits.len())
            ));
            lines.extend(
                entry
                    .commits
                    .iter()
                    .map(|id| format!(" - {}", commit_line(report, *id, paint))),
            );
        }
    }

    lines
}

fn commit_line(report: &Report<'_>, id: CommitId, paint: Painter) -> String {
    let commit = report.registry.commits.get(id);
    let repository = report.registry.repositories.get(commit.repo);
    format!(
        "{} {} {}",
        paint.yellow(&commit.hash),
        commit.subject(),
        paint.gray(&repository.commit_url(&commit.long_hash))
    )
}
