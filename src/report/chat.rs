//! Slack incoming-webhook payload.
//!
//! Link markup is `<url|label>` and mentions are `<@name>`, so `&`, `<` and
//! `>` in free text (subjects, author names) must be escaped.

use super::{Report, new_commits};
use crate::models::{Attachment, Author, ChatPayload, CommitId};

const ACCENT_COLOR: &str = "#00B86A";

pub fn build_payload(report: &Report<'_>) -> ChatPayload {
    let repository = report.repository();
    let authors = report.authors();
    let (from, to) = report.range();

    let mut text = format!(
        ":white_check_mark: *{}* deployment request by <@{}> (`<{}|{}>` <- `<{}|{}>` <{}|compare>)\n:technologist: Author: {}",
        escape(&repository.name),
        escape(report.requester),
        repository.tree_url(from),
        escape(report.target),
        repository.tree_url(to),
        escape(report.source),
        repository.compare_url(from, to),
        authors.len(),
    );
    if let Some(id) = report.last_commit {
        text.push_str(&format!("\nLast commit: {}", commit_line(report, id)));
    }

    let attachments = authors
        .into_iter()
        .map(|author| Attachment {
            text: author_block(report, author),
            color: ACCENT_COLOR.to_string(),
        })
        .collect();

    ChatPayload { text, attachments }
}

fn author_block(report: &Report<'_>, author: &Author) -> String {
    let mut lines = vec![format!("- <@{}>", escape(&author.name))];
    for entry in &author.commits {
        let name = &report.registry.repositories.get(entry.repo).name;
        lines.push(format!("*{}*: {}", escape(name), new_commits(entry.commits.len())));
        lines.extend(entry.commits.iter().map(|id| commit_line(report, *id)));
    }
    lines.join("\n")
}

fn commit_line(report: &Report<'_>, id: CommitId) -> String {
    let commit = report.registry.commits.get(id);
    let repository = report.registry.repositories.get(commit.repo);
    format!(
        "`<{}|{}>` {} - {}",
        repository.commit_url(&commit.long_hash),
        commit.hash,
        escape(commit.subject()),
        escape(commit.author()),
    )
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
