use clap::ValueEnum;
use colored::{Color, Colorize};
use serde::Serialize;

use crate::config::CommitStyle;
use crate::error::Result;
use crate::git::CommitRef;
use crate::model::{Issue, IssueType, Status};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Pretty,
    Json,
}

/// Immutable color choice threaded into rendering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[derive(Serialize)]
struct IssueView<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    issue_type: IssueType,
    milestone: &'a str,
    status: Status,
}

impl<'a> IssueView<'a> {
    fn new(issue: &'a Issue, open: &[String]) -> Self {
        Self {
            id: &issue.id,
            title: &issue.title,
            issue_type: issue.issue_type,
            milestone: &issue.milestone,
            status: Status::of(&issue.id, open),
        }
    }
}

/// One-line summary: `#id title [Type] [milestone] - status`.
pub fn render_issue(issue: &Issue, status: Status, style: Style) -> String {
    let status_color = match status {
        Status::Open => Color::Yellow,
        Status::Closed => Color::Green,
    };
    let id = format!("#{:<4}", issue.id);
    let title = format!("{:<48}", issue.title);
    let meta = format!(
        "{:<6} {:<7}",
        format!("[{}]", issue.issue_type),
        format!("[{}]", issue.milestone)
    );
    format!(
        "{} {} {} - {}",
        style.paint(&id, Color::Cyan),
        style.paint(&title, Color::White),
        style.paint(&meta, Color::Blue),
        style.paint(&status.to_string(), status_color)
    )
}

pub fn render_commit(commit: &CommitRef, commit_style: CommitStyle, style: Style) -> String {
    match commit_style {
        CommitStyle::Oneline => format!(
            "{} {}",
            style.paint(commit.short_sha(), Color::Yellow),
            commit.summary()
        ),
        CommitStyle::Full => {
            let body: Vec<String> = commit
                .message
                .lines()
                .map(|line| format!("    {line}"))
                .collect();
            format!(
                "{}\nAuthor: {}\n\n{}",
                style.paint(&format!("commit {}", commit.sha), Color::Yellow),
                commit.author,
                body.join("\n")
            )
        }
    }
}

/// Format and style for one invocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Printer {
    pub format: Format,
    pub style: Style,
}

impl Printer {
    pub fn new(format: Format, style: Style) -> Self {
        Self { format, style }
    }

    pub fn issues(&self, issues: &[Issue], open: &[String]) -> Result<()> {
        match self.format {
            Format::Json => {
                let views: Vec<IssueView> =
                    issues.iter().map(|i| IssueView::new(i, open)).collect();
                println!("{}", serde_json::to_string(&views)?);
            }
            Format::Pretty => {
                for issue in issues {
                    println!(
                        "{}",
                        render_issue(issue, Status::of(&issue.id, open), self.style)
                    );
                }
            }
        }
        Ok(())
    }

    pub fn issue(&self, issue: &Issue, open: &[String]) -> Result<()> {
        match self.format {
            Format::Json => {
                println!("{}", serde_json::to_string(&IssueView::new(issue, open))?)
            }
            Format::Pretty => println!(
                "{}",
                render_issue(issue, Status::of(&issue.id, open), self.style)
            ),
        }
        Ok(())
    }

    /// An issue followed by the commits that mention it.
    pub fn issue_with_commits(
        &self,
        issue: &Issue,
        open: &[String],
        commits: &[CommitRef],
        commit_style: CommitStyle,
    ) -> Result<()> {
        match self.format {
            Format::Json => {
                let mut view = serde_json::to_value(IssueView::new(issue, open))?;
                view["commits"] = commits
                    .iter()
                    .map(|c| serde_json::json!({ "sha": c.sha, "summary": c.summary() }))
                    .collect();
                println!("{view}");
            }
            Format::Pretty => {
                self.issue(issue, open)?;
                if !commits.is_empty() {
                    println!();
                }
                for commit in commits {
                    println!("{}", render_commit(commit, commit_style, self.style));
                }
            }
        }
        Ok(())
    }

    /// Free-form status line, e.g. confirmations and not-found notices.
    pub fn message(&self, code: &str, text: &str) {
        match self.format {
            Format::Json => {
                println!("{}", serde_json::json!({ "result": code, "message": text }))
            }
            Format::Pretty => println!("{text}"),
        }
    }
}
