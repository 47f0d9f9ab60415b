//! Short text renderings of API results for tool output.
//!
//! Tools answer in a few plain lines an agent can quote back; full JSON
//! stays on the `resources/read` path.

use std::fmt::Write;

use disco_core::EntityId;
use disco_core::entities::{Experiment, Problem, Research};

/// Longest single line kept from free text before it is cut with `…`.
const LINE_LIMIT: usize = 120;

fn one_line(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= LINE_LIMIT {
        return flat;
    }
    let mut cut = flat.chars().take(LINE_LIMIT - 1).collect::<String>();
    cut.push('…');
    cut
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {singular}")
    } else {
        format!("{n} {plural}")
    }
}

const fn approval(approved: bool) -> &'static str {
    if approved { "approved" } else { "pending" }
}

fn research_line(item: &Research) -> String {
    format!(
        "#{} [{}] {}",
        item.id,
        approval(item.is_approved),
        one_line(&item.content)
    )
}

fn experiment_line(item: &Experiment) -> String {
    let mut line = format!(
        "#{} [{}] {}: {}",
        item.id,
        approval(item.is_approved),
        item.status,
        one_line(&item.proposal)
    );
    if let Some(url) = &item.url {
        let _ = write!(line, " ({url})");
    }
    line
}

fn with_lines(header: String, lines: impl Iterator<Item = String>) -> String {
    let mut out = header;
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

#[must_use]
pub fn problems_to_investigate(problems: &[Problem]) -> String {
    if problems.is_empty() {
        return "No problems are flagged for investigation.".to_string();
    }
    with_lines(
        format!("{} to investigate:", count(problems.len(), "problem", "problems")),
        problems.iter().map(|p| {
            format!(
                "#{} {} (research {}/{} approved, experiments {}/{} approved)",
                p.id,
                one_line(&p.brief),
                p.approved_research().count(),
                p.research.len(),
                p.approved_experiments().count(),
                p.experiments.len(),
            )
        }),
    )
}

#[must_use]
pub fn problem(problem: &Problem) -> String {
    let mut out = format!("Problem {}: {}", problem.id, one_line(&problem.brief));
    if problem.is_investigate {
        out.push_str("\nFlagged for investigation.");
    }
    if !problem.related_experiments.is_empty() {
        let _ = write!(out, "\nRelated: {}", problem.related_experiments.join(", "));
    }
    let _ = write!(out, "\nResearch ({}):", problem.research.len());
    for item in &problem.research {
        let _ = write!(out, "\n  {}", research_line(item));
    }
    let _ = write!(out, "\nExperiments ({}):", problem.experiments.len());
    for item in &problem.experiments {
        let _ = write!(out, "\n  {}", experiment_line(item));
    }
    out
}

#[must_use]
pub fn research_added(item: &Research) -> String {
    format!(
        "Research {} added to problem {} (awaiting approval)",
        item.id, item.problem_id
    )
}

#[must_use]
pub fn research_list(problem_id: EntityId, items: &[Research]) -> String {
    if items.is_empty() {
        return format!("No research for problem {problem_id}.");
    }
    with_lines(
        format!(
            "{} for problem {problem_id}:",
            count(items.len(), "research item", "research items")
        ),
        items.iter().map(research_line),
    )
}

#[must_use]
pub fn approved_research(problem_id: EntityId, items: &[Research]) -> String {
    if items.is_empty() {
        return format!("No approved research for problem {problem_id} yet.");
    }
    with_lines(
        format!(
            "{} for problem {problem_id}:",
            count(items.len(), "approved research item", "approved research items")
        ),
        items
            .iter()
            .map(|item| format!("#{} {}", item.id, one_line(&item.content))),
    )
}

#[must_use]
pub fn experiment_added(item: &Experiment) -> String {
    format!(
        "Experiment {} proposed for problem {} ({}, awaiting approval)",
        item.id, item.problem_id, item.status
    )
}

#[must_use]
pub fn approved_experiments(problem_id: EntityId, items: &[Experiment]) -> String {
    if items.is_empty() {
        return format!("No approved experiments for problem {problem_id} yet.");
    }
    with_lines(
        format!(
            "{} for problem {problem_id}:",
            count(items.len(), "approved experiment", "approved experiments")
        ),
        items.iter().map(experiment_line),
    )
}

#[must_use]
pub fn experiment_started(item: &Experiment) -> String {
    format!("Experiment {} is now {}", item.id, item.status)
}

#[must_use]
pub fn experiment_completed(item: &Experiment) -> String {
    match &item.url {
        Some(url) => format!("Experiment {} {}, url {url}", item.id, item.status),
        None => format!("Experiment {} {}", item.id, item.status),
    }
}
