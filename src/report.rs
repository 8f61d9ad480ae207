//! Project reporting: arithmetic over already-fetched issue collections.
//!
//! Story points are summed from the real estimation field on each issue;
//! issues without an estimate simply contribute nothing to the point
//! totals. When no issue in the set carries points, completion falls back
//! to done-issue counts.

use std::collections::BTreeMap;

use crate::api::types::Issue;

/// Aggregated counts and point totals for a set of issues.
#[derive(Debug, Default, PartialEq)]
pub struct ProjectReport {
    pub total: usize,
    pub done: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub by_assignee: BTreeMap<String, usize>,
    pub points_total: f64,
    pub points_done: f64,
}

impl ProjectReport {
    /// Completion percentage, points-based when any issue is estimated.
    pub fn completion_pct(&self) -> f64 {
        if self.points_total > 0.0 {
            self.points_done / self.points_total * 100.0
        } else if self.total > 0 {
            self.done as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Aggregate a fetched issue collection into a report.
pub fn project_summary(issues: &[Issue]) -> ProjectReport {
    let mut report = ProjectReport {
        total: issues.len(),
        ..Default::default()
    };

    for issue in issues {
        *report
            .by_status
            .entry(issue.status().to_string())
            .or_insert(0) += 1;
        *report
            .by_type
            .entry(issue.issue_type().to_string())
            .or_insert(0) += 1;
        *report
            .by_assignee
            .entry(issue.assignee_name().to_string())
            .or_insert(0) += 1;

        let done = issue.is_done();
        if done {
            report.done += 1;
        }
        if let Some(points) = issue.story_points() {
            report.points_total += points;
            if done {
                report.points_done += points;
            }
        }
    }

    report
}

/// Render a report as plain text, ready for the console or a file.
pub fn render(title: &str, report: &ProjectReport) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");

    out.push_str(&format!("Issues: {} ({} done)\n", report.total, report.done));
    if report.points_total > 0.0 {
        out.push_str(&format!(
            "Story points: {:.1} of {:.1} completed\n",
            report.points_done, report.points_total
        ));
    }
    out.push_str(&format!("Completion: {:.0}%\n", report.completion_pct()));

    render_group(&mut out, "By status", &report.by_status);
    render_group(&mut out, "By type", &report.by_type);
    render_group(&mut out, "By assignee", &report.by_assignee);

    out
}

fn render_group(out: &mut String, heading: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(heading);
    out.push('\n');
    for (name, count) in counts {
        out.push_str(&format!("  {:<24} {}\n", name, count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Issue;

    fn issue(key: &str, status: &str, done: bool, kind: &str, points: Option<f64>) -> Issue {
        let category = if done { "done" } else { "new" };
        let points = points
            .map(|p| format!(r#", "customfield_10016": {}"#, p))
            .unwrap_or_default();
        let json = format!(
            r#"{{
                "id": "1", "key": "{key}", "self": "u",
                "fields": {{
                    "summary": "s",
                    "status": {{
                        "id": "1", "name": "{status}",
                        "statusCategory": {{"id": 1, "key": "{category}", "name": "{status}"}}
                    }},
                    "issuetype": {{"id": "1", "name": "{kind}"}}
                    {points}
                }}
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn empty_collection_yields_an_empty_report() {
        let report = project_summary(&[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.completion_pct(), 0.0);
    }

    #[test]
    fn counts_group_by_status_type_and_assignee() {
        let issues = vec![
            issue("P-1", "Open", false, "Bug", None),
            issue("P-2", "Open", false, "Task", None),
            issue("P-3", "Done", true, "Bug", None),
        ];
        let report = project_summary(&issues);

        assert_eq!(report.total, 3);
        assert_eq!(report.done, 1);
        assert_eq!(report.by_status["Open"], 2);
        assert_eq!(report.by_status["Done"], 1);
        assert_eq!(report.by_type["Bug"], 2);
        assert_eq!(report.by_assignee["Unassigned"], 3);
    }

    #[test]
    fn completion_uses_real_story_points_when_present() {
        let issues = vec![
            issue("P-1", "Done", true, "Story", Some(3.0)),
            issue("P-2", "Open", false, "Story", Some(5.0)),
            // An unestimated issue must not count as implicit points.
            issue("P-3", "Open", false, "Task", None),
        ];
        let report = project_summary(&issues);

        assert_eq!(report.points_total, 8.0);
        assert_eq!(report.points_done, 3.0);
        assert!((report.completion_pct() - 37.5).abs() < f64::EPSILON);
    }

    #[test]
    fn completion_falls_back_to_issue_counts_without_estimates() {
        let issues = vec![
            issue("P-1", "Done", true, "Bug", None),
            issue("P-2", "Open", false, "Bug", None),
        ];
        let report = project_summary(&issues);
        assert!((report.completion_pct() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn render_includes_headline_numbers() {
        let issues = vec![
            issue("P-1", "Done", true, "Story", Some(2.0)),
            issue("P-2", "Open", false, "Bug", Some(2.0)),
        ];
        let report = project_summary(&issues);
        let text = render("Sprint report", &report);

        assert!(text.starts_with("Sprint report\n============="));
        assert!(text.contains("Issues: 2 (1 done)"));
        assert!(text.contains("Story points: 2.0 of 4.0 completed"));
        assert!(text.contains("Completion: 50%"));
        assert!(text.contains("By status"));
    }
}
