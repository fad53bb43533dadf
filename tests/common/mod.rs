//! Goal/objective fixtures passed explicitly into each test.
#![allow(dead_code)]

use chrono::{Datelike, Utc};
use stratpulse::domain::goals::{Goal, Objective};
use stratpulse::domain::performance::PerformanceRequest;

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// A date inside the current UTC year.
pub fn due_this_year() -> String {
    format!("{}-12-31", current_year())
}

pub fn due_last_year() -> String {
    format!("{}-06-30", current_year() - 1)
}

/// Two on-track goals, both linked to objectives.
pub fn high_performance_team() -> PerformanceRequest {
    PerformanceRequest::new(
        vec![
            Goal::new("1", "Launch Product V2", 85.0)
                .with_due_date(due_this_year())
                .with_priority("high")
                .with_linked_objective("obj1"),
            Goal::new("2", "Improve Customer NPS", 75.0)
                .with_due_date(due_this_year())
                .with_priority("medium")
                .with_parent("obj2"),
        ],
        vec![
            Objective::new("obj1", "Market Leadership", 70.0),
            Objective::new("obj2", "Customer Excellence", 65.0),
        ],
    )
}

/// One at-risk and one behind goal, neither linked.
pub fn at_risk_scenario() -> PerformanceRequest {
    PerformanceRequest::new(
        vec![
            Goal::new("3", "Revenue Growth 25%", 45.0)
                .with_due_date(due_this_year())
                .with_priority("high"),
            Goal::new("4", "Team Expansion", 25.0)
                .with_due_date(due_this_year())
                .with_priority("medium"),
        ],
        vec![Objective::new("obj3", "Business Growth", 40.0)],
    )
}

/// Goals spread over every band, priority and alignment state.
pub fn mixed_portfolio() -> PerformanceRequest {
    let progress = [5.0, 12.0, 39.0, 40.0, 55.0, 69.0, 70.0, 88.0, 100.0, 0.0];
    let priorities = ["high", "medium", "low", "urgent"];
    let goals = progress
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut goal = Goal::new(format!("g{}", i), format!("Goal {}", i), *p)
                .with_priority(priorities[i % priorities.len()]);
            if i % 3 != 0 {
                goal = goal.with_due_date(due_this_year());
            } else if i % 2 == 0 {
                goal = goal.with_due_date(due_last_year());
            }
            if i % 4 == 0 {
                goal = goal.with_parent("obj1");
            }
            goal
        })
        .collect();
    PerformanceRequest::new(goals, vec![Objective::new("obj1", "Growth", 50.0)])
}

/// Request body whose goals carry wrong-typed optional fields.
///
/// Decoded leniently it holds one on-track and one at-risk goal due this year,
/// plus an undated aligned goal: 2 of 3 goals aligned.
pub fn loosely_typed_body() -> String {
    let due = due_this_year();
    format!(
        r#"{{
  "goals": [
    {{"id": 1, "title": "Revenue", "progress_percentage": "80", "priority": 5,
      "parent_id": 7, "due_date": "{due}"}},
    {{"id": "2", "title": "Hiring", "progress_percentage": 50, "status": 3,
      "linkedObjective": "o1", "due_date": "{due}"}},
    {{"id": "3", "title": "Undated", "progress_percentage": 90,
      "due_date": 20251231, "parent_id": "o2"}}
  ],
  "objectives": [{{"id": 9, "progress_percentage": "n/a"}}],
  "timeframe": null
}}"#
    )
}
