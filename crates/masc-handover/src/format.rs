//! Human-readable rendering of a [`HandoverRecord`].

use crate::types::HandoverRecord;

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        "_none_".to_string()
    } else {
        items.iter().map(|s| format!("- {s}")).collect::<Vec<_>>().join("\n")
    }
}

/// Renders `record` as a standalone markdown document.
#[must_use]
pub fn format_as_markdown(record: &HandoverRecord) -> String {
    format!(
        "# Handover {id}\n\n\
         **From:** {from_agent} **To:** {to_agent}\n\
         **Task:** {task_id} **Session:** {session_id}\n\
         **Reason:** {reason} **Context usage:** {ctx}%\n\n\
         ## Current goal\n{goal}\n\n\
         ## Progress summary\n{summary}\n\n\
         ## Completed steps\n{completed}\n\n\
         ## Pending steps\n{pending}\n\n\
         ## Key decisions\n{decisions}\n\n\
         ## Assumptions\n{assumptions}\n\n\
         ## Warnings\n{warnings}\n\n\
         ## Unresolved errors\n{errors}\n\n\
         ## Modified files\n{files}\n",
        id = record.id,
        from_agent = record.from_agent,
        to_agent = record.to_agent.as_deref().unwrap_or("_unclaimed_"),
        task_id = record.task_id,
        session_id = record.session_id,
        reason = record.handover_reason,
        ctx = record.context_usage_percent,
        goal = record.current_goal,
        summary = record.progress_summary,
        completed = bullet_list(&record.completed_steps),
        pending = bullet_list(&record.pending_steps),
        decisions = bullet_list(&record.key_decisions),
        assumptions = bullet_list(&record.assumptions),
        warnings = bullet_list(&record.warnings),
        errors = bullet_list(&record.unresolved_errors),
        files = bullet_list(&record.modified_files),
    )
}

/// Builds the prompt text handed to the successor agent claiming
/// `record`.
///
/// References completed/pending steps, unresolved errors, and modified
/// files, plus `additional_instructions` if given.
#[must_use]
pub fn build_successor_prompt(record: &HandoverRecord, additional_instructions: Option<&str>) -> String {
    let mut prompt = format!(
        "You are taking over task {task_id} from {from_agent}.\n\n\
         Goal: {goal}\n\n\
         Completed so far:\n{completed}\n\n\
         Still pending:\n{pending}\n\n\
         Unresolved errors:\n{errors}\n\n\
         Files already modified:\n{files}\n",
        task_id = record.task_id,
        from_agent = record.from_agent,
        goal = record.current_goal,
        completed = bullet_list(&record.completed_steps),
        pending = bullet_list(&record.pending_steps),
        errors = bullet_list(&record.unresolved_errors),
        files = bullet_list(&record.modified_files),
    );
    if let Some(extra) = additional_instructions {
        prompt.push_str("\nAdditional instructions:\n");
        prompt.push_str(extra);
        prompt.push('\n');
    }
    prompt
}
