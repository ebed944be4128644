//! Built-in step sequence used when no steps are configured.

use crate::models::StepDefinition;

/// The web search request workflow of the sub-agent scheduling architecture.
pub fn default_workflow() -> Vec<StepDefinition> {
    [
        ("Task Dispatched", "User requests web search via Main Agent"),
        ("Scheduler Receives", "McpSubAgentScheduler creates task ID"),
        (
            "Pool Acquires Instance",
            "Checking for idle Perplexity instance",
        ),
        ("Factory Creates Instance", "New Sub-Agent instance created"),
        ("Task Executing", "Instance calls Perplexity MCP tools"),
        ("Result Returned", "Search results sent back to Main Agent"),
    ]
    .into_iter()
    .map(|(title, description)| StepDefinition::new(title, description))
    .collect()
}
