//! Fixed tool catalog.
//!
//! Each tool maps 1:1 to a REST call. Input schemas are generated from the
//! argument structs with `schemars`, so the advertised schema and the
//! deserializer cannot drift apart. Results come back as short prose from
//! [`crate::summary`], not as raw JSON.
//!
//! | Tool                        | REST call                                        |
//! |-----------------------------|--------------------------------------------------|
//! | `listProblemsToInvestigate` | `GET /problems/investigate`                      |
//! | `getProblem`                | `GET /problems/:id`                              |
//! | `addResearch`               | `POST /problems/:p/research`                     |
//! | `listResearch`              | `GET /problems/:p/research`                      |
//! | `getApprovedResearch`       | `GET /problems/:p/research/approved`             |
//! | `addExperiment`             | `POST /problems/:p/experiments`                  |
//! | `getApprovedExperiments`    | `GET /problems/:p/experiments/approved`          |
//! | `startExperiment`           | `PATCH /problems/:p/experiments/:id` (IN PROGRESS) |
//! | `completeExperiment`        | `PATCH /problems/:p/experiments/:id` (FINISHED)  |

use disco_client::{ApiClient, ClientError};
use disco_core::EntityId;
use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::McpError;
use crate::summary;

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NoArgs {}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProblemRef {
    /// Problem id.
    pub id: EntityId,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemScope {
    /// Id of the owning problem.
    pub problem_id: EntityId,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddResearchArgs {
    /// Id of the owning problem.
    pub problem_id: EntityId,
    /// The research finding.
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddExperimentArgs {
    /// Id of the owning problem.
    pub problem_id: EntityId,
    /// What the experiment will try.
    pub proposal: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentRef {
    /// Id of the owning problem.
    pub problem_id: EntityId,
    /// Experiment id.
    pub experiment_id: EntityId,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompleteExperimentArgs {
    /// Id of the owning problem.
    pub problem_id: EntityId,
    /// Experiment id.
    pub experiment_id: EntityId,
    /// Link to the experiment's results.
    #[serde(default)]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Entry of the `tools/list` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn definition<T: JsonSchema>(name: &'static str, description: &'static str) -> ToolDefinition {
    ToolDefinition {
        name,
        description,
        input_schema: Value::from(schema_for!(T)),
    }
}

/// All tools, in a stable order.
#[must_use]
pub fn catalog() -> Vec<ToolDefinition> {
    vec![
        definition::<NoArgs>(
            "listProblemsToInvestigate",
            "List problems flagged for active research, with their research and experiments.",
        ),
        definition::<ProblemRef>(
            "getProblem",
            "Get one problem with its research and experiments.",
        ),
        definition::<AddResearchArgs>(
            "addResearch",
            "Attach a research finding to a problem. New findings await human approval.",
        ),
        definition::<ProblemScope>("listResearch", "List all research findings of a problem."),
        definition::<ProblemScope>(
            "getApprovedResearch",
            "List the research findings of a problem that a human has approved.",
        ),
        definition::<AddExperimentArgs>(
            "addExperiment",
            "Propose an experiment for a problem. New proposals await human approval.",
        ),
        definition::<ProblemScope>(
            "getApprovedExperiments",
            "List the experiments of a problem that a human has approved.",
        ),
        definition::<ExperimentRef>("startExperiment", "Mark an experiment as IN PROGRESS."),
        definition::<CompleteExperimentArgs>(
            "completeExperiment",
            "Mark an experiment as FINISHED, optionally recording a link to its results.",
        ),
    ]
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    ListProblemsToInvestigate,
    GetProblem(ProblemRef),
    AddResearch(AddResearchArgs),
    ListResearch(ProblemScope),
    GetApprovedResearch(ProblemScope),
    AddExperiment(AddExperimentArgs),
    GetApprovedExperiments(ProblemScope),
    StartExperiment(ExperimentRef),
    CompleteExperiment(CompleteExperimentArgs),
}

fn args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, McpError> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| McpError::InvalidParams(format!("{tool}: {e}")))
}

impl ToolCall {
    /// Resolve a tool name and its raw arguments.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTool` for a name outside the catalog, or
    /// `InvalidParams` if the arguments do not match the tool's schema.
    pub fn parse(name: &str, arguments: Value) -> Result<Self, McpError> {
        Ok(match name {
            "listProblemsToInvestigate" => {
                args::<NoArgs>(name, arguments)?;
                Self::ListProblemsToInvestigate
            }
            "getProblem" => Self::GetProblem(args(name, arguments)?),
            "addResearch" => Self::AddResearch(args(name, arguments)?),
            "listResearch" => Self::ListResearch(args(name, arguments)?),
            "getApprovedResearch" => Self::GetApprovedResearch(args(name, arguments)?),
            "addExperiment" => Self::AddExperiment(args(name, arguments)?),
            "getApprovedExperiments" => Self::GetApprovedExperiments(args(name, arguments)?),
            "startExperiment" => Self::StartExperiment(args(name, arguments)?),
            "completeExperiment" => Self::CompleteExperiment(args(name, arguments)?),
            _ => return Err(McpError::UnknownTool(name.to_string())),
        })
    }

    /// Perform the REST call and summarize the result as short text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the call fails or the API rejects it.
    pub async fn execute(self, client: &ApiClient) -> Result<String, ClientError> {
        Ok(match self {
            Self::ListProblemsToInvestigate => {
                summary::problems_to_investigate(&client.list_investigate_problems().await?)
            }
            Self::GetProblem(a) => summary::problem(&client.get_problem(a.id).await?),
            Self::AddResearch(a) => {
                summary::research_added(&client.add_research(a.problem_id, &a.content).await?)
            }
            Self::ListResearch(a) => {
                summary::research_list(a.problem_id, &client.list_research(a.problem_id).await?)
            }
            Self::GetApprovedResearch(a) => summary::approved_research(
                a.problem_id,
                &client.list_approved_research(a.problem_id).await?,
            ),
            Self::AddExperiment(a) => summary::experiment_added(
                &client.add_experiment(a.problem_id, &a.proposal).await?,
            ),
            Self::GetApprovedExperiments(a) => summary::approved_experiments(
                a.problem_id,
                &client.list_approved_experiments(a.problem_id).await?,
            ),
            Self::StartExperiment(a) => summary::experiment_started(
                &client.start_experiment(a.problem_id, a.experiment_id).await?,
            ),
            Self::CompleteExperiment(a) => summary::experiment_completed(
                &client
                    .complete_experiment(a.problem_id, a.experiment_id, a.url)
                    .await?,
            ),
        })
    }
}
