mod experiment;
mod problem;
mod research;

pub use experiment::ExperimentCommands;
pub use problem::ProblemCommands;
pub use research::ResearchCommands;
