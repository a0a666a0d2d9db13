mod pass;
mod state;

pub use pass::{DashboardView, PassError, PassRequest, SourceSet, run_pass};
pub use state::{
    DashboardEvent, DashboardSnapshot, DashboardState, PassCompletion, Readout, reduce,
};

#[cfg(test)]
pub(crate) use pass::AgentView;
