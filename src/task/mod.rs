pub mod execution;
pub mod executor;
pub mod run_state;

pub use execution::{FetchCompletion, FetchInvocation, execute_invocation};
pub use executor::FetchExecutor;
pub use run_state::FetchRunState;
