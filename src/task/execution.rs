use crate::source::provider::RequestDescriptor;
use crate::source::transport::{FetchError, Transport};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct FetchInvocation {
    pub run_id: u64,
    pub query: String,
    pub request: RequestDescriptor,
}

impl FetchInvocation {
    pub fn new(run_id: u64, query: impl Into<String>, request: RequestDescriptor) -> Self {
        Self {
            run_id,
            query: query.into(),
            request,
        }
    }
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub run_id: u64,
    pub query: String,
    pub result: Result<String, FetchError>,
}

impl FetchCompletion {
    pub fn ok(run_id: u64, query: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            run_id,
            query: query.into(),
            result: Ok(body.into()),
        }
    }

    pub fn failed(run_id: u64, query: impl Into<String>, error: FetchError) -> Self {
        Self {
            run_id,
            query: query.into(),
            result: Err(error),
        }
    }
}

pub fn execute_invocation(invocation: FetchInvocation, transport: &dyn Transport) -> FetchCompletion {
    let started_at = Instant::now();
    let result = transport.fetch(&invocation.request);
    tracing::debug!(
        run_id = invocation.run_id,
        target = %invocation.request.target,
        ok = result.is_ok(),
        elapsed_ms = started_at.elapsed().as_millis() as u64,
        "fetch finished"
    );
    FetchCompletion {
        run_id: invocation.run_id,
        query: invocation.query,
        result,
    }
}
