use crate::source::transport::Transport;
use crate::task::execution::{FetchCompletion, FetchInvocation, execute_invocation};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecMode {
    Thread,
    Inline,
}

/// Runs fetches off the event thread and hands completions back through a
/// channel that the owner drains on tick.
pub struct FetchExecutor {
    transport: Arc<dyn Transport>,
    mode: ExecMode,
    completion_tx: Sender<FetchCompletion>,
    completion_rx: Receiver<FetchCompletion>,
}

impl FetchExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_mode(transport, ExecMode::Thread)
    }

    /// Runs the transport on the calling thread; the completion is still
    /// only visible after the next drain.
    pub fn inline(transport: Arc<dyn Transport>) -> Self {
        Self::with_mode(transport, ExecMode::Inline)
    }

    fn with_mode(transport: Arc<dyn Transport>, mode: ExecMode) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<FetchCompletion>();
        Self {
            transport,
            mode,
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, invocation: FetchInvocation) {
        match self.mode {
            ExecMode::Inline => {
                let completion = execute_invocation(invocation, self.transport.as_ref());
                let _ = self.completion_tx.send(completion);
            }
            ExecMode::Thread => {
                let completion_tx = self.completion_tx.clone();
                let transport = Arc::clone(&self.transport);
                std::thread::spawn(move || {
                    let completion = execute_invocation(invocation, transport.as_ref());
                    let _ = completion_tx.send(completion);
                });
            }
        }
    }

    pub fn drain_ready(&self) -> Vec<FetchCompletion> {
        let mut out = Vec::<FetchCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Blocks until one completion arrives or `timeout` elapses.
    pub fn wait_next(&self, timeout: Duration) -> Option<FetchCompletion> {
        match self.completion_rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchExecutor;
    use crate::source::provider::RequestDescriptor;
    use crate::source::transport::StaticTransport;
    use crate::task::execution::FetchInvocation;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn inline_completion_is_queued_until_drained() {
        let executor =
            FetchExecutor::inline(Arc::new(StaticTransport::new().with_body("pe", "[]")));
        executor.spawn(FetchInvocation::new(1, "pe", RequestDescriptor::new("pe")));
        let ready = executor.drain_ready();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].run_id, 1);
        assert!(executor.drain_ready().is_empty());
    }

    #[test]
    fn threaded_completion_arrives() {
        let executor = FetchExecutor::new(Arc::new(
            StaticTransport::new().with_body("pe", r#"["pear"]"#),
        ));
        executor.spawn(FetchInvocation::new(7, "pe", RequestDescriptor::new("pe")));
        let completion = executor
            .wait_next(Duration::from_secs(5))
            .expect("completion");
        assert_eq!(completion.run_id, 7);
        assert_eq!(completion.result.expect("body"), r#"["pear"]"#);
    }
}
