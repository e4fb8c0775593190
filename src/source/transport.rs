use crate::source::provider::RequestDescriptor;
use indexmap::IndexMap;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no transport configured")]
    NoTransport,
    #[error("spawn failed: {0}")]
    Spawn(#[source] io::Error),
    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),
    #[error("read output failed: {0}")]
    Output(#[source] io::Error),
    #[error("timeout after {0}ms")]
    Timeout(u64),
    #[error("exit status {code:?}: {stderr}")]
    Status { code: Option<i32>, stderr: String },
    #[error("no response for target '{0}'")]
    NotFound(String),
    #[error("transport failed: {0}")]
    Failed(String),
    #[error("response body is empty")]
    EmptyBody,
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a JSON list, got {kind}")]
    NotAList { kind: &'static str },
}

/// Performs one GET-style request and returns the raw body.
pub trait Transport: Send + Sync {
    fn fetch(&self, request: &RequestDescriptor) -> Result<String, FetchError>;
}

/// Runs a program per request. The target is appended as the last
/// argument, options are exported as `SUGGEST_<KEY>` environment variables,
/// and stdout is the body.
#[derive(Debug, Clone)]
pub struct ExecTransport {
    program: String,
    args: Vec<String>,
    timeout_ms: u64,
}

impl ExecTransport {
    pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms.max(1);
        self
    }
}

impl Transport for ExecTransport {
    fn fetch(&self, request: &RequestDescriptor) -> Result<String, FetchError> {
        let mut command = Command::new(self.program.as_str());
        command
            .args(self.args.as_slice())
            .arg(request.target.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &request.options {
            command.env(format!("SUGGEST_{}", key.to_ascii_uppercase()), value);
        }

        let mut child = command.spawn().map_err(FetchError::Spawn)?;
        // Pipes are drained while the child runs; a full pipe would stall it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let timeout = Duration::from_millis(self.timeout_ms);
        let started_at = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started_at.elapsed() >= timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        // Readers are detached; a grandchild may still hold the pipes.
                        drop((stdout, stderr));
                        return Err(FetchError::Timeout(self.timeout_ms));
                    }
                    thread::sleep(Duration::from_millis(10));
                }
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(FetchError::Wait(err));
                }
            }
        };

        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;
        if !status.success() {
            let stderr = String::from_utf8_lossy(stderr.as_slice());
            return Err(FetchError::Status {
                code: status.code(),
                stderr: stderr.trim_end_matches(['\r', '\n']).to_string(),
            });
        }
        Ok(String::from_utf8_lossy(stdout.as_slice()).into_owned())
    }
}

type PipeReader = Option<JoinHandle<io::Result<Vec<u8>>>>;

fn drain(pipe: Option<impl Read + Send + 'static>) -> PipeReader {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut bytes = Vec::new();
            pipe.read_to_end(&mut bytes)?;
            Ok(bytes)
        })
    })
}

fn collect(reader: PipeReader) -> Result<Vec<u8>, FetchError> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    match handle.join() {
        Ok(bytes) => bytes.map_err(FetchError::Output),
        Err(_) => Err(FetchError::Output(io::Error::other("pipe reader panicked"))),
    }
}

#[derive(Debug, Clone)]
struct StaticReply {
    body: Result<String, String>,
    delay: Option<Duration>,
}

/// In-memory transport keyed by target.
#[derive(Debug, Clone, Default)]
pub struct StaticTransport {
    replies: IndexMap<String, StaticReply>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, target: impl Into<String>, body: impl Into<String>) -> Self {
        self.replies.insert(
            target.into(),
            StaticReply {
                body: Ok(body.into()),
                delay: None,
            },
        );
        self
    }

    pub fn with_failure(mut self, target: impl Into<String>, message: impl Into<String>) -> Self {
        self.replies.insert(
            target.into(),
            StaticReply {
                body: Err(message.into()),
                delay: None,
            },
        );
        self
    }

    /// Delays the reply for an already registered target.
    pub fn with_delay(mut self, target: &str, delay: Duration) -> Self {
        if let Some(reply) = self.replies.get_mut(target) {
            reply.delay = Some(delay);
        }
        self
    }
}

impl Transport for StaticTransport {
    fn fetch(&self, request: &RequestDescriptor) -> Result<String, FetchError> {
        let Some(reply) = self.replies.get(request.target.as_str()) else {
            return Err(FetchError::NotFound(request.target.clone()));
        };
        if let Some(delay) = reply.delay {
            thread::sleep(delay);
        }
        reply.body.clone().map_err(FetchError::Failed)
    }
}
