use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use careermatch_core::{AccessToken, Credentials, RequestId};
use careermatch_logging::{cm_debug, cm_warn};
use tokio_util::sync::CancellationToken;

use crate::{ApiClient, ApiEvent};

/// Receives completed requests. Called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ApiEvent);
}

enum EngineCommand {
    Login {
        request_id: RequestId,
        credentials: Credentials,
    },
    FetchMatches {
        request_id: RequestId,
        job_id: String,
        token: Option<AccessToken>,
    },
    Cancel {
        request_id: RequestId,
    },
}

type Pending = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs API requests on a background tokio runtime and reports completions
/// to an [`EventSink`]. Cancelled requests report nothing.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn ApiClient>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));

        thread::Builder::new()
            .name("careermatch-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    dispatch(&runtime, &client, &sink, &pending, command);
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn login(&self, request_id: RequestId, credentials: Credentials) {
        self.send(EngineCommand::Login {
            request_id,
            credentials,
        });
    }

    pub fn fetch_matches(
        &self,
        request_id: RequestId,
        job_id: impl Into<String>,
        token: Option<AccessToken>,
    ) {
        self.send(EngineCommand::FetchMatches {
            request_id,
            job_id: job_id.into(),
            token,
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        self.send(EngineCommand::Cancel { request_id });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            cm_warn!("Engine thread has stopped; command dropped");
        }
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    client: &Arc<dyn ApiClient>,
    sink: &Arc<dyn EventSink>,
    pending: &Pending,
    command: EngineCommand,
) {
    let (request_id, work) = match command {
        EngineCommand::Cancel { request_id } => {
            if let Some(token) = lock(pending).remove(&request_id) {
                cm_debug!("Cancelling request {}", request_id);
                token.cancel();
            }
            return;
        }
        EngineCommand::Login {
            request_id,
            credentials,
        } => (request_id, Work::Login(credentials)),
        EngineCommand::FetchMatches {
            request_id,
            job_id,
            token,
        } => (request_id, Work::Matches { job_id, token }),
    };

    let cancel = CancellationToken::new();
    lock(pending).insert(request_id, cancel.clone());

    let client = client.clone();
    let sink = sink.clone();
    let pending = pending.clone();
    runtime.spawn(async move {
        let event = tokio::select! {
            _ = cancel.cancelled() => None,
            event = work.run(client.as_ref(), request_id) => Some(event),
        };
        lock(&pending).remove(&request_id);
        match event {
            Some(event) => sink.emit(event),
            None => cm_debug!("Request {} cancelled before completion", request_id),
        }
    });
}

enum Work {
    Login(Credentials),
    Matches {
        job_id: String,
        token: Option<AccessToken>,
    },
}

impl Work {
    async fn run(self, client: &dyn ApiClient, request_id: RequestId) -> ApiEvent {
        match self {
            Work::Login(credentials) => ApiEvent::LoginCompleted {
                request_id,
                result: client.login(&credentials).await,
            },
            Work::Matches { job_id, token } => {
                let result = client.job_matches(&job_id, token.as_ref()).await;
                ApiEvent::MatchesCompleted {
                    request_id,
                    job_id,
                    result,
                }
            }
        }
    }
}

fn lock(pending: &Pending) -> std::sync::MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
    // A panicked request task cannot leave the map half-updated.
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
