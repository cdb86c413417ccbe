use std::sync::{mpsc, Arc, Mutex};
use std::time::Instant;

use careermatch_client::{
    ApiEvent, EngineHandle, EventSink, SessionBackend, SessionError, SessionStore,
};
use careermatch_core::{AccessToken, Effect, Msg, Notification, RequestFailure, RequestId};
use careermatch_logging::{cm_error, cm_info};

use super::toast::Toaster;

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum Inbound {
    Msg(Msg),
    /// A raw line typed at the prompt.
    Input(String),
    Quit,
}

/// Forwards engine completions into the event loop as messages.
pub struct MsgSink {
    tx: Mutex<mpsc::Sender<Inbound>>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<Inbound>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: ApiEvent) {
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(Inbound::Msg(api_event_to_msg(event)));
        }
    }
}

pub fn api_event_to_msg(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::LoginCompleted { request_id, result } => Msg::LoginFinished {
            request_id,
            result: result.map_err(RequestFailure::from),
        },
        ApiEvent::MatchesCompleted {
            request_id,
            job_id,
            result,
        } => Msg::MatchesFinished {
            request_id,
            job_id,
            result: result.map_err(RequestFailure::from),
        },
    }
}

/// Where API work goes. Implemented by the engine; tests record calls instead.
pub trait RequestDispatch {
    fn login(&self, request_id: RequestId, credentials: careermatch_core::Credentials);
    fn fetch_matches(&self, request_id: RequestId, job_id: String, token: Option<AccessToken>);
    fn cancel(&self, request_id: RequestId);
}

impl RequestDispatch for EngineHandle {
    fn login(&self, request_id: RequestId, credentials: careermatch_core::Credentials) {
        EngineHandle::login(self, request_id, credentials);
    }

    fn fetch_matches(&self, request_id: RequestId, job_id: String, token: Option<AccessToken>) {
        EngineHandle::fetch_matches(self, request_id, job_id, token);
    }

    fn cancel(&self, request_id: RequestId) {
        EngineHandle::cancel(self, request_id);
    }
}

/// Executes effects emitted by `update`.
pub struct EffectRunner<D, B> {
    dispatch: Arc<D>,
    session: SessionStore<B>,
    inbox: mpsc::Sender<Inbound>,
}

impl<D: RequestDispatch, B: SessionBackend> EffectRunner<D, B> {
    pub fn new(dispatch: Arc<D>, session: SessionStore<B>, inbox: mpsc::Sender<Inbound>) -> Self {
        Self {
            dispatch,
            session,
            inbox,
        }
    }

    /// Whether a usable token is stored right now.
    pub fn has_session(&mut self) -> bool {
        match self.session.get() {
            Ok(token) => token.is_some(),
            Err(err) => {
                cm_error!("Failed to read session: {}", err);
                false
            }
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>, toaster: &mut Toaster) {
        for effect in effects {
            match effect {
                Effect::Login {
                    request_id,
                    credentials,
                } => {
                    cm_info!("Login request_id={} user={}", request_id, credentials.username);
                    self.dispatch.login(request_id, credentials);
                }
                Effect::FetchMatches { request_id, job_id } => {
                    let token = match self.session.get() {
                        Ok(token) => token,
                        Err(err) => {
                            cm_error!("Failed to read session: {}", err);
                            None
                        }
                    };
                    if token.is_none() {
                        // The store may have just dropped an expired token.
                        let _ = self
                            .inbox
                            .send(Inbound::Msg(Msg::SessionRestored { active: false }));
                    }
                    cm_info!("FetchMatches request_id={} job_id={}", request_id, job_id);
                    self.dispatch.fetch_matches(request_id, job_id, token);
                }
                Effect::Cancel { request_id, key } => {
                    cm_info!("Cancel request_id={} key={}", request_id, key);
                    self.dispatch.cancel(request_id);
                }
                Effect::StoreToken(token) => {
                    if let Err(err) = self.session.set(token) {
                        report_session_error(&err, toaster);
                    }
                }
                Effect::ClearSession => {
                    if let Err(err) = self.session.clear() {
                        report_session_error(&err, toaster);
                    }
                }
                Effect::Navigate(route) => {
                    let _ = self.inbox.send(Inbound::Msg(Msg::RouteChanged(route)));
                }
                Effect::Notify(notification) => toaster.push(notification, Instant::now()),
            }
        }
    }
}

fn report_session_error(err: &SessionError, toaster: &mut Toaster) {
    cm_error!("Session store failure: {}", err);
    toaster.push(
        Notification::error(format!("Could not update the saved session: {err}")),
        Instant::now(),
    );
}
