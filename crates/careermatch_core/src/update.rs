use careermatch_logging::{cm_debug, cm_info};

use crate::{
    AppState, Effect, Msg, Notification, QueryKey, RequestFailure, Resolution, Route,
};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Successfully logged in!";
pub const LOGIN_FALLBACK_MESSAGE: &str =
    "Failed to login. Please check your credentials and try again.";
pub const LOGIN_MISSING_FIELDS_MESSAGE: &str = "Please enter both username and password.";
pub const MATCHES_FALLBACK_MESSAGE: &str = "Failed to fetch matching resumes. Please try again.";
pub const LOGOUT_MESSAGE: &str = "You have been logged out.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RouteChanged(route) => change_route(&mut state, route),
        Msg::SessionRestored { active } => {
            if state.session_active() != active {
                state.set_session_active(active);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UsernameChanged(username) => {
            state.set_username(username);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PasswordChanged(password) => {
            state.set_password(password);
            state.mark_dirty();
            Vec::new()
        }
        Msg::LoginSubmitted => submit_login(&mut state),
        Msg::LoginFinished { request_id, result } => {
            let (token, outcome) = match result {
                Ok(token) => (Some(token), Ok(())),
                Err(failure) => (
                    None,
                    Err(with_fallback(failure.message, LOGIN_FALLBACK_MESSAGE)),
                ),
            };
            match state.login_query_mut().resolve(request_id, outcome) {
                Resolution::Stale => {
                    cm_debug!("Discarding stale login response request_id={}", request_id);
                    Vec::new()
                }
                Resolution::Loaded => {
                    state.mark_dirty();
                    state.set_session_active(true);
                    state.set_password(String::new());
                    let mut effects = Vec::with_capacity(3);
                    if let Some(token) = token {
                        effects.push(Effect::StoreToken(token));
                    }
                    effects.push(Effect::Notify(Notification::success(LOGIN_SUCCESS_MESSAGE)));
                    effects.push(Effect::Navigate(Route::Landing));
                    effects
                }
                Resolution::Failed(reason) => {
                    state.mark_dirty();
                    vec![Effect::Notify(Notification::error(reason))]
                }
            }
        }
        Msg::RetryClicked => match state.route().clone() {
            Route::JobMatches { job_id } => invoke_matches(&mut state, &job_id),
            _ => Vec::new(),
        },
        Msg::MatchesFinished {
            request_id,
            job_id,
            result,
        } => finish_matches(&mut state, request_id, job_id, result),
        Msg::LogoutClicked => {
            if state.session_active() {
                state.set_session_active(false);
                state.mark_dirty();
                vec![
                    Effect::ClearSession,
                    Effect::Notify(Notification::success(LOGOUT_MESSAGE)),
                ]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn change_route(state: &mut AppState, route: Route) -> Vec<Effect> {
    if *state.route() == route {
        return Vec::new();
    }
    cm_info!("Route {} -> {}", state.route(), route);

    let mut effects = Vec::new();
    // Unmount whatever the previous route owned.
    match state.route().clone() {
        Route::Login => {
            if let Some(request_id) = state.login_query_mut().reset() {
                effects.push(Effect::Cancel {
                    request_id,
                    key: QueryKey::Login,
                });
            }
            state.clear_login_form();
        }
        Route::JobMatches { .. } => {
            if let Some(mut query) = state.unmount_matches() {
                let key = query.key().clone();
                if let Some(request_id) = query.reset() {
                    effects.push(Effect::Cancel { request_id, key });
                }
            }
        }
        _ => {}
    }

    state.set_route(route.clone());
    state.mark_dirty();

    if let Route::JobMatches { job_id } = route {
        state.mount_matches(&job_id);
        effects.extend(invoke_matches(state, &job_id));
    }
    effects
}

fn submit_login(state: &mut AppState) -> Vec<Effect> {
    if *state.route() != Route::Login || state.login_state().is_loading() {
        return Vec::new();
    }

    let credentials = state.credentials();
    if !credentials.is_complete() {
        state
            .login_query_mut()
            .reject(LOGIN_MISSING_FIELDS_MESSAGE);
        state.mark_dirty();
        return vec![Effect::Notify(Notification::error(
            LOGIN_MISSING_FIELDS_MESSAGE,
        ))];
    }

    let request_id = state.allocate_request_id();
    if !state.login_query_mut().invoke(request_id) {
        return Vec::new();
    }
    state.mark_dirty();
    vec![Effect::Login {
        request_id,
        credentials,
    }]
}

fn invoke_matches(state: &mut AppState, job_id: &str) -> Vec<Effect> {
    // A missing route parameter skips the request and leaves the query Idle.
    if job_id.trim().is_empty() {
        cm_debug!("No job id on matches route; not fetching");
        return Vec::new();
    }
    let request_id = state.allocate_request_id();
    let Some(query) = state.matches_query_mut() else {
        return Vec::new();
    };
    if !query.invoke(request_id) {
        cm_debug!("Matches for job {} already loading; invoke dropped", job_id);
        return Vec::new();
    }
    state.mark_dirty();
    vec![Effect::FetchMatches {
        request_id,
        job_id: job_id.to_string(),
    }]
}

fn finish_matches(
    state: &mut AppState,
    request_id: crate::RequestId,
    job_id: String,
    result: Result<crate::MatchList, RequestFailure>,
) -> Vec<Effect> {
    let expected_key = QueryKey::JobMatches(job_id);
    let Some(query) = state
        .matches_query_mut()
        .filter(|query| *query.key() == expected_key)
    else {
        cm_debug!(
            "Discarding matches response for unmounted {} request_id={}",
            expected_key,
            request_id
        );
        return Vec::new();
    };

    let mut session_expired = false;
    let outcome = result.map_err(|failure| {
        session_expired = failure.session_expired;
        with_fallback(failure.message, MATCHES_FALLBACK_MESSAGE)
    });

    match query.resolve(request_id, outcome) {
        Resolution::Stale => {
            cm_debug!(
                "Discarding stale matches response for {} request_id={}",
                expected_key,
                request_id
            );
            Vec::new()
        }
        Resolution::Loaded => {
            state.mark_dirty();
            Vec::new()
        }
        Resolution::Failed(reason) => {
            state.mark_dirty();
            let mut effects = Vec::with_capacity(2);
            if session_expired {
                state.set_session_active(false);
                effects.push(Effect::ClearSession);
            }
            effects.push(Effect::Notify(Notification::error(reason)));
            effects
        }
    }
}

/// A failure without a usable reason is shown with the flow's generic text.
fn with_fallback(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
