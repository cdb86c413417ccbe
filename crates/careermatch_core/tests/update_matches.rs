use std::sync::Once;

use careermatch_core::{
    update, AppState, Effect, Match, MatchesPageView, Msg, Notification, PageView, QueryKey,
    RequestFailure, Route, MATCHES_FALLBACK_MESSAGE, NO_MATCHES_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(careermatch_logging::initialize_for_tests);
}

fn matches_route(job_id: &str) -> Route {
    Route::JobMatches {
        job_id: job_id.to_string(),
    }
}

fn sample_match(resume_id: &str, user: &str, score: f64, skills: &str) -> Match {
    Match {
        resume_id: resume_id.to_string(),
        user: user.to_string(),
        compatibility_score: score,
        matched_skills: skills.to_string(),
        resume_skills: "go, sql, python".to_string(),
        resume_experience: "3.0 years".to_string(),
    }
}

fn matches_page(state: &AppState) -> MatchesPageView {
    match state.view().page {
        PageView::Matches(page) => page,
        other => panic!("expected matches page, got {other:?}"),
    }
}

fn fetch_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::FetchMatches { .. }))
        .count()
}

#[test]
fn mounting_with_job_id_fetches_once() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));

    assert_eq!(
        effects,
        vec![Effect::FetchMatches {
            request_id: 1,
            job_id: "42".to_string(),
        }]
    );
    assert_eq!(matches_page(&state), MatchesPageView::Loading);

    // Re-invoking while loading does not issue a second request.
    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
    let (_state, effects) = update(state, Msg::RouteChanged(matches_route("42")));
    assert!(effects.is_empty());
}

#[test]
fn blank_job_id_never_fetches() {
    init_logging();
    for job_id in ["", "   "] {
        let (state, effects) = update(AppState::new(), Msg::RouteChanged(matches_route(job_id)));
        assert_eq!(fetch_count(&effects), 0);
        let (state, effects) = update(state, Msg::RetryClicked);
        assert_eq!(fetch_count(&effects), 0);
        assert!(matches!(matches_page(&state), MatchesPageView::Empty { .. }));
    }
}

#[test]
fn empty_result_shows_no_matches_message() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let (state, effects) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Ok(Vec::new()),
        },
    );

    assert!(effects.is_empty());
    let page = matches_page(&state);
    assert_eq!(
        page,
        MatchesPageView::Empty {
            heading: "Resume Matches".to_string(),
            message: NO_MATCHES_MESSAGE.to_string(),
        }
    );
    assert!(page.cards().is_empty());
}

#[test]
fn loaded_list_renders_one_card_per_match_in_order() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let list = vec![
        sample_match("r1", "", 87.25, "Go, SQL"),
        sample_match("r2", "grace", 64.0, ""),
        sample_match("r3", "linus", 12.04, "C"),
    ];
    let (state, _) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Ok(list.clone()),
        },
    );

    let page = matches_page(&state);
    let MatchesPageView::Results { title, cards } = &page else {
        panic!("expected results, got {page:?}");
    };
    assert_eq!(title, "Resume Matches for Job #42");
    assert_eq!(cards.len(), list.len());
    assert_eq!(
        cards.iter().map(|c| c.resume_id.as_str()).collect::<Vec<_>>(),
        vec!["r1", "r2", "r3"]
    );

    assert_eq!(cards[0].score_label, "Score: 87.3%");
    assert_eq!(cards[0].display_name, "Anonymous");
    assert_eq!(cards[0].id_label, "ID: r1");
    assert_eq!(cards[0].matched_skills, "Go, SQL");
    assert_eq!(cards[1].score_label, "Score: 64.0%");
    assert_eq!(cards[1].matched_skills, "No skills matched");
    assert_eq!(cards[2].score_label, "Score: 12.0%");
}

#[test]
fn failure_shows_banner_and_notifies_exactly_once() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let (state, effects) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Err(RequestFailure::new("Request failed with status code 500")),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error(
            "Request failed with status code 500"
        ))]
    );
    assert_eq!(
        matches_page(&state),
        MatchesPageView::Failed {
            message: "Error loading matches: Request failed with status code 500".to_string(),
        }
    );

    // Further renders and duplicate deliveries stay silent.
    let (state, effects) = update(state, Msg::Tick);
    assert!(effects.is_empty());
    let (_state, effects) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Err(RequestFailure::new("again")),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn blank_failure_message_uses_fallback() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let (_state, effects) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Err(RequestFailure::new("")),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error(MATCHES_FALLBACK_MESSAGE))]
    );
}

#[test]
fn retry_after_failure_fetches_again() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let (state, _) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Err(RequestFailure::new("offline")),
        },
    );

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(
        effects,
        vec![Effect::FetchMatches {
            request_id: 2,
            job_id: "42".to_string(),
        }]
    );
    assert_eq!(matches_page(&state), MatchesPageView::Loading);
}

#[test]
fn navigating_away_discards_late_response() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let (state, effects) = update(state, Msg::RouteChanged(matches_route("43")));

    assert_eq!(
        effects,
        vec![
            Effect::Cancel {
                request_id: 1,
                key: QueryKey::JobMatches("42".to_string()),
            },
            Effect::FetchMatches {
                request_id: 2,
                job_id: "43".to_string(),
            },
        ]
    );

    // The response for job 42 arrives after the user moved on.
    let (state, effects) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Ok(vec![sample_match("stale", "", 99.0, "")]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(matches_page(&state), MatchesPageView::Loading);

    let (state, _) = update(
        state,
        Msg::MatchesFinished {
            request_id: 2,
            job_id: "43".to_string(),
            result: Ok(vec![sample_match("fresh", "", 50.0, "")]),
        },
    );
    let page = matches_page(&state);
    assert_eq!(page.cards().len(), 1);
    assert_eq!(page.cards()[0].resume_id, "fresh");
}

#[test]
fn returning_to_same_job_refetches_after_unmount() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let (state, _) = update(state, Msg::RouteChanged(Route::Jobs));
    let (_state, effects) = update(state, Msg::RouteChanged(matches_route("42")));
    assert_eq!(fetch_count(&effects), 1);
}

#[test]
fn expired_session_is_cleared_on_unauthorized_fetch() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SessionRestored { active: true });
    let (state, _) = update(state, Msg::RouteChanged(matches_route("42")));
    let (state, effects) = update(
        state,
        Msg::MatchesFinished {
            request_id: 1,
            job_id: "42".to_string(),
            result: Err(RequestFailure::session_expired("Token expired")),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::ClearSession,
            Effect::Notify(Notification::error("Token expired")),
        ]
    );
    assert!(!state.session_active());
}

#[test]
fn nav_marks_jobs_active_on_matches_view() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RouteChanged(matches_route("42")));
    let nav = state.view().nav;
    assert_eq!(nav.brand, "CareerMatch");
    let active: Vec<_> = nav
        .links
        .iter()
        .filter(|l| l.active)
        .map(|l| l.label.as_str())
        .collect();
    assert_eq!(active, vec!["Jobs"]);
}
