use crate::view_model::{
    AppViewModel, LoginFormView, MatchCardView, MatchesPageView, NavBarView, NavLinkView,
    PageView,
};
use crate::{MatchList, Query, QueryKey, RequestId, Route, ViewState};

pub const BRAND: &str = "CareerMatch";
pub const LOGIN_TITLE: &str = "Welcome Back";
pub const MATCHES_HEADING: &str = "Resume Matches";
pub const NO_MATCHES_MESSAGE: &str = "No matching resumes found for this job.";
pub const NO_SKILLS_MATCHED: &str = "No skills matched";

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    route: Route,
    session_active: bool,
    username: String,
    password: String,
    login: Query<()>,
    matches: Option<Query<MatchList>>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Landing,
            session_active: false,
            username: String::new(),
            password: String::new(),
            login: Query::new(QueryKey::Login),
            matches: None,
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn session_active(&self) -> bool {
        self.session_active
    }

    pub fn login_state(&self) -> &ViewState<()> {
        self.login.state()
    }

    pub fn matches_state(&self) -> Option<&ViewState<MatchList>> {
        self.matches.as_ref().map(Query::state)
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            nav: self.nav_view(),
            page: self.page_view(),
            session_active: self.session_active,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    pub(crate) fn set_session_active(&mut self, active: bool) {
        self.session_active = active;
    }

    pub(crate) fn set_username(&mut self, username: String) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: String) {
        self.password = password;
    }

    pub(crate) fn credentials(&self) -> crate::Credentials {
        crate::Credentials::new(self.username.clone(), self.password.clone())
    }

    pub(crate) fn clear_login_form(&mut self) {
        self.username.clear();
        self.password.clear();
    }

    pub(crate) fn login_query_mut(&mut self) -> &mut Query<()> {
        &mut self.login
    }

    pub(crate) fn matches_query_mut(&mut self) -> Option<&mut Query<MatchList>> {
        self.matches.as_mut()
    }

    pub(crate) fn mount_matches(&mut self, job_id: &str) -> &mut Query<MatchList> {
        self.matches
            .insert(Query::new(QueryKey::JobMatches(job_id.to_string())))
    }

    pub(crate) fn unmount_matches(&mut self) -> Option<Query<MatchList>> {
        self.matches.take()
    }

    fn nav_view(&self) -> NavBarView {
        let links = [("Jobs", Route::Jobs), ("Resume", Route::ResumeUpload)]
            .into_iter()
            .map(|(label, target)| NavLinkView {
                label: label.to_string(),
                active: target.is_active_for(&self.route),
                route: target,
            })
            .collect();
        NavBarView {
            brand: BRAND.to_string(),
            home: Route::Landing,
            links,
        }
    }

    fn page_view(&self) -> PageView {
        match &self.route {
            Route::Landing => PageView::Landing,
            Route::Jobs => PageView::Jobs,
            Route::ResumeUpload => PageView::ResumeUpload,
            Route::Login => PageView::Login(LoginFormView {
                title: LOGIN_TITLE.to_string(),
                username: self.username.clone(),
                password_mask: "•".repeat(self.password.chars().count()),
                error: self.login.state().error().map(ToOwned::to_owned),
                submitting: self.login.state().is_loading(),
            }),
            Route::JobMatches { job_id } => PageView::Matches(self.matches_view(job_id)),
            Route::NotFound(path) => PageView::NotFound { path: path.clone() },
        }
    }

    fn matches_view(&self, job_id: &str) -> MatchesPageView {
        let state = self.matches.as_ref().map(Query::state);
        match state {
            Some(ViewState::Loading) => MatchesPageView::Loading,
            Some(ViewState::Failed(reason)) => MatchesPageView::Failed {
                message: format!("Error loading matches: {reason}"),
            },
            Some(ViewState::Loaded(list)) if !list.is_empty() => MatchesPageView::Results {
                title: format!("{MATCHES_HEADING} for Job #{job_id}"),
                cards: list.iter().map(MatchCardView::from_match).collect(),
            },
            // Idle (no job id) renders like an empty result.
            Some(ViewState::Loaded(_)) | Some(ViewState::Idle) | None => MatchesPageView::Empty {
                heading: MATCHES_HEADING.to_string(),
                message: NO_MATCHES_MESSAGE.to_string(),
            },
        }
    }
}

impl MatchCardView {
    fn from_match(m: &crate::Match) -> Self {
        let matched_skills = if m.matched_skills.trim().is_empty() {
            NO_SKILLS_MATCHED.to_string()
        } else {
            m.matched_skills.clone()
        };
        Self {
            resume_id: m.resume_id.clone(),
            display_name: m.display_name().to_string(),
            score_label: format!("Score: {:.1}%", m.rounded_score()),
            id_label: format!("ID: {}", m.resume_id),
            matched_skills,
        }
    }
}
