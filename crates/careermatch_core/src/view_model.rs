use crate::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub nav: NavBarView,
    pub page: PageView,
    pub session_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarView {
    pub brand: String,
    pub home: Route,
    pub links: Vec<NavLinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub label: String,
    pub route: Route,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Landing,
    Jobs,
    ResumeUpload,
    Login(LoginFormView),
    Matches(MatchesPageView),
    NotFound { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFormView {
    pub title: String,
    pub username: String,
    /// One bullet per password character; the password itself never leaves the state.
    pub password_mask: String,
    /// Inline error shown above the submit button.
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchesPageView {
    Loading,
    Failed { message: String },
    Empty { heading: String, message: String },
    Results { title: String, cards: Vec<MatchCardView> },
}

impl MatchesPageView {
    pub fn cards(&self) -> &[MatchCardView] {
        match self {
            MatchesPageView::Results { cards, .. } => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCardView {
    pub resume_id: String,
    pub display_name: String,
    pub score_label: String,
    pub id_label: String,
    pub matched_skills: String,
}
