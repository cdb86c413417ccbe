//! CareerMatch core: pure state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod route;
mod state;
mod update;
mod view_model;
mod view_state;

pub use effect::{Effect, Notification, NotificationLevel};
pub use model::{AccessToken, Credentials, Match, MatchList, RequestFailure, RequestId};
pub use msg::Msg;
pub use route::Route;
pub use state::{AppState, BRAND, LOGIN_TITLE, MATCHES_HEADING, NO_MATCHES_MESSAGE, NO_SKILLS_MATCHED};
pub use update::{
    update, LOGIN_FALLBACK_MESSAGE, LOGIN_MISSING_FIELDS_MESSAGE, LOGIN_SUCCESS_MESSAGE,
    LOGOUT_MESSAGE, MATCHES_FALLBACK_MESSAGE,
};
pub use view_model::{
    AppViewModel, LoginFormView, MatchCardView, MatchesPageView, NavBarView, NavLinkView,
    PageView,
};
pub use view_state::{Query, QueryKey, Resolution, ViewState};
