use std::fmt::Write;

use careermatch_core::{
    AppViewModel, LoginFormView, MatchCardView, MatchesPageView, NavBarView, Notification,
    NotificationLevel, PageView,
};

const RULE_WIDTH: usize = 60;

/// Renders one full screen: nav bar, page body and any visible toasts.
pub fn render(view: &AppViewModel, toasts: &[Notification]) -> String {
    let mut out = String::new();
    render_nav(&mut out, &view.nav, view.session_active);
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    match &view.page {
        PageView::Landing => {
            push_title(&mut out, "Find the right resume for every job");
            out.push_str("Open a job's matches with `matches <job id>`.\n");
        }
        PageView::Jobs => {
            push_title(&mut out, "Jobs");
            out.push_str("Open a job's matches with `matches <job id>`.\n");
        }
        PageView::ResumeUpload => {
            push_title(&mut out, "Upload Resume");
            out.push_str("Resume upload is handled by the web client.\n");
        }
        PageView::Login(form) => render_login(&mut out, form),
        PageView::Matches(page) => render_matches(&mut out, page),
        PageView::NotFound { path } => {
            push_title(&mut out, "Page not found");
            let _ = writeln!(out, "Nothing lives at {path}.");
        }
    }

    if !toasts.is_empty() {
        out.push('\n');
        for toast in toasts {
            let _ = writeln!(out, "{}", format_toast(toast));
        }
    }
    out
}

fn render_nav(out: &mut String, nav: &NavBarView, session_active: bool) {
    let links: Vec<String> = nav
        .links
        .iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.label)
            } else {
                link.label.clone()
            }
        })
        .collect();
    let session = if session_active {
        "signed in"
    } else {
        "signed out"
    };
    let _ = writeln!(out, "{}    {}    ({session})", nav.brand, links.join("  "));
}

fn push_title(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}\n");
}

fn render_login(out: &mut String, form: &LoginFormView) {
    push_title(out, &form.title);
    let _ = writeln!(out, "Username: {}", form.username);
    let _ = writeln!(out, "Password: {}", form.password_mask);
    if let Some(error) = &form.error {
        let _ = writeln!(out, "⚠️ {error}");
    }
    if form.submitting {
        out.push_str("Signing in...\n");
    } else {
        out.push_str("[ Sign In ]\n");
    }
}

fn render_matches(out: &mut String, page: &MatchesPageView) {
    match page {
        MatchesPageView::Loading => out.push_str("Loading...\n"),
        MatchesPageView::Failed { message } => {
            let _ = writeln!(out, "{message}");
        }
        MatchesPageView::Empty { heading, message } => {
            push_title(out, heading);
            let _ = writeln!(out, "{message}");
        }
        MatchesPageView::Results { title, cards } => {
            push_title(out, title);
            for card in cards {
                render_card(out, card);
            }
        }
    }
}

fn render_card(out: &mut String, card: &MatchCardView) {
    let _ = writeln!(out, "  [{}]  {}", card.score_label, card.display_name);
    let _ = writeln!(out, "    {}", card.id_label);
    let _ = writeln!(out, "    🎯 {}", card.matched_skills);
    out.push('\n');
}

fn format_toast(toast: &Notification) -> String {
    let marker = match toast.level {
        NotificationLevel::Success => "✔",
        NotificationLevel::Error => "✖",
    };
    format!("{marker} {}", toast.message)
}
