use careermatch_core::{Msg, Route};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Go(Route),
    Login { username: String, password: String },
    Logout,
    Retry,
    Help,
    Quit,
}

impl UiCommand {
    pub fn parse(line: &str) -> Result<UiCommand, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("Type `help` for a list of commands.".to_string());
        };
        let rest: Vec<&str> = words.collect();
        match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("go" | "open", [path]) => Ok(UiCommand::Go(Route::parse(path))),
            ("home", []) => Ok(UiCommand::Go(Route::Landing)),
            ("jobs", []) => Ok(UiCommand::Go(Route::Jobs)),
            ("resume", []) => Ok(UiCommand::Go(Route::ResumeUpload)),
            ("matches", [job_id]) => Ok(UiCommand::Go(Route::JobMatches {
                job_id: job_id.to_string(),
            })),
            ("login", [username, password]) => Ok(UiCommand::Login {
                username: username.to_string(),
                password: password.to_string(),
            }),
            ("login", []) => Ok(UiCommand::Go(Route::Login)),
            ("logout", []) => Ok(UiCommand::Logout),
            ("retry" | "reload", []) => Ok(UiCommand::Retry),
            ("help" | "?", []) => Ok(UiCommand::Help),
            ("quit" | "exit" | "q", []) => Ok(UiCommand::Quit),
            _ => Err(format!("Unrecognised command `{}`. Type `help`.", line.trim())),
        }
    }

    /// Messages the command feeds into the state machine, in order.
    pub fn into_msgs(self, current: &Route) -> Vec<Msg> {
        match self {
            UiCommand::Go(route) => vec![Msg::RouteChanged(route)],
            UiCommand::Login { username, password } => {
                let mut msgs = Vec::with_capacity(4);
                if *current != Route::Login {
                    msgs.push(Msg::RouteChanged(Route::Login));
                }
                msgs.push(Msg::UsernameChanged(username));
                msgs.push(Msg::PasswordChanged(password));
                msgs.push(Msg::LoginSubmitted);
                msgs
            }
            UiCommand::Logout => vec![Msg::LogoutClicked],
            UiCommand::Retry => vec![Msg::RetryClicked],
            UiCommand::Help | UiCommand::Quit => Vec::new(),
        }
    }
}

pub const HELP: &str = "\
Commands:
  go <path>                 open a route (/, /jobs, /resume/upload, /login, /jobs/<id>/matches)
  matches <job id>          open the matches for a job
  login <user> <password>   sign in
  logout                    sign out and forget the stored token
  retry                     reload the matches on screen
  quit                      leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(
            UiCommand::parse("go /jobs/42/matches"),
            Ok(UiCommand::Go(Route::JobMatches {
                job_id: "42".to_string()
            }))
        );
        assert_eq!(UiCommand::parse("jobs"), Ok(UiCommand::Go(Route::Jobs)));
        assert_eq!(UiCommand::parse("  QUIT "), Ok(UiCommand::Quit));
    }

    #[test]
    fn login_from_another_page_opens_the_form_first() {
        let cmd = UiCommand::parse("login ada secret").unwrap();
        let msgs = cmd.into_msgs(&Route::Jobs);
        assert_eq!(
            msgs,
            vec![
                Msg::RouteChanged(Route::Login),
                Msg::UsernameChanged("ada".to_string()),
                Msg::PasswordChanged("secret".to_string()),
                Msg::LoginSubmitted,
            ]
        );
    }

    #[test]
    fn login_on_form_only_submits() {
        let msgs = UiCommand::parse("login ada secret")
            .unwrap()
            .into_msgs(&Route::Login);
        assert_eq!(msgs.len(), 3);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(UiCommand::parse("").is_err());
        assert!(UiCommand::parse("dance").is_err());
        assert!(UiCommand::parse("login onlyuser").is_err());
    }
}
