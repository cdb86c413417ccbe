use std::path::PathBuf;
use std::time::Duration;

use careermatch_client::ApiSettings;
use clap::Parser;

use super::logging::LogDestination;

const MAX_SESSION_AGE_MINS: i64 = 525_600;

#[derive(Debug, Parser)]
#[command(name = "careermatch")]
#[command(about = "Terminal client for CareerMatch resume-to-job matching")]
pub struct Cli {
    /// Base URL of the CareerMatch API.
    #[arg(long, env = "CAREERMATCH_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Directory holding the persisted session and the log file.
    #[arg(long, env = "CAREERMATCH_STATE_DIR", default_value = ".careermatch")]
    pub state_dir: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Treat stored tokens older than this many minutes as expired (at most a year).
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_AGE_MINS))]
    pub session_max_age_mins: Option<i64>,

    /// How long notifications stay on screen, in seconds.
    #[arg(long, default_value_t = 4)]
    pub toast_secs: u64,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Route to open on start-up.
    #[arg(default_value = "/")]
    pub route: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub state_dir: PathBuf,
    pub session_max_age: Option<chrono::Duration>,
    pub toast_lifetime: Duration,
    pub initial_route: String,
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            api: ApiSettings {
                base_url: cli.api_url.clone(),
                request_timeout: Duration::from_secs(cli.request_timeout_secs.max(1)),
                ..ApiSettings::default()
            },
            state_dir: cli.state_dir.clone(),
            session_max_age: cli
                .session_max_age_mins
                .and_then(chrono::Duration::try_minutes),
            toast_lifetime: Duration::from_secs(cli.toast_secs),
            initial_route: cli.route.clone(),
        }
    }
}
