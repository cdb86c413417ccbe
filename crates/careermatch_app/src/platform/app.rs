use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use careermatch_client::{ensure_state_dir, EngineHandle, ReqwestApiClient, SessionStore};
use careermatch_core::{update, AppState, Msg, Route};
use careermatch_logging::{cm_info, cm_warn};

use super::config::{AppConfig, Cli};
use super::effects::{EffectRunner, Inbound, MsgSink, RequestDispatch};
use super::session_file::{session_path, RonFileBackend};
use super::toast::Toaster;
use super::ui::commands::{UiCommand, HELP};
use super::{logging, ui};

/// Cadence of the render/toast-expiry tick.
const TICK: Duration = Duration::from_millis(250);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from(&cli);
    logging::initialize(cli.log, &config.state_dir, cli.verbose);

    ensure_state_dir(&config.state_dir)
        .with_context(|| format!("state directory {:?} is not usable", config.state_dir))?;
    let client = ReqwestApiClient::new(&config.api).context("invalid API settings")?;
    cm_info!(
        "Starting CareerMatch client: api={} session={:?}",
        client.base_url(),
        session_path(&config.state_dir)
    );

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbound>();
    let engine = EngineHandle::new(Arc::new(client), Arc::new(MsgSink::new(inbox_tx.clone())))
        .context("failed to start the request engine")?;
    let session = SessionStore::new(RonFileBackend::new(config.state_dir.clone()))
        .with_max_age(config.session_max_age);
    let mut runner = EffectRunner::new(Arc::new(engine), session, inbox_tx.clone());
    let mut toaster = Toaster::new(config.toast_lifetime);

    let _ = inbox_tx.send(Inbound::Msg(Msg::SessionRestored {
        active: runner.has_session(),
    }));
    let _ = inbox_tx.send(Inbound::Msg(Msg::RouteChanged(Route::parse(
        &config.initial_route,
    ))));
    spawn_input_reader(inbox_tx);

    let stdout = io::stdout();
    let mut state = AppState::new();
    loop {
        let inbound = match inbox_rx.recv_timeout(TICK) {
            Ok(inbound) => inbound,
            Err(mpsc::RecvTimeoutError::Timeout) => Inbound::Msg(Msg::Tick),
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        match inbound {
            Inbound::Quit => break,
            Inbound::Msg(msg) => {
                state = dispatch_msg(state, msg, &mut runner, &mut toaster);
            }
            Inbound::Input(line) => match UiCommand::parse(&line) {
                Ok(UiCommand::Quit) => break,
                Ok(UiCommand::Help) => {
                    let mut out = stdout.lock();
                    writeln!(out, "{HELP}")?;
                    write!(out, "> ")?;
                    out.flush()?;
                }
                Ok(command) => {
                    for msg in command.into_msgs(state.route()) {
                        state = dispatch_msg(state, msg, &mut runner, &mut toaster);
                    }
                }
                Err(hint) => {
                    let mut out = stdout.lock();
                    writeln!(out, "{hint}")?;
                    write!(out, "> ")?;
                    out.flush()?;
                }
            },
        }

        toaster.expire(Instant::now());
        let state_changed = state.consume_dirty();
        let toasts_changed = toaster.consume_dirty();
        if state_changed || toasts_changed {
            let screen = ui::render::render(&state.view(), &toaster.visible());
            let mut out = stdout.lock();
            writeln!(out, "\n{screen}")?;
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    cm_info!("CareerMatch client exiting");
    Ok(())
}

fn dispatch_msg<D: RequestDispatch, B: careermatch_client::SessionBackend>(
    state: AppState,
    msg: Msg,
    runner: &mut EffectRunner<D, B>,
    toaster: &mut Toaster,
) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects, toaster);
    state
}

fn spawn_input_reader(tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    if tx.send(Inbound::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    cm_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(Inbound::Quit);
    });
}
