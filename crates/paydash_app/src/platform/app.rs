use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{Context, Result};
use paydash_core::{
    update, AppState, AppViewModel, Credential, FieldFormatter, Msg, PanelBody, SessionGate,
    TableRenderer, View,
};
use paydash_engine::{EngineHandle, ReqwestFetcher};
use paydash_logging::{dash_debug, dash_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::persistence::FileCredentialStore;
use super::ui;
use super::ui::constants::{KEY_DASHBOARD, KEY_QUIT, KEY_TRANSACTIONS, KEY_WALLET};

/// Opens `view` and keeps redrawing it until the user quits. With `once`, exits
/// after the first view in which no panel is still loading.
pub fn run_view(config: &AppConfig, view: View, once: bool) -> Result<()> {
    let store = FileCredentialStore::new(config.credential_store.clone());
    let gate = SessionGate::new(Arc::new(store));
    let engine = EngineHandle::new(config.engine_config(), Arc::new(gate.clone()));
    let runner = EffectRunner::new(engine);
    let renderer = TableRenderer::new(FieldFormatter::local(config.format_rules()));

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let tick_tx = msg_tx.clone();
    thread::spawn(move || {
        while tick_tx.send(Msg::Tick).is_ok() {
            thread::sleep(ui::constants::TICK_INTERVAL);
        }
    });

    if !once {
        let key_tx = msg_tx.clone();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if let Some(msg) = msg_for_key(&line) {
                    if key_tx.send(msg).is_err() {
                        return;
                    }
                }
            }
            let _ = key_tx.send(Msg::QuitRequested);
        });
    }

    let subject = gate.current_credential().map(|credential| credential.subject);
    let _ = msg_tx.send(Msg::SessionResolved { subject });
    let _ = msg_tx.send(Msg::ViewOpened(view));
    drop(msg_tx);

    let mut state = AppState::new();
    let mut stdout = io::stdout();
    'outer: while let Ok(msg) = msg_rx.recv() {
        let mut inbox = vec![msg];
        inbox.extend(runner.pending_msgs());

        for msg in inbox {
            let (next, effects) = update(state, msg);
            state = next;
            if !runner.enqueue(effects) {
                break 'outer;
            }
        }

        if !state.consume_dirty() {
            continue;
        }
        let view_model = state.view_with(&renderer);
        for line in ui::render::render(&view_model) {
            writeln!(stdout, "{line}")?;
        }
        stdout.flush()?;

        if once && is_settled(&view_model) {
            dash_debug!("view settled, leaving");
            let (_, effects) = update(state, Msg::QuitRequested);
            runner.enqueue(effects);
            break;
        }
    }

    runner.shutdown();
    Ok(())
}

pub fn run_login(config: &AppConfig, username: &str, password: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let fetcher = ReqwestFetcher::new(config.fetch_settings());
    let credential: Credential = runtime
        .block_on(fetcher.login(&config.base_url, username, password))
        .context("login failed")?;

    let store = FileCredentialStore::new(config.credential_store.clone());
    store.save(&credential)?;
    println!("Signed in as {}", credential.subject);
    Ok(())
}

pub fn run_logout(config: &AppConfig) -> Result<()> {
    let store = FileCredentialStore::new(config.credential_store.clone());
    if store.clear()? {
        dash_info!("cleared session at {:?}", store.path());
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

pub fn run_whoami(config: &AppConfig) -> Result<()> {
    let store = FileCredentialStore::new(config.credential_store.clone());
    let gate = SessionGate::new(Arc::new(store));
    match gate.current_credential() {
        Some(credential) => println!("{}", credential.subject),
        None => println!("Not signed in"),
    }
    Ok(())
}

fn msg_for_key(line: &str) -> Option<Msg> {
    match line.trim() {
        KEY_QUIT => Some(Msg::QuitRequested),
        KEY_DASHBOARD => Some(Msg::ViewOpened(View::Dashboard)),
        KEY_TRANSACTIONS => Some(Msg::ViewOpened(View::Transactions)),
        KEY_WALLET => Some(Msg::ViewOpened(View::Wallet)),
        _ => None,
    }
}

fn is_settled(view: &AppViewModel) -> bool {
    view.active.is_some()
        && !view.panels.is_empty()
        && view
            .panels
            .iter()
            .all(|panel| !matches!(panel.body, PanelBody::Loading | PanelBody::Idle))
}
