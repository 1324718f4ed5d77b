use anyhow::{Context, Result};
use std::rc::Rc;
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{spawn_local, LocalSet};
use tracing::{debug, info, warn};

use crate::application::{
    Countdown, SessionPorts, SessionSnapshot, SessionViewModel, TimerSnapshot, ViewModelOptions,
};
use crate::domain::Avatar;

/// User actions sent from the front-end to the session thread
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetEditingIdentity(bool),
    SelectAvatar(Option<Avatar>),
    ConfirmIdentity(String),
    ToggleCamera,
    RequestNewTrack,
    TogglePlayback,
    SetVolume(f32),
    StartTimer,
    StopTimer,
    ResetTimer,
    Shutdown,
}

/// Front-end side of a running session
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    session: watch::Receiver<SessionSnapshot>,
    timer: watch::Receiver<TimerSnapshot>,
    thread: Option<JoinHandle<()>>,
}

impl SessionHandle {
    pub fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Session thread is gone, command dropped");
        }
    }

    pub fn session(&self) -> SessionSnapshot {
        self.session.borrow().clone()
    }

    pub fn timer(&self) -> TimerSnapshot {
        self.timer.borrow().clone()
    }

    /// Tears the session down and waits for the session thread to exit.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        let _ = self.commands.send(Command::Shutdown);
        thread
            .join()
            .map_err(|_| anyhow::anyhow!("Session thread panicked"))
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!(error = %e, "Session did not shut down cleanly");
        }
    }
}

/// Runs the session view model and the countdown on a dedicated thread.
///
/// The thread drives a current-thread tokio runtime inside a `LocalSet`;
/// every command becomes its own local task so slow device or network calls
/// never hold up the others.
pub struct SessionRuntime {
    pub options: ViewModelOptions,
    pub timer_seconds: u32,
}

impl SessionRuntime {
    /// Starts the session thread. `notify` runs on that thread after every
    /// published snapshot, typically to request a repaint.
    pub fn spawn<N>(self, ports: SessionPorts, notify: N) -> Result<SessionHandle>
    where
        N: Fn() + Send + Sync + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build session runtime")?;

        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let notify: Arc<dyn Fn() + Send + Sync> = Arc::new(notify);

        let thread = std::thread::Builder::new()
            .name("focus-session".to_string())
            .spawn(move || {
                let local = LocalSet::new();
                local.block_on(&runtime, self.run(ports, commands_rx, ready_tx, notify));
            })
            .context("Failed to spawn session thread")?;

        let (session, timer) = ready_rx
            .blocking_recv()
            .context("Session thread exited during startup")?;

        Ok(SessionHandle {
            commands: commands_tx,
            session,
            timer,
            thread: Some(thread),
        })
    }

    async fn run(
        self,
        ports: SessionPorts,
        mut commands: mpsc::UnboundedReceiver<Command>,
        ready: oneshot::Sender<(watch::Receiver<SessionSnapshot>, watch::Receiver<TimerSnapshot>)>,
        notify: Arc<dyn Fn() + Send + Sync>,
    ) {
        let vm = Rc::new(SessionViewModel::new(ports, self.options));
        vm.init();
        let countdown = Countdown::new(self.timer_seconds);

        forward_changes(vm.subscribe(), Arc::clone(&notify));
        forward_changes(countdown.subscribe(), notify);

        if ready.send((vm.subscribe(), countdown.subscribe())).is_err() {
            warn!("Front-end went away before the session started");
            return;
        }
        info!("Session started");

        while let Some(command) = commands.recv().await {
            debug!(?command, "Session command");
            match command {
                Command::SetEditingIdentity(editing) => vm.set_editing_identity(editing),
                Command::SelectAvatar(avatar) => vm.select_avatar(avatar),
                Command::ConfirmIdentity(name) => vm.confirm_identity(&name),
                Command::SetVolume(level) => vm.set_volume(level),
                Command::ToggleCamera => {
                    let vm = Rc::clone(&vm);
                    spawn_local(async move { vm.toggle_camera().await });
                }
                Command::RequestNewTrack => {
                    let vm = Rc::clone(&vm);
                    spawn_local(async move { vm.request_new_track().await });
                }
                Command::TogglePlayback => {
                    let vm = Rc::clone(&vm);
                    spawn_local(async move { vm.toggle_playback().await });
                }
                Command::StartTimer => countdown.start(),
                Command::StopTimer => countdown.stop(),
                Command::ResetTimer => countdown.reset(),
                Command::Shutdown => break,
            }
        }

        drop(countdown);
        vm.teardown();
        info!("Session stopped");
    }
}

fn forward_changes<T: 'static>(mut rx: watch::Receiver<T>, notify: Arc<dyn Fn() + Send + Sync>) {
    spawn_local(async move {
        while rx.changed().await.is_ok() {
            notify();
        }
    });
}
