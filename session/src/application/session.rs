use std::cell::RefCell;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::application::errors::SessionError;
use crate::application::identity;
use crate::application::ports::{
    AudioOutput, CameraDevice, CaptureConstraints, LocalStore, MediaStream, PresenceSource,
    TrackGenerator,
};
use crate::domain::{
    presence_tiles, Avatar, DisplayName, Identity, Peer, PresenceTile, TrackReference, Volume,
};

/// Prompt sent to the generator unless configured otherwise
pub const DEFAULT_PROMPT: &str = "chill lofi piano";

/// Driven ports the view model talks to
pub struct SessionPorts {
    pub store: Arc<dyn LocalStore>,
    pub camera: Arc<dyn CameraDevice>,
    pub audio: Arc<dyn AudioOutput>,
    pub generator: Arc<dyn TrackGenerator>,
    pub presence: Arc<dyn PresenceSource>,
}

#[derive(Debug, Clone)]
pub struct ViewModelOptions {
    pub prompt: String,
    pub capture: CaptureConstraints,
    pub initial_volume: Volume,
}

impl Default for ViewModelOptions {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            capture: CaptureConstraints::default(),
            initial_volume: Volume::DEFAULT,
        }
    }
}

/// Immutable copy of everything the front-end renders
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Last confirmed identity
    pub identity: Option<Identity>,
    /// Avatar currently selected, possibly not yet confirmed
    pub avatar: Option<Avatar>,
    pub editing_identity: bool,
    pub camera_enabled: bool,
    pub camera_pending: bool,
    pub track: Option<TrackReference>,
    pub is_playing: bool,
    pub generating: bool,
    pub volume: Volume,
    pub error: Option<String>,
    pub tiles: Vec<PresenceTile>,
}

impl SessionSnapshot {
    pub fn display_name(&self) -> Option<&DisplayName> {
        self.identity.as_ref().map(Identity::display_name)
    }

    /// People in the room, the local user included
    pub fn occupancy(&self) -> usize {
        self.tiles.len()
    }
}

#[derive(Debug)]
struct SessionState {
    identity: Option<Identity>,
    avatar: Option<Avatar>,
    saved_avatar: Option<Avatar>,
    editing_identity: bool,
    camera_enabled: bool,
    camera_pending: bool,
    track: Option<TrackReference>,
    is_playing: bool,
    generating: bool,
    volume: Volume,
    error: Option<String>,
    torn_down: bool,
}

/// The local user's view of the room.
///
/// Lives on a single thread. Every operation takes `&self`; state sits in a
/// `RefCell` whose borrows never cross an `.await`, so overlapping operations
/// (a pending generation request and a camera toggle, say) interleave safely
/// on one `LocalSet`.
pub struct SessionViewModel {
    store: Arc<dyn LocalStore>,
    camera: Arc<dyn CameraDevice>,
    audio: Arc<dyn AudioOutput>,
    generator: Arc<dyn TrackGenerator>,
    peers: Vec<Peer>,
    options: ViewModelOptions,
    state: RefCell<SessionState>,
    stream: RefCell<Option<Box<dyn MediaStream>>>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionViewModel {
    pub fn new(ports: SessionPorts, options: ViewModelOptions) -> Self {
        let state = SessionState {
            identity: None,
            avatar: Some(Avatar::default()),
            saved_avatar: Some(Avatar::default()),
            editing_identity: false,
            camera_enabled: false,
            camera_pending: false,
            track: None,
            is_playing: false,
            generating: false,
            volume: options.initial_volume,
            error: None,
            torn_down: false,
        };
        let peers = ports.presence.peers();
        let snapshot = build_snapshot(&state, &peers);
        let (snapshot_tx, _) = watch::channel(snapshot);

        Self {
            store: ports.store,
            camera: ports.camera,
            audio: ports.audio,
            generator: ports.generator,
            peers,
            options,
            state: RefCell::new(state),
            stream: RefCell::new(None),
            snapshot_tx,
        }
    }

    /// Reads the persisted identity and prepares the audio output.
    ///
    /// Opens the identity editor when no name has been saved yet.
    pub fn init(&self) {
        self.audio.set_looping(true);
        self.audio.set_volume(self.options.initial_volume);

        let stored = match identity::load(self.store.as_ref()) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to read saved identity");
                identity::StoredIdentity::default()
            }
        };

        {
            let mut state = self.state.borrow_mut();
            if let Some(avatar) = stored.avatar {
                state.avatar = avatar;
                state.saved_avatar = avatar;
            }
            match stored.display_name {
                Some(name) => {
                    info!(display_name = %name, "Loaded saved identity");
                    state.identity = Some(Identity::new(name, state.saved_avatar));
                }
                None => state.editing_identity = true,
            }
        }
        self.publish();
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Shows or hides the identity editor. Hiding it without confirming
    /// drops the pending avatar choice.
    pub fn set_editing_identity(&self, editing: bool) {
        {
            let mut state = self.state.borrow_mut();
            state.editing_identity = editing;
            if !editing {
                state.avatar = state.saved_avatar;
            }
        }
        self.publish();
    }

    /// Picks an avatar in the editor. Nothing is persisted until
    /// [`SessionViewModel::confirm_identity`].
    pub fn select_avatar(&self, avatar: Option<Avatar>) {
        self.state.borrow_mut().avatar = avatar;
        self.publish();
    }

    /// Persists `name` (trimmed) with the selected avatar and closes the
    /// editor. A blank name is ignored and leaves the editor open.
    pub fn confirm_identity(&self, name: &str) {
        let display_name = match DisplayName::new(name) {
            Ok(name) => name,
            Err(reason) => {
                debug!(%reason, "Ignoring identity confirmation");
                return;
            }
        };

        let avatar = self.state.borrow().avatar;
        let confirmed = Identity::new(display_name, avatar);
        let saved = identity::save(self.store.as_ref(), &confirmed);

        {
            let mut state = self.state.borrow_mut();
            match saved {
                Ok(()) => {
                    info!(display_name = %confirmed.display_name(), "Saved identity");
                    state.identity = Some(confirmed);
                    state.saved_avatar = avatar;
                    state.editing_identity = false;
                }
                Err(e) => record_error(&mut state, e.into()),
            }
        }
        self.publish();
    }

    /// Turns the camera on or off.
    ///
    /// A toggle that arrives while the camera is still being acquired is
    /// ignored.
    pub async fn toggle_camera(&self) {
        let enabled = {
            let state = self.state.borrow();
            if state.camera_pending || state.torn_down {
                return;
            }
            state.camera_enabled
        };

        if enabled {
            self.stop_camera();
        } else {
            self.start_camera().await;
        }
    }

    async fn start_camera(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.error = None;
            state.camera_pending = true;
        }
        self.publish();

        let acquired = self.camera.acquire(self.options.capture).await;

        {
            let mut state = self.state.borrow_mut();
            state.camera_pending = false;
            match acquired {
                Ok(mut stream) if state.torn_down => {
                    debug!("Session torn down during camera acquisition, releasing stream");
                    stream.stop_all_tracks();
                }
                Ok(stream) => {
                    info!(tracks = stream.live_tracks(), "Camera enabled");
                    *self.stream.borrow_mut() = Some(stream);
                    state.camera_enabled = true;
                }
                Err(e) => record_error(&mut state, e.into()),
            }
        }
        self.publish();
    }

    fn stop_camera(&self) {
        self.release_stream();
        self.state.borrow_mut().camera_enabled = false;
        info!("Camera disabled");
        self.publish();
    }

    fn release_stream(&self) {
        let stream = self.stream.borrow_mut().take();
        if let Some(mut stream) = stream {
            stream.stop_all_tracks();
        }
    }

    /// Asks the generator for a fresh track and starts playing it.
    ///
    /// Ignored while another request is in flight.
    pub async fn request_new_track(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.generating || state.torn_down {
                debug!("Track request ignored");
                return;
            }
            state.error = None;
            state.generating = true;
        }
        self.publish();

        let outcome = self.generate_and_play().await;

        {
            let mut state = self.state.borrow_mut();
            state.generating = false;
            match outcome {
                Ok(()) if state.torn_down => state.is_playing = false,
                Ok(()) => state.is_playing = true,
                Err(e) => {
                    if state.is_playing && !state.torn_down {
                        self.audio.pause();
                    }
                    state.is_playing = false;
                    record_error(&mut state, e);
                }
            }
        }
        self.publish();
    }

    /// Stops early, without touching the audio output, when the session is
    /// torn down while the generator is busy.
    async fn generate_and_play(&self) -> Result<(), SessionError> {
        let track = self.generator.generate(&self.options.prompt).await?;
        if self.state.borrow().torn_down {
            debug!(track = %track, "Session torn down during generation, dropping track");
            return Ok(());
        }
        info!(track = %track, "Generated new track");

        self.state.borrow_mut().track = Some(track.clone());
        self.publish();

        self.audio.set_source(&track);
        self.audio.play().await?;
        Ok(())
    }

    /// Plays or pauses the current track, generating one first if there is
    /// none yet.
    pub async fn toggle_playback(&self) {
        let (has_track, playing) = {
            let state = self.state.borrow();
            if state.torn_down {
                return;
            }
            (state.track.is_some(), state.is_playing)
        };

        if !has_track {
            self.request_new_track().await;
            return;
        }

        self.state.borrow_mut().error = None;
        if playing {
            self.audio.pause();
            self.state.borrow_mut().is_playing = false;
        } else {
            let played = self.audio.play().await;
            let mut state = self.state.borrow_mut();
            match played {
                Ok(()) if state.torn_down => state.is_playing = false,
                Ok(()) => state.is_playing = true,
                Err(e) => {
                    state.is_playing = false;
                    record_error(&mut state, e.into());
                }
            }
        }
        self.publish();
    }

    pub fn set_volume(&self, level: f32) {
        let volume = Volume::new(level);
        self.audio.set_volume(volume);
        self.state.borrow_mut().volume = volume;
        self.publish();
    }

    /// Releases the camera stream and the audio output. Safe to call twice.
    pub fn teardown(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            state.camera_enabled = false;
            state.is_playing = false;
        }
        self.release_stream();
        self.audio.pause();
        self.audio.release();
        info!("Session torn down");
        self.publish();
    }

    fn publish(&self) {
        let snapshot = build_snapshot(&self.state.borrow(), &self.peers);
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Drop for SessionViewModel {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn record_error(state: &mut SessionState, error: SessionError) {
    warn!(error = ?error, "{}", error);
    state.error = Some(error.to_string());
}

fn build_snapshot(state: &SessionState, peers: &[Peer]) -> SessionSnapshot {
    let self_tile = PresenceTile::for_self(state.identity.as_ref(), state.avatar, state.camera_enabled);
    SessionSnapshot {
        identity: state.identity.clone(),
        avatar: state.avatar,
        editing_identity: state.editing_identity,
        camera_enabled: state.camera_enabled,
        camera_pending: state.camera_pending,
        track: state.track.clone(),
        is_playing: state.is_playing,
        generating: state.generating,
        volume: state.volume,
        error: state.error.clone(),
        tiles: presence_tiles(self_tile, peers),
    }
}
