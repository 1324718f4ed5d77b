use anyhow::Context;
use eframe::egui;
use focus::FocusApp;
use focus_session::infrastructure::driven::{
    FileStore, GstAudioOutput, GstCamera, HttpTrackGenerator, PreviewSink, StaticPresence,
};
use focus_session::{SessionPorts, SessionRuntime, Settings};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type AppResult = Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    tracing::info!("FocUS starting, generator at {}", settings.generator_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FocUS")
            .with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "FocUS",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| -> AppResult {
            let preview = PreviewSink::new();
            let ports = build_ports(&settings, preview.clone())?;
            let ctx = cc.egui_ctx.clone();
            let session = SessionRuntime {
                options: settings.view_model_options(),
                timer_seconds: settings.timer_seconds,
            }
            .spawn(ports, move || ctx.request_repaint())?;
            Ok(Box::new(FocusApp::new(session, preview)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI exited with error: {}", e))
}

fn build_ports(settings: &Settings, preview: PreviewSink) -> anyhow::Result<SessionPorts> {
    let storage_path = settings
        .storage_path
        .clone()
        .unwrap_or_else(FileStore::default_path);
    let store = FileStore::open(&storage_path)
        .with_context(|| format!("Failed to open profile store at {}", storage_path.display()))?;
    let generator = HttpTrackGenerator::new(&settings.generator_url, settings.request_timeout())?;
    let camera = GstCamera::new(preview)?;
    let audio = GstAudioOutput::new(settings.view_model_options().initial_volume)?;

    Ok(SessionPorts {
        store: Arc::new(store),
        camera: Arc::new(camera),
        audio: Arc::new(audio),
        generator: Arc::new(generator),
        presence: Arc::new(StaticPresence::mock_room()),
    })
}
