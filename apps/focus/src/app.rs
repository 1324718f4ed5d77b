use egui::{Color32, RichText, Vec2};
use focus_session::infrastructure::driven::{PreviewFrame, PreviewSink};
use focus_session::{Avatar, Command, PresenceTile, SessionHandle, SessionSnapshot, TileFace, TimerSnapshot};
use std::time::Duration;

use crate::labels;

const TILE_SIZE: Vec2 = Vec2::new(180.0, 110.0);
const PREVIEW_SIZE: Vec2 = Vec2::new(320.0, 180.0);
const PREVIEW_REFRESH: Duration = Duration::from_millis(33);

pub struct FocusApp {
    session: SessionHandle,
    preview: PreviewSink,
    preview_seen: u64,
    preview_texture: Option<egui::TextureHandle>,
    name_draft: String,
    editor_open: bool,
}

impl FocusApp {
    pub fn new(session: SessionHandle, preview: PreviewSink) -> Self {
        Self {
            session,
            preview,
            preview_seen: 0,
            preview_texture: None,
            name_draft: String::new(),
            editor_open: false,
        }
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some((sequence, frame)) = self.preview.newer_than(self.preview_seen) else {
            return;
        };
        self.preview_seen = sequence;
        match frame {
            Some(frame) => {
                let image = color_image(&frame);
                match &mut self.preview_texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.preview_texture =
                            Some(ctx.load_texture("camera-preview", image, egui::TextureOptions::LINEAR))
                    }
                }
            }
            None => self.preview_texture = None,
        }
    }

    fn header(&self, ui: &mut egui::Ui, session: &SessionSnapshot) {
        ui.horizontal(|ui| {
            ui.heading("FocUS");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut volume = session.volume.level();
                if ui
                    .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                    .on_hover_text("Volume")
                    .changed()
                {
                    self.session.send(Command::SetVolume(volume));
                }

                let play = labels::playback_button(session.is_playing, session.track.is_some());
                if ui.button(play).on_hover_text("Toggle lofi").clicked() {
                    self.session.send(Command::TogglePlayback);
                }

                if ui
                    .add_enabled(!session.generating, egui::Button::new(labels::track_button(session.generating)))
                    .on_hover_text("Generate a new lofi track")
                    .clicked()
                {
                    self.session.send(Command::RequestNewTrack);
                }

                if ui.button(labels::name_button(session.display_name())).clicked() {
                    self.session.send(Command::SetEditingIdentity(true));
                }
            });
        });
    }

    fn self_card(&self, ui: &mut egui::Ui, session: &SessionSnapshot) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading("You");
                let label = labels::camera_button(session.camera_enabled, session.camera_pending);
                if ui
                    .add_enabled(!session.camera_pending, egui::Button::new(label))
                    .clicked()
                {
                    self.session.send(Command::ToggleCamera);
                }
            });

            ui.allocate_ui(PREVIEW_SIZE, |ui| {
                ui.set_min_size(PREVIEW_SIZE);
                ui.vertical_centered(|ui| match (&self.preview_texture, session.camera_enabled) {
                    (Some(texture), true) => {
                        ui.image((texture.id(), PREVIEW_SIZE));
                    }
                    _ => {
                        if let Some(tile) = session.tiles.first() {
                            face(ui, &tile.face, 32.0);
                        }
                    }
                });
            });
        });
    }

    fn timer_card(&self, ui: &mut egui::Ui, timer: &TimerSnapshot) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.heading(format!("Countdown: {}", timer.display));
            ui.horizontal(|ui| {
                if ui.button("Start").clicked() {
                    self.session.send(Command::StartTimer);
                }
                if ui.button("Stop").clicked() {
                    self.session.send(Command::StopTimer);
                }
                if ui.button("Reset").clicked() {
                    self.session.send(Command::ResetTimer);
                }
            });
        });
    }

    fn room(&self, ui: &mut egui::Ui, session: &SessionSnapshot) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Main Room · Library");
                ui.label(labels::occupancy(session.occupancy()));
            });
            ui.horizontal_wrapped(|ui| {
                for tile in &session.tiles {
                    presence_tile(ui, tile);
                }
            });
        });
    }

    fn identity_editor(&mut self, ctx: &egui::Context, session: &SessionSnapshot) {
        if !session.editing_identity {
            self.editor_open = false;
            return;
        }
        if !self.editor_open {
            self.editor_open = true;
            self.name_draft = session
                .display_name()
                .map(|name| name.as_str().to_string())
                .unwrap_or_default();
        }

        egui::Window::new("Choose your display name and avatar")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Select an Avatar:");
                ui.horizontal(|ui| {
                    for avatar in Avatar::ALL {
                        let text = format!("{} {}", labels::avatar_glyph(avatar), avatar.label());
                        if ui.selectable_label(session.avatar == Some(avatar), text).clicked() {
                            self.session.send(Command::SelectAvatar(Some(avatar)));
                        }
                    }
                    if ui.selectable_label(session.avatar.is_none(), "? Initials").clicked() {
                        self.session.send(Command::SelectAvatar(None));
                    }
                });

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.name_draft).hint_text("e.g., Donald P."),
                );
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.session.send(Command::SetEditingIdentity(false));
                    }
                    if ui.button("Save").clicked() || submitted {
                        self.session.send(Command::ConfirmIdentity(self.name_draft.clone()));
                    }
                });
            });
    }
}

impl eframe::App for FocusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let session = self.session.session();
        let timer = self.session.timer();

        self.refresh_preview(ctx);
        if session.camera_enabled {
            ctx.request_repaint_after(PREVIEW_REFRESH);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| self.header(ui, &session));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        self.self_card(ui, &session);
                        ui.add_space(12.0);
                        self.timer_card(ui, &timer);
                    });
                    ui.add_space(12.0);
                    ui.vertical(|ui| self.room(ui, &session));
                });

                if let Some(ref err) = session.error {
                    ui.add_space(12.0);
                    ui.colored_label(Color32::from_rgb(225, 29, 72), err);
                }
            });
        });

        self.identity_editor(ctx, &session);
    }
}

fn color_image(frame: &PreviewFrame) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied([frame.width as usize, frame.height as usize], &frame.rgba)
}

fn presence_tile(ui: &mut egui::Ui, tile: &PresenceTile) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_size(TILE_SIZE);
        ui.set_max_width(TILE_SIZE.x);
        ui.vertical_centered(|ui| {
            face(ui, &tile.face, 24.0);
            if tile.face != TileFace::Live {
                ui.small(&tile.name);
            }
        });
    });
}

fn face(ui: &mut egui::Ui, face: &TileFace, size: f32) {
    match face {
        TileFace::Live => {
            ui.label(RichText::new("● Live").color(Color32::LIGHT_GREEN));
        }
        TileFace::Avatar(avatar) => {
            ui.label(RichText::new(labels::avatar_glyph(*avatar)).size(size));
        }
        TileFace::Initials(text) => {
            ui.label(RichText::new(text).size(size).strong());
        }
    }
}
