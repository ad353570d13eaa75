use crate::app::core::{init, transition, Effect, Model, Msg, Upload};
use crate::app::presentation::{confidence_text, presentation};
use crate::app::run_effect::RunEffect;
use crate::config::Config;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::path::Path;
use std::sync::Arc;

const CARD_MIN_HEIGHT: f32 = 400.0;
const PREVIEW_MAX_WIDTH: f32 = 420.0;

struct Preview {
    image: Arc<image::DynamicImage>,
    texture: egui::TextureHandle,
}

pub struct FreshFruitWindow {
    model: Model,
    pending: Vec<Effect>,
    pending_painted: bool,
    run_effect: RunEffect,
    logger: Arc<dyn Logger + Send + Sync>,
    preview: Option<Preview>,
    path_input: String,
}

impl FreshFruitWindow {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier>,
    ) -> Self {
        let logger = logger.with_namespace("app");
        let (model, effects) = init();

        Self {
            model,
            pending: effects,
            pending_painted: false,
            run_effect: RunEffect::new(logger.clone(), image_classifier),
            logger,
            preview: None,
            path_input: String::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let _ = self
            .logger
            .info(&format!("msg: {}", msg.to_display_string()));

        let model = std::mem::take(&mut self.model);
        let (model, effects) = transition(model, msg);
        self.model = model;
        self.pending.extend(effects);
    }

    /// Effects wait for one painted frame so the spinner is on screen before
    /// the blocking call.
    fn run_pending_effects(&mut self) {
        if !self.pending_painted {
            self.pending_painted = !self.pending.is_empty();
            return;
        }
        self.pending_painted = false;

        let effects = std::mem::take(&mut self.pending);
        for effect in effects {
            let msg = self.run_effect.run_effect(effect);
            self.dispatch(msg);
        }
    }

    fn sync_preview(&mut self, ctx: &egui::Context) {
        let Some(Upload { image, .. }) = &self.model.upload else {
            self.preview = None;
            return;
        };

        if let Some(preview) = &self.preview {
            if Arc::ptr_eq(&preview.image, image) {
                return;
            }
        }

        let rgba = image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        let texture = ctx.load_texture("upload-preview", color_image, egui::TextureOptions::LINEAR);

        self.preview = Some(Preview {
            image: image.clone(),
            texture,
        });
    }
}

impl eframe::App for FreshFruitWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_pending_effects();

        let mut msgs: Vec<Msg> = ctx
            .input(|i| i.raw.dropped_files.clone())
            .into_iter()
            .map(|file| match (file.bytes, file.path) {
                (Some(bytes), _) => Msg::FileUploaded {
                    name: file.name,
                    bytes: bytes.to_vec(),
                },
                (None, Some(path)) => read_upload(&path),
                (None, None) => Msg::FileUnreadable {
                    name: file.name,
                    message: "no contents".to_string(),
                },
            })
            .collect();

        self.sync_preview(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("🍏 FreshFruit AI")
                        .strong()
                        .size(22.0)
                        .color(egui::Color32::from_rgb(0x22, 0xC5, 0x5E)),
                );
                ui.label(egui::RichText::new("Beta").small().weak());
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("© 2025 FreshFruit AI • Powered by egui").weak());
            });
        });

        let model = &self.model;
        let preview = self.preview.as_ref().map(|preview| &preview.texture);
        let path_input = &mut self.path_input;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &model.error {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(0xEF, 0x44, 0x44), error.as_str());
                    if ui.small_button("Dismiss").clicked() {
                        msgs.push(Msg::DismissError);
                    }
                });
                ui.separator();
            }

            ui.columns(2, |columns| {
                upload_card(&mut columns[0], model, preview, path_input, &mut msgs);
                results_card(&mut columns[1], model);
            });
        });

        for msg in msgs {
            self.dispatch(msg);
        }

        if !self.pending.is_empty() {
            ctx.request_repaint();
        }
    }
}

fn upload_card(
    ui: &mut egui::Ui,
    model: &Model,
    preview: Option<&egui::TextureHandle>,
    path_input: &mut String,
    msgs: &mut Vec<Msg>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_height(CARD_MIN_HEIGHT);
        ui.heading("Upload Fruit Image");
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(path_input).hint_text("Path to a JPG or PNG"));
            if ui.button("Open").clicked() && !path_input.trim().is_empty() {
                msgs.push(read_upload(Path::new(path_input.trim())));
            }
        });
        ui.label(egui::RichText::new("…or drop an image onto this window").weak());

        if let Some(texture) = preview {
            ui.add_space(12.0);
            ui.add(
                egui::Image::new(egui::load::SizedTexture::from_handle(texture))
                    .max_width(PREVIEW_MAX_WIDTH)
                    .shrink_to_fit(),
            );
            if let Some(upload) = &model.upload {
                ui.label(egui::RichText::new(upload.name.as_str()).small().weak());
            }

            ui.add_space(12.0);
            let classify = ui.add_enabled(model.can_classify(), egui::Button::new("Classify Fruit"));
            if classify.clicked() {
                msgs.push(Msg::ClassifyClicked);
            }
        }
    });
}

fn results_card(ui: &mut egui::Ui, model: &Model) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_height(CARD_MIN_HEIGHT);
        ui.heading("Classification Results");
        ui.add_space(16.0);

        if model.analyzing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing...");
            });
            return;
        }

        let Some(results) = model.results.filter(|_| model.classified) else {
            ui.vertical_centered(|ui| {
                ui.add_space(CARD_MIN_HEIGHT / 3.0);
                ui.label(egui::RichText::new("Upload an image to see results").weak());
            });
            return;
        };

        let shown = presentation(results.label);
        let confidence = confidence_text(results.confidence);

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(shown.icon)
                    .size(32.0)
                    .strong()
                    .color(shown.accent),
            );
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(shown.title).size(24.0).strong());
                ui.label(format!("{} confidence", confidence));
            });
        });

        ui.add_space(12.0);
        ui.label(egui::RichText::new("Analysis Details").strong());
        egui::Grid::new("details").num_columns(2).show(ui, |ui| {
            ui.label("Freshness");
            ui.label(shown.title);
            ui.end_row();
            ui.label("Confidence");
            ui.label(confidence.as_str());
            ui.end_row();
            ui.label("Recommendation");
            ui.label(shown.recommendation);
            ui.end_row();
        });
    });
}

fn read_upload(path: &Path) -> Msg {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match std::fs::read(path) {
        Ok(bytes) => Msg::FileUploaded { name, bytes },
        Err(error) => Msg::FileUnreadable {
            name,
            message: error.to_string(),
        },
    }
}

pub fn run(
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FreshFruit AI - Fruit Freshness Classifier")
            .with_inner_size(config.window_size),
        ..Default::default()
    };

    let window = FreshFruitWindow::new(logger, image_classifier);

    eframe::run_native(
        "FreshFruit AI",
        options,
        Box::new(|_cc| Box::new(window)),
    )
    .map_err(|error| format!("window failed: {}", error))?;

    Ok(())
}
