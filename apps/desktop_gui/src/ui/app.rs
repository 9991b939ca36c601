use std::time::Duration;

use client_core::{Completion, GenerationController, LogPaginator};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::log_panel::{show_log_panel, LogNavigation};
use crate::ui::viewport::{render, show_viewport, OrbitCamera, PointCloudPrimitives};

const SIDEBAR_WIDTH: f32 = 350.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_url: String,
    pub initial_count: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Validation => "Bad response",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub struct LabApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    api_url: String,
    generation: GenerationController,
    logs: LogPaginator,

    cloud: PointCloudPrimitives,
    camera: OrbitCamera,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl LabApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_url: startup.api_url,
            generation: GenerationController::new(startup.initial_count),
            logs: LogPaginator::new(),
            cloud: PointCloudPrimitives::default(),
            camera: OrbitCamera::default(),
            status: "Idle".to_string(),
            status_banner: None,
        };
        app.navigate_logs(None);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    tracing::info!("{message}");
                    self.status = message;
                }
                UiEvent::Error(err) => self.report_error(err),
                UiEvent::PointsGenerated { ticket, result } => {
                    match self.generation.finish(ticket, result) {
                        Ok(Completion::Applied) => {
                            self.cloud = render(self.generation.points());
                            self.status =
                                format!("Received {} points", self.cloud.len());
                            self.status_banner = None;
                            self.navigate_logs(None);
                        }
                        Ok(Completion::Superseded) => {}
                        Err(err) => self.report_error(UiError::from_client_error(
                            UiErrorContext::GeneratePoints,
                            &err,
                        )),
                    }
                }
                UiEvent::LogsLoaded { ticket, result } => match self.logs.finish(ticket, result) {
                    Ok(_) => {}
                    Err(err) => self.report_error(UiError::from_client_error(
                        UiErrorContext::LoadLogs,
                        &err,
                    )),
                },
            }
        }
    }

    fn report_error(&mut self, err: UiError) {
        tracing::error!(
            category = err_label(err.category()),
            context = err.context().label(),
            "{}",
            err.message()
        );
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: format!("{}: {}", err_label(err.category()), err.summary()),
        });
    }

    fn generate(&mut self) {
        let ticket = self.generation.begin();
        let seq = ticket.seq();
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::GeneratePoints { ticket },
            &mut self.status,
        ) {
            self.generation.abandon(seq);
        }
    }

    /// `None` loads the first page.
    fn navigate_logs(&mut self, nav: Option<LogNavigation>) {
        let ticket = match nav {
            None => self.logs.begin_load(0),
            Some(LogNavigation::Refresh) => self.logs.begin_refresh(),
            Some(LogNavigation::Next) => self.logs.begin_next(),
            Some(LogNavigation::Previous) => self.logs.begin_previous(),
        };
        let seq = ticket.seq();
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadLogs { ticket },
            &mut self.status,
        ) {
            self.logs.abandon(seq);
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        if ui.small_button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            ui.add_space(6.0);
        }
    }

    fn show_generation_form(&mut self, ui: &mut egui::Ui) {
        ui.label("Number of points:");
        ui.add(egui::TextEdit::singleline(self.generation.count_mut()).desired_width(f32::INFINITY));

        let busy = self.generation.is_busy();
        let label = if busy { "Loading..." } else { "Generate" };
        ui.add_space(4.0);
        if ui
            .add_enabled(!busy, egui::Button::new(label).min_size(egui::vec2(120.0, 0.0)))
            .clicked()
        {
            self.generate();
        }
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("lab_controls")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Point Cloud Lab");
                ui.label(egui::RichText::new(&self.api_url).small().weak());
                ui.add_space(8.0);

                self.show_status_banner(ui);
                self.show_generation_form(ui);

                ui.separator();
                if let Some(nav) = show_log_panel(ui, &self.logs) {
                    self.navigate_logs(Some(nav));
                }

                ui.separator();
                ui.label(egui::RichText::new(&self.status).small().weak());
            });
    }
}

impl eframe::App for LabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_sidebar(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| show_viewport(ui, &self.cloud, &mut self.camera));

        if self.generation.is_busy() || self.logs.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
