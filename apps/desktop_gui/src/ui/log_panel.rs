use client_core::LogPaginator;
use eframe::egui;
use shared::domain::LogRecord;

const ID_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
const BODY_COLOR: egui::Color32 = egui::Color32::from_rgb(0xcc, 0xcc, 0xcc);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogNavigation {
    Refresh,
    Next,
    Previous,
}

/// Draws the log list and its pagination bar. Buttons are enabled from the
/// paginator's bounds; the returned action is what the user clicked.
pub fn show_log_panel(ui: &mut egui::Ui, logs: &LogPaginator) -> Option<LogNavigation> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading("Stored logs");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if logs.is_loading() {
                ui.spinner();
            }
            if ui.small_button("Refresh").clicked() {
                action = Some(LogNavigation::Refresh);
            }
        });
    });

    let footer_height = ui.spacing().interact_size.y + 8.0;
    egui::Frame::NONE
        .fill(egui::Color32::BLACK)
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(0x33)))
        .inner_margin(egui::Margin::same(5))
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height((ui.available_height() - footer_height).max(0.0))
                .show(ui, |ui| {
                    if logs.records().is_empty() {
                        ui.weak("No records on this page.");
                    }
                    for (i, record) in logs.records().iter().enumerate() {
                        show_record(ui, record, logs.offset() + i as u64);
                    }
                });
        });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(logs.can_previous(), egui::Button::new("← Previous"))
            .clicked()
        {
            action = Some(LogNavigation::Previous);
        }
        ui.label(egui::RichText::new(logs.window_label()).small());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(logs.can_next(), egui::Button::new("Next →"))
                .clicked()
            {
                action = Some(LogNavigation::Next);
            }
        });
    });

    action
}

fn show_record(ui: &mut egui::Ui, record: &LogRecord, position: u64) {
    ui.push_id(record.id().map(str::to_owned).unwrap_or_else(|| position.to_string()), |ui| {
        ui.label(
            egui::RichText::new(format!("ID: {}", record.id().unwrap_or("-")))
                .monospace()
                .size(11.0)
                .color(ID_COLOR),
        );
        ui.label(
            egui::RichText::new(record.display_text())
                .monospace()
                .size(11.0)
                .color(BODY_COLOR),
        );
        ui.separator();
    });
}
