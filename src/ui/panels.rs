use egui::{Color32, Context, RichText, ScrollArea, Ui};
use std::sync::atomic::Ordering;

use crate::geometry::MAX_SUBDIVISIONS;
use crate::scene::FrameStats;
use crate::ui::state::ControlsState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub load_scene: bool,
    pub reset_fireball: bool,
}

pub fn draw_side_panel(ctx: &Context, state: &mut ControlsState, stats: &FrameStats) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(300.0)
        .max_width(380.0)
        .default_width(320.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("Fireball").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Procedural Shader Playground")
                        .color(TEXT_MUTED)
                        .size(11.0),
                );
                ui.add_space(16.0);

                section_header(ui, "SCENE");
                ui.horizontal(|ui| {
                    ui.label("Tessellations:");
                    ui.add(egui::Slider::new(
                        &mut state.fireball.tessellations,
                        0..=MAX_SUBDIVISIONS,
                    ));
                });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add(
                            egui::Button::new(RichText::new("Load Scene").color(BG_PURE_BLACK))
                                .fill(ACCENT_EMBER)
                                .min_size(egui::vec2(100.0, 32.0)),
                        )
                        .clicked()
                    {
                        actions.load_scene = true;
                    }
                    if ui.button("Reset Fireball").clicked() {
                        actions.reset_fireball = true;
                    }
                });
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "FLAME");
                ui.horizontal(|ui| {
                    ui.label("Size:");
                    ui.add(egui::Slider::new(&mut state.fireball.flame_size, 1.0..=1.8).step_by(0.1));
                });
                ui.add_space(12.0);

                section_header(ui, "COLORS");
                color_grid(ui, "top_color", "Top", &mut state.fireball.top_color);
                ui.add_space(8.0);
                color_grid(ui, "bottom_color", "Bottom", &mut state.fireball.bottom_color);
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                perf_controls(ui, state);
                ui.add_space(16.0);

                if state.show_stats {
                    ui.separator();
                    ui.add_space(12.0);
                    stats_panel(ui, stats);
                }
            });
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn color_grid(ui: &mut Ui, id: &str, label: &str, color: &mut [f32; 4]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let preview = Color32::from_rgb(
            color[0].clamp(0.0, 255.0) as u8,
            color[1].clamp(0.0, 255.0) as u8,
            color[2].clamp(0.0, 255.0) as u8,
        );
        egui::color_picker::show_color(ui, preview, egui::vec2(24.0, 14.0));
    });
    egui::Grid::new(id)
        .num_columns(4)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            for channel in ["R", "G", "B", "A"] {
                ui.label(RichText::new(channel).color(TEXT_MUTED).size(10.0));
            }
            ui.end_row();

            for i in 0..3 {
                ui.add(
                    egui::DragValue::new(&mut color[i])
                        .range(0.0..=255.0)
                        .speed(1.0),
                );
            }
            ui.add(
                egui::DragValue::new(&mut color[3])
                    .range(0.0..=1.0)
                    .speed(0.01),
            );
            ui.end_row();
        });
}

fn perf_controls(ui: &mut Ui, state: &mut ControlsState) {
    section_header(ui, "PERFORMANCE");
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.vsync_enabled, "VSync");
        ui.checkbox(&mut state.show_stats, "Stats");
    });
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.fps_cap_enabled, "FPS Cap:");
        ui.add_enabled(
            state.fps_cap_enabled,
            egui::DragValue::new(&mut state.fps_cap)
                .range(30..=500)
                .suffix(" fps"),
        );
    });
}

fn stats_panel(ui: &mut Ui, stats: &FrameStats) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id =
                Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps = *stats.fps.lock();
            let fps_color = if fps >= 60.0 {
                ACCENT_GREEN
            } else if fps >= 30.0 {
                ACCENT_ORANGE
            } else {
                ACCENT_RED
            };

            egui::Grid::new("stats")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("FPS").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("{:.0}", fps)).color(fps_color));
                    ui.end_row();

                    ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(fmt_num(stats.triangles.load(Ordering::Relaxed)))
                            .color(ACCENT_EMBER),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Vertices").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(fmt_num(stats.vertices.load(Ordering::Relaxed)))
                            .color(TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Level").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(format!("{}", stats.level.load(Ordering::Relaxed)))
                            .color(TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Regen ms").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(format!("{:.2}", *stats.regen_time_ms.lock()))
                            .color(TEXT_PRIMARY),
                    );
                    ui.end_row();
                });
        });
}

pub fn draw_help_overlay(ctx: &Context, distance: f32) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(
                        RichText::new("LMB+Drag - Orbit | Scroll - Zoom").color(TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!("Distance: {:.1}", distance)).color(TEXT_MUTED),
                    );
                });
        });
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}
