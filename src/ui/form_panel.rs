//! The input form.
//!
//! The panel reads `FormState` and reports what the user changed as
//! `FormEvent`s; it never writes to the state itself.

use crate::card::{Background, CardFont, FormState};
use crate::state::FormEvent;
use eframe::egui::{self, RichText};

const FIELD_WIDTH: f32 = 320.0;

/// Draw the form and collect this frame's events in control order.
pub fn show_form_panel(ui: &mut egui::Ui, form: &FormState, download_enabled: bool) -> Vec<FormEvent> {
    let mut events = Vec::new();

    ui.heading("文摘生成器");
    ui.add_space(12.0);

    egui::Grid::new("card_style_grid")
        .num_columns(2)
        .spacing([12.0, 10.0])
        .show(ui, |ui| {
            ui.label("背景样式");
            let mut background = form.background;
            egui::ComboBox::from_id_source("background_select")
                .selected_text(background.label())
                .width(FIELD_WIDTH - 80.0)
                .show_ui(ui, |ui| {
                    for choice in Background::all() {
                        ui.selectable_value(&mut background, *choice, choice.label());
                    }
                });
            if background != form.background {
                events.push(FormEvent::BackgroundChanged(background));
            }
            ui.end_row();

            ui.label("字体选择");
            let mut font = form.font;
            egui::ComboBox::from_id_source("font_select")
                .selected_text(font.label())
                .width(FIELD_WIDTH - 80.0)
                .show_ui(ui, |ui| {
                    for choice in CardFont::all() {
                        ui.selectable_value(&mut font, *choice, choice.label());
                    }
                });
            if font != form.font {
                events.push(FormEvent::FontChanged(font));
            }
            ui.end_row();

            ui.label("日期");
            let mut date = form.date.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut date)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(FIELD_WIDTH - 80.0),
                )
                .changed()
            {
                events.push(FormEvent::DateChanged(date));
            }
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.label("文摘内容");
    let mut content = form.content.clone();
    if ui
        .add(
            egui::TextEdit::multiline(&mut content)
                .hint_text("请输入文摘内容...")
                .desired_rows(6)
                .desired_width(FIELD_WIDTH),
        )
        .changed()
    {
        events.push(FormEvent::ContentEdited(content));
    }

    ui.add_space(8.0);
    ui.label("出处");
    let mut source = form.source.clone();
    if ui
        .add(
            egui::TextEdit::singleline(&mut source)
                .hint_text("请输入出处")
                .desired_width(FIELD_WIDTH),
        )
        .changed()
    {
        events.push(FormEvent::SourceEdited(source));
    }

    ui.add_space(8.0);
    ui.label("视频号作者");
    let mut author = form.author.clone();
    if ui
        .add(
            egui::TextEdit::singleline(&mut author)
                .hint_text("请输入视频号作者")
                .desired_width(FIELD_WIDTH),
        )
        .changed()
    {
        events.push(FormEvent::AuthorEdited(author));
    }

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        if ui.button(RichText::new("生成文摘").strong()).clicked() {
            events.push(FormEvent::Generate);
        }

        let download = ui
            .add_enabled(download_enabled, egui::Button::new("下载图片"))
            .on_disabled_hover_text("正在准备下载功能...");
        if download.clicked() {
            events.push(FormEvent::Download);
        }

        if ui.button("复制内容").clicked() {
            events.push(FormEvent::Copy);
        }
    });

    events
}
