//! Raw-data dialog behind the "Get the data" button

use egui::Context;
use egui_extras::{Column, TableBuilder};

use rp_core::FullChartData;

/// Modal-style window listing every column of the extracted batch.
pub struct TableDialog {
    pub open: bool,
    window_title: String,
    max_rows_displayed: usize,
}

impl TableDialog {
    pub fn new(window_title: impl Into<String>) -> Self {
        Self {
            open: false,
            window_title: window_title.into(),
            max_rows_displayed: 1000,
        }
    }

    pub fn show(&mut self, ctx: &Context, data: &FullChartData) {
        if !self.open {
            return;
        }

        let mut open = self.open;
        egui::Window::new(&self.window_title)
            .open(&mut open)
            .resizable(true)
            .default_size([480.0, 320.0])
            .show(ctx, |ui| {
                self.render_table(ui, data);
            });
        self.open = open;
    }

    fn render_table(&self, ui: &mut egui::Ui, data: &FullChartData) {
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
        let num_rows = data.rows.len().min(self.max_rows_displayed);

        if data.rows.len() > num_rows {
            ui.label(format!(
                "Showing the first {} of {} rows",
                num_rows,
                data.rows.len()
            ));
        }

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(true)
            .columns(
                Column::initial(100.0).at_least(60.0).clip(true),
                data.column_names.len(),
            )
            .header(20.0, |mut header| {
                for name in &data.column_names {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, num_rows, |row_index, mut row| {
                    for cell in &data.rows[row_index] {
                        row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    }
}
