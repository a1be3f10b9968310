use super::chart::RgbImage;
use super::{Error, Result};
use eframe::egui;
use log::info;

/// Window showing one pre-rendered chart, scaled to fit.
pub struct ChartViewer {
    image: egui::ColorImage,
    texture: Option<egui::TextureHandle>,
}

impl ChartViewer {
    pub fn new(chart: &RgbImage) -> Self {
        let size = [chart.width as usize, chart.height as usize];
        Self {
            image: egui::ColorImage::from_rgb(size, &chart.pixels),
            texture: None,
        }
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let image = &self.image;
        let texture = self.texture.get_or_insert_with(|| {
            ctx.load_texture("chart", image.clone(), egui::TextureOptions::LINEAR)
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Image::new((texture.id(), texture.size_vec2())).shrink_to_fit(),
                    );
                });
            });
    }
}

/// Open a native window with the chart and block until the user closes it.
pub fn show(title: &str, chart: &RgbImage) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([chart.width as f32, chart.height as f32])
            .with_min_inner_size([300.0, 200.0]),
        ..Default::default()
    };
    let app = ChartViewer::new(chart);
    info!("showing the chart, close the window to exit");
    eframe::run_native(title, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| Error::Viewer(e.to_string()))
}
