mod app;
mod hierarchy;
mod history;
mod inspector;
mod project;
mod theme;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Calluna Editor")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Calluna Editor",
        options,
        Box::new(|cc| Ok(Box::new(app::CallunaApp::new(cc)))),
    )
}
