//! Desktop GUI for the agronomy advisory client.

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::AdvisorGuiApp;

#[derive(Parser, Debug)]
struct Args {
    /// Advisory server base URL; falls back to ADVISOR_SERVER_URL, then
    /// localhost.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let server_url = args
        .server_url
        .or_else(|| std::env::var("ADVISOR_SERVER_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Agro Advisor")
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Agro Advisor",
        options,
        Box::new(|_cc| Ok(Box::new(AdvisorGuiApp::new(cmd_tx, ui_rx)))),
    )
}
