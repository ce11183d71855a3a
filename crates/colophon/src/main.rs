use std::process::ExitCode;

use colophon_app::{cli, engine, logging, settings};
use gpui::{App, Application};
use tracing::{error, info};

mod gui;

use gui::ColophonApp;

fn main() -> ExitCode {
    let (cli_args, sources) = cli::parse_cli();
    let settings = match settings::resolve_settings(&cli_args, &sources) {
        Ok(settings) => settings,
        Err(err) => {
            logging::init(&cli_args.log_level);
            error!(error = %err, "invalid configuration");
            eprintln!("colophon: {err}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&settings.log_level);
    if let Some(path) = &settings.config_path {
        info!(config = %path.display(), "loaded configuration");
    }

    let engine = engine::build_engine(&settings.ocr);
    let app = ColophonApp::new(engine, settings.image);

    Application::new().run(move |cx: &mut App| {
        if let Err(err) = app.open_window(cx) {
            error!(error = %err, "failed to open main window");
            cx.quit();
            return;
        }
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();
        cx.activate(true);
    });

    ExitCode::SUCCESS
}
