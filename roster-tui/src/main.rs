mod app;
mod config;
mod hit;
mod listeners;
mod paths;
mod theme;
mod ui;
mod widgets;

use std::fs::File;
use std::process::ExitCode;

use log::error;
use log::info;
use roster_lib::UsersClient;
use roster_lib::source::UserSource;
use roster_lib::table::TableState;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::config::Settings;
use crate::ui::Terminal;

fn init_logging() {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("Warning: cannot write log file {}: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("starting with {:?}", settings);

    let client = match UsersClient::builder()
        .url(settings.endpoint.clone())
        .timeout(settings.timeout())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = UserSource::new(client, settings.fetch_delay());
    let mut app = App::new(source, TableState::new(settings.page_size));

    let result = match Terminal::new() {
        Ok(mut terminal) => app.run(&mut terminal).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("terminal error: {}", e);
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
