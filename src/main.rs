use clap::Parser;
use dept_report::app::menu::{Menu, FAREWELL};
use dept_report::utils::{logger, validation::Validate};
use dept_report::{Action, CliConfig, LocalStorage, Outcome, ReportEngine, ReportError};
use std::io::{self, Write};

fn main() {
    let config = CliConfig::parse();

    // 載入並合併配置
    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::debug!("Resolved settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let engine = ReportEngine::new(LocalStorage::current_dir(), settings);

    if let Err(e) = run(&engine, config.action) {
        tracing::error!(
            "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

fn run(engine: &ReportEngine<LocalStorage>, action: Option<Action>) -> Result<(), ReportError> {
    let dataset = engine.load_dataset()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let action = match action {
        Some(action) => action,
        None => Menu::default().prompt(&mut io::stdin().lock(), &mut out)?,
    };

    match engine.execute(&dataset, action, &mut out)? {
        Outcome::Saved { path, .. } => writeln!(out, "📁 Report saved to: {}", path)?,
        Outcome::Exited => writeln!(out, "{}", FAREWELL)?,
        Outcome::Printed { .. } => {}
    }

    Ok(())
}
