// Engine main entry point
use engine::config::settings::DashboardSettings;
use engine::services::DashboardService;
use tracing::info;

// Optional path to a JSON settings file; built-in defaults apply without it.
const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

fn load_settings() -> anyhow::Result<DashboardSettings> {
    let settings = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!(path = %path.to_string_lossy(), "Loading settings");
            DashboardSettings::load_from_file(path)?
        }
        None => DashboardSettings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the snapshot JSON.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting campaign dashboard engine...");
    let settings = load_settings()?;
    info!(data_dir = %settings.data_dir.display(), "Reading reports");

    let mut service = DashboardService::new(settings);
    let snapshot = service.render()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
