// src/main.rs
use content_notify::scheduler::start_scheduler;
use content_notify::*;
use env_logger::Env;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "content-notify")]
struct Opt {
    #[structopt(short, long, default_value = "config.yml")]
    config: String,

    /// Run a single notification cycle and exit (external cron mode).
    #[structopt(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    let settings = match Settings::load_from_file(&opt.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {:?}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(SqliteContentStore::new(&settings.database_url).await?);
    let state = Arc::new(FileRunState::load(&settings.state_file)?);
    let mailer = Arc::new(SmtpMailer::new(settings.smtp.clone())?);
    let urls = Arc::new(BaseUrlResolver::new(&settings.base_url)?);

    let interval = Duration::from_secs(settings.scheduler.interval_seconds);
    let manager = Arc::new(ContentNotifyManager::new(
        settings,
        store,
        state,
        mailer,
        urls,
        Arc::new(SystemClock),
    ));

    if opt.once {
        manager.run_cycle().await;
        return Ok(());
    }

    info!(
        "starting notification scheduler, one cycle every {}s",
        interval.as_secs()
    );
    start_scheduler(manager, interval).await;
    Ok(())
}
