use clap::Parser;
use std::sync::Arc;
use user_feed::utils::error::ErrorSeverity;
use user_feed::utils::{logger, validation::Validate};
use user_feed::{
    CliConfig, DetailAdapter, FeedError, FeedSettings, HttpTransport, ListAdapter, TextDetailView,
    TextListView, UserDetailViewModel, UsersViewModel,
};

async fn run(config: &CliConfig, settings: FeedSettings) -> user_feed::Result<()> {
    let transport = HttpTransport::from_config(&settings)?;
    let mut users = UsersViewModel::new(Arc::new(transport), Arc::new(settings));
    let mut list = ListAdapter::attach(users.users(), TextListView::new());

    let ticket = users.load_users();
    users.settle().await;
    ticket.wait().await?;

    println!("{}", list.view());

    if let Some(index) = config.select {
        let selected = users.user_at(index).ok_or_else(|| FeedError::SelectionError {
            index,
            len: users.users().value().len(),
        })?;

        let detail = UserDetailViewModel::new();
        let mut detail_view = DetailAdapter::attach(detail.user(), TextDetailView::new());
        detail.configure(selected);
        println!("{}", detail_view.view());
        detail_view.teardown();
    }

    list.teardown();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match FeedSettings::from_cli(&config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting user-feed CLI");
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&config, settings).await {
        tracing::error!(
            "❌ user-feed failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
