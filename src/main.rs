//! ChatWarden Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use tracing::{error, info, warn};

use ChatWarden::{
    config::Settings,
    database::{connection::create_pool, DatabaseService},
    handlers::{callbacks, commands, messages},
    services::ServiceFactory,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting ChatWarden Telegram Bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = ChatWarden::database::connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: std::time::Duration::from_secs(30),
    };
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool);

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(bot.clone(), settings.clone(), database_service)?;
    services.settings_service.seed_defaults().await?;

    // Periodic cleanup: expired console sessions and stale join challenges
    spawn_cleanup_task(&services);

    info!("Setting up bot handlers...");
    let services_arc = Arc::new(services);

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![services_arc])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("ChatWarden bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("ChatWarden bot has been shut down.");

    Ok(())
}

/// Spawn the background cleanup loop
fn spawn_cleanup_task(services: &ServiceFactory) {
    let session_store = services.session_store.clone();
    let join_requests = services.database.join_requests.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;

            let dropped = session_store.cleanup_expired();
            if dropped > 0 {
                info!(dropped = dropped, "Dropped expired console sessions");
            }

            // Unanswered challenges expire after 24 hours
            let cutoff = chrono::Utc::now() - chrono::Duration::hours(24);
            match join_requests.delete_older_than(cutoff).await {
                Ok(0) => {}
                Ok(removed) => info!(removed = removed, "Dropped stale join challenges"),
                Err(e) => error!(error = %e, "Join challenge cleanup failed"),
            }
        }
    });
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<BotCommands>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle new chat members
                    dptree::filter(|msg: Message| msg.new_chat_members().is_some())
                        .endpoint(handle_new_members),
                )
                .branch(
                    // Handle regular messages
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries (console menus, verification taps)
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
        .branch(
            // Handle chat join requests (lockdown gate)
            Update::filter_chat_join_request().endpoint(handle_join_requests),
        )
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "ChatWarden Bot Commands")]
enum BotCommands {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Admin console (admin only)")]
    Admin,
    #[command(description = "Cancel the current console operation")]
    Cancel,
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    services: Arc<ServiceFactory>,
) -> HandlerResult {
    let services = (*services).clone();

    let result = match cmd {
        BotCommands::Start => commands::handle_start(bot, msg, services).await,
        BotCommands::Help => commands::handle_help(bot, msg).await,
        BotCommands::Admin => commands::handle_admin(bot, msg, services).await,
        BotCommands::Cancel => commands::handle_cancel(bot, msg, services).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = messages::handle_message(bot, msg, services).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle new chat members
async fn handle_new_members(bot: Bot, msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = messages::handle_new_chat_member(bot, msg, services).await {
        error!(error = %e, "Error handling new chat member");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    services: Arc<ServiceFactory>,
) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = callbacks::handle_callback_query(bot, query, services).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}

/// Handle chat join requests
async fn handle_join_requests(
    bot: Bot,
    request: teloxide::types::ChatJoinRequest,
    services: Arc<ServiceFactory>,
) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = messages::handle_chat_join_request(bot, request, services).await {
        error!(error = %e, "Error handling join request");
        return Err(e.into());
    }

    Ok(())
}
