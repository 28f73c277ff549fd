use content_admin::api::SessionRestore;
use content_admin::core::constants::PROMPT;
use content_admin::core::config::Config;
use content_admin::{create_handler, tc, AdminContext, CommandHandler, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_with_messages(false).await?;
    init_logger(&config.log_level);

    let (ctx, restore) = AdminContext::bootstrap(config).await?;
    if matches!(restore, SessionRestore::Expired) {
        eprintln!("{}", tc!("auth.session_expired", ""));
    }

    let handler = create_handler(ctx);
    let args: Vec<String> = std::env::args().skip(1).collect();

    if !args.is_empty() {
        let result = handler.handle_args(&args).await;
        println!("{}", result.message);
        if !result.success {
            std::process::exit(1);
        }
        return Ok(());
    }

    repl(&handler).await
}

fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filter) => builder.parse_filters(&filter),
        Err(_) => builder.parse_filters(level),
    };
    if let Err(e) = builder.format_timestamp_secs().try_init() {
        eprintln!("Logger setup failed: {}", e);
    }
}

async fn repl(handler: &CommandHandler) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = handler.handle_input(&line).await;
        if !result.message.is_empty() {
            println!("{}", result.message);
        }
        if result.should_exit {
            break;
        }
    }
    Ok(())
}
