use clap::Parser;
use addrnotes::cli::{
    handle_delete, handle_get, handle_init, handle_list, handle_serve, handle_set, Cli, Commands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // One-shot commands stay quiet unless asked; serve defaults to "info".
    if !matches!(cli.command, Commands::Serve(_)) {
        addrnotes::logging::init(cli.log_level.as_deref().unwrap_or("off"));
    }

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::Serve(args) => handle_serve(args, cli.db, cli.log_level).await,
        Commands::Set(args) => handle_set(args, cli.db).await,
        Commands::Get { addr, json } => handle_get(addr, json, cli.db).await,
        Commands::Delete { addr, json } => handle_delete(addr, json, cli.db).await,
        Commands::List { json } => handle_list(json, cli.db).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
