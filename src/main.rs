use clap::Parser;
use httpoll::cli::{check, handle_completions, handle_config_init, watch, Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Watch(args) => watch::run_watch(args).await,
        Commands::Check(args) => match check::run_check(args).await {
            Ok(true) => Ok(()),
            // Results are already printed; only the exit status reports the failure
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
