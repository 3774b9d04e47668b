use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use passvault::cli::commands::generate::Exclusions;
use passvault::cli::{commands, output, Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref title,
            ref fields,
        } => commands::add::execute(&cli, title, fields),
        Commands::Edit {
            ref title,
            ref rename,
            password,
            ref fields,
        } => commands::edit::execute(&cli, title, rename.as_deref(), password, fields),
        Commands::Get { ref title, field } => commands::get::execute(&cli, title, field),
        Commands::List { ref search } => commands::list::execute(&cli, search.as_deref()),
        Commands::Delete { ref title, force } => commands::delete::execute(&cli, title, force),
        Commands::Duplicate {
            ref title,
            ref new_title,
        } => commands::duplicate::execute(&cli, title, new_title),
        Commands::Passwd => commands::passwd::execute(&cli),
        Commands::Generate {
            length,
            no_symbols,
            no_digits,
            no_uppercase,
        } => commands::generate::execute(
            &cli,
            length,
            Exclusions {
                symbols: no_symbols,
                digits: no_digits,
                uppercase: no_uppercase,
            },
        ),
        Commands::Due => commands::due::execute(&cli),
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays clean for `get` and `generate`.
/// Set `RUST_LOG=passvault=debug` to see them.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passvault=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}
