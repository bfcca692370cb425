use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "omen", version, about = "Omen guidance-card CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a card through the ritual (consumes one energy)
    Ritual {
        /// Narrow to a category (e.g. focus, clarity)
        #[arg(long)]
        intent: Option<String>,
        /// Narrow to a tone (e.g. soft, bold)
        #[arg(long)]
        tone: Option<String>,
        /// Restrict to packs (comma-separated ids)
        #[arg(long, value_delimiter = ',')]
        packs: Vec<String>,
        /// Question to record with the draw
        #[arg(long)]
        question: Option<String>,
    },
    /// Open a one- or three-card spread
    Spread {
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
    /// Show today's card and streak
    Daily,
    /// Browse and edit the journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Energy quota
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Daily reminder management
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
    /// Built-in card packs
    Packs {
        #[command(subcommand)]
        action: commands::packs::PacksAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Ritual {
            intent,
            tone,
            packs,
            question,
        } => commands::draw::run_ritual(intent, tone, packs, question),
        Commands::Spread { count } => commands::draw::run_spread(count),
        Commands::Daily => commands::daily::run(),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Energy { action } => commands::energy::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Remind { action } => commands::remind::run(action),
        Commands::Packs { action } => commands::packs::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
