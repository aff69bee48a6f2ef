use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "visitor-parking")]
#[command(about = "Manage visitor-parking reservations and favorites")]
pub struct CliArgs {
    #[arg(long, short, default_value = "parking.toml")]
    pub config: String,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show account details
    Account,
    /// List reservations
    Reservations,
    /// List parking history
    History {
        #[arg(long, default_value = "20")]
        limit: u32,
        #[arg(long, default_value = "0")]
        offset: u32,
    },
    /// List favorites
    Favorites,
    /// Create a reservation
    Reserve {
        #[arg(long)]
        name: String,
        #[arg(long)]
        plate: String,
        /// Start, e.g. 2025-03-01T10:00:00+01:00
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Move the end of a reservation
    Extend {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        end: String,
    },
    /// Delete a reservation
    Cancel {
        #[arg(long)]
        id: u64,
    },
    /// Add a favorite
    FavoriteAdd {
        #[arg(long)]
        name: String,
        #[arg(long)]
        plate: String,
    },
    /// Update a favorite
    FavoriteUpdate {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        plate: String,
    },
    /// Delete a favorite
    FavoriteRemove {
        #[arg(long)]
        id: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reserve_command() {
        let args = CliArgs::parse_from([
            "visitor-parking",
            "--config",
            "custom.toml",
            "reserve",
            "--name",
            "Oma",
            "--plate",
            "ab-123 cd",
            "--start",
            "2030-01-01T10:00:00Z",
            "--end",
            "2030-01-01T11:00:00Z",
        ]);

        assert_eq!(args.config, "custom.toml");
        match args.command {
            Command::Reserve { plate, .. } => assert_eq!(plate, "ab-123 cd"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_history_defaults() {
        let args = CliArgs::parse_from(["visitor-parking", "history"]);
        assert_eq!(args.config, "parking.toml");
        assert!(matches!(
            args.command,
            Command::History {
                limit: 20,
                offset: 0
            }
        ));
    }
}
