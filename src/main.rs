use clap::Parser;
use visitor_parking::utils::{logger, validation::Validate};
use visitor_parking::{CliArgs, ClientConfig, Command, ErrorCategory, ParkingClient, ParkingError};

async fn run(client: &ParkingClient, command: Command) -> visitor_parking::Result<serde_json::Value> {
    let value = match command {
        Command::Account => client.account().get_account().await?,
        Command::Reservations => serde_json::to_value(client.reservations().list().await?)?,
        Command::History { limit, offset } => {
            let paging = [
                ("x-data-limit".to_string(), limit.to_string()),
                ("x-data-offset".to_string(), offset.to_string()),
            ];
            serde_json::Value::Array(client.history().list(&paging).await?)
        }
        Command::Favorites => serde_json::Value::Array(client.favorites().list().await?),
        Command::Reserve {
            name,
            plate,
            start,
            end,
        } => {
            client
                .reservations()
                .create(&name, &plate, &start, &end)
                .await?
        }
        Command::Extend { id, end } => client.reservations().extend(id, &end).await?,
        Command::Cancel { id } => client.reservations().remove(id).await?,
        Command::FavoriteAdd { name, plate } => client.favorites().add(&name, &plate).await?,
        Command::FavoriteUpdate { id, name, plate } => {
            client.favorites().update(id, &name, &plate).await?
        }
        Command::FavoriteRemove { id } => client.favorites().remove(id).await?,
    };
    Ok(value)
}

fn exit_code(error: &ParkingError) -> i32 {
    match error.category() {
        ErrorCategory::Input => 2,
        ErrorCategory::Session => 3,
        ErrorCategory::Network => 4,
        ErrorCategory::Backend => 5,
        ErrorCategory::Configuration => 6,
        ErrorCategory::Internal => 1,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("CLI args: {:?}", args);

    let config = match ClientConfig::from_file(&args.config).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration from {} rejected: {}", args.config, e);
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
    };

    let client = ParkingClient::from_config(&config)?;

    match run(&client, args.command).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}
