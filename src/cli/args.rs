use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "zee", version, author, about = "Islamic utilities in the terminal: prayer times, qibla, zakat and the hijri date")]
pub struct Cli {
    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose the default city and hijri offset
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Show prayer times for a city or coordinates
    Times {
        /// City name (defaults to the configured city)
        city: Option<String>,
        #[command(flatten)]
        coords: CoordArgs,
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the qibla direction and distance to the Kaaba
    Qibla {
        /// City name (defaults to the configured city)
        city: Option<String>,
        #[command(flatten)]
        coords: CoordArgs,
    },
    /// Calculate zakat on a wealth breakdown
    Zakat(ZakatArgs),
    /// Show the approximate hijri date
    Hijri {
        /// Gregorian date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List the configured cities
    Cities,
    /// List notable Islamic events
    Events,
    /// Print a random Quran quote
    Quote,
    /// Record or list client status checks
    Status {
        #[command(subcommand)]
        action: StatusCommands,
    },
    /// Prayer-time cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct CoordArgs {
    /// Latitude in degrees (use with --lng instead of a city)
    #[arg(long, requires = "lng", conflicts_with = "city", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    /// Longitude in degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub struct ZakatArgs {
    #[arg(long, default_value_t = 0.0)]
    pub cash: f64,
    #[arg(long, default_value_t = 0.0)]
    pub savings: f64,
    /// Value of gold held
    #[arg(long, default_value_t = 0.0)]
    pub gold: f64,
    /// Value of silver held
    #[arg(long, default_value_t = 0.0)]
    pub silver: f64,
    /// Business assets
    #[arg(long, default_value_t = 0.0)]
    pub business: f64,
    #[arg(long, default_value_t = 0.0)]
    pub investments: f64,
    /// Debts due, deducted from total assets
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub debts: f64,
}

#[derive(Subcommand, Debug)]
pub enum StatusCommands {
    /// Record a status check for a client
    Ping {
        /// Client name
        client: String,
    },
    /// List recorded status checks
    List,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show how many days are cached
    Info,
    /// Drop every cached entry
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_coordinates_with_negative_values() {
        let cli = Cli::try_parse_from(["zee", "qibla", "--lat", "40.7128", "--lng", "-74.006"]).unwrap();
        match cli.command {
            Some(Commands::Qibla { city, coords }) => {
                assert!(city.is_none());
                assert_eq!(coords.lat, Some(40.7128));
                assert_eq!(coords.lng, Some(-74.006));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn lat_without_lng_is_rejected() {
        assert!(Cli::try_parse_from(["zee", "times", "--lat", "10"]).is_err());
        assert!(Cli::try_parse_from(["zee", "times", "Cairo", "--lat", "1", "--lng", "2"]).is_err());
    }

    #[test]
    fn parses_zakat_flags() {
        let cli = Cli::try_parse_from(["zee", "--json", "zakat", "--cash", "10000", "--debts", "3000"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Zakat(args)) => {
                assert_eq!(args.cash, 10000.0);
                assert_eq!(args.debts, 3000.0);
                assert_eq!(args.gold, 0.0);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
