use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use log::error;

use employee_directory::config::Config;
use employee_directory::db::ConnectionFactory;
use employee_directory::ingest;

/// Load employee records from a CSV file into the Employees table.
#[derive(Parser, Debug)]
#[command(name = "ingest", version)]
struct Args {
    /// CSV file with a header row containing EmployeeID, FirstName, LastName, BirthDate, HireDate.
    #[arg(default_value = "MOCK_DATA.csv", env = "CSV_FILE")]
    csv_path: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let factory = ConnectionFactory::new(&config);

    match ingest::ingest(&factory, &args.csv_path).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error ingesting CSV data from {}: {}", args.csv_path.display(), err);
            ExitCode::FAILURE
        }
    }
}
