use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io;

use employee_directory::config::Config;
use employee_directory::db::ConnectionFactory;
use employee_directory::handlers;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    // Connections are opened per request; the factory only holds the target.
    let factory = ConnectionFactory::new(&config);
    info!("Using database {}", factory.target());
    info!("Starting server at {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(factory.clone()))
            .configure(handlers::configure)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
