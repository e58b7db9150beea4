#![allow(dead_code)]

use employee_directory::config::Config;
use employee_directory::db::ConnectionFactory;

pub const SCHEMA: &str = include_str!("../../schema.sql");

// Nothing listens on port 1, so a connection attempt fails immediately.
pub fn unreachable_factory() -> ConnectionFactory {
    ConnectionFactory::new(&Config {
        driver: "postgres".to_string(),
        server: "127.0.0.1".to_string(),
        database: "hr".to_string(),
        user_name: "loader".to_string(),
        password: String::new(),
        port: 1,
        bind_addr: "127.0.0.1:0".to_string(),
    })
}

/// Factory for the live store described by `.env` / the environment.
/// Creates the Employees table when it does not exist yet.
pub async fn live_factory() -> ConnectionFactory {
    dotenv::dotenv().ok();
    let config = Config::from_env().expect("store-backed tests need DRIVER, SERVER, DATABASE, USER_NAME, PASSWORD");
    let factory = ConnectionFactory::new(&config);

    let mut conn = factory.open_connection().await.expect("store reachable");
    sqlx::query(SCHEMA).execute(&mut conn).await.expect("create Employees");
    employee_directory::db::close_connection(conn).await;
    factory
}

pub async fn remove_employees(factory: &ConnectionFactory, ids: &[i32]) {
    let mut conn = factory.open_connection().await.expect("store reachable");
    for id in ids {
        employee_directory::db::employee::delete_employee(&mut conn, *id)
            .await
            .expect("cleanup delete");
    }
    employee_directory::db::close_connection(conn).await;
}
