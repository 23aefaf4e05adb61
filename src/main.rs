use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use coffee_pos::config::ServerConfig;
use coffee_pos::db::{establish_connection_pool, run_migrations};
use coffee_pos::repository::DieselRepository;
use coffee_pos::routes::catalog::{
    add_category, add_product, list_categories, list_products, update_product,
};
use coffee_pos::routes::customers::{add_customer, verify_customer};
use coffee_pos::routes::members::{
    login, register, save_preference, show_member, show_preferences,
};
use coffee_pos::routes::orders::{checkout, list_orders, show_order};
use coffee_pos::routes::reports::{customers_report, products_report, sales_report};
use coffee_pos::routes::{json_error_handler, query_error_handler};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if server_config.admin_token.is_none() {
        log::warn!("ADMIN_TOKEN is not set; admin endpoints will refuse every request");
    }

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .service(list_products)
            .service(add_product)
            .service(update_product)
            .service(list_categories)
            .service(add_category)
            .service(add_customer)
            .service(verify_customer)
            .service(register)
            .service(login)
            .service(checkout)
            .service(list_orders)
            .service(show_order)
            .service(show_preferences)
            .service(save_preference)
            .service(show_member)
            .service(sales_report)
            .service(products_report)
            .service(customers_report)
    })
    .bind(bind_address)?
    .run()
    .await
}
