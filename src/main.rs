use config::{Config, Environment, File, FileFormat};
use product_admin::models::config::ServerConfig;
use product_admin::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config: ServerConfig = Config::builder()
        .set_default("address", "127.0.0.1")
        .map_err(std::io::Error::other)?
        .set_default("port", 8080)
        .map_err(std::io::Error::other)?
        .set_default("database_url", "product_admin.db")
        .map_err(std::io::Error::other)?
        .set_default("templates_dir", "templates/**/*.html")
        .map_err(std::io::Error::other)?
        .add_source(File::new("config", FileFormat::Yaml).required(false))
        .add_source(Environment::default().separator("__"))
        .build()
        .map_err(std::io::Error::other)?
        .try_deserialize()
        .map_err(std::io::Error::other)?;

    run(server_config).await
}
