use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub grpc_port: u16,
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EventsConfig {
    /// Buffered seat-change events per subscriber before it starts lagging.
    pub channel_capacity: usize,
}

impl ServerConfig {
    pub fn grpc_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.grpc_port)
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(environment())
    }

    fn load_with(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.grpc_port", 50051)?
            .set_default("server.http_port", 8080)?
            .set_default("events.channel_capacity", 100)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment)
            .build()?;

        s.try_deserialize()
    }
}

/// `RAIL_` prefix, `__` between nesting levels. Eg. `RAIL_SERVER__GRPC_PORT=50052`
fn environment() -> config::Environment {
    config::Environment::with_prefix("RAIL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
