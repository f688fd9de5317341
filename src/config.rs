use dotenv::dotenv;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_server() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:3000/api/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn from_env() -> Result<Config, envy::Error> {
        dotenv().ok();
        envy::from_env::<Config>()
    }
}

lazy_static! {
    pub static ref CONFIG: Config = get_config();
}

fn get_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(error) => panic!("Configuration Error: {:#?}", error),
    }
}
