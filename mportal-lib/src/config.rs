pub fn init() {
    dotenv::dotenv().ok();
}

pub fn get_env_var_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        log::warn!("{key} not found in environment, using default '{default}'");
        default.to_string()
    })
}
