/**
 * Get an environment variable or panic
 *
 * # Arguments
 * @param key: &str - The environment variable key
 *
 * # Returns
 * @return String - The value of the environment variable
 */
pub fn get_env_or_throw(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{} environment variable is not set", key))
}
