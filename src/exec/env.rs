//! Child process environment

use std::collections::BTreeMap;

/// Environment variables by name
pub type Env = BTreeMap<String, String>;

/// Host variables a child always receives
pub const BASE_ENV_VARS: [&str; 16] = [
    "HOME",
    "PATH",
    "USER",
    "LANG",
    "LC_ALL",
    "TMPDIR",
    "TEMP",
    "TMP",
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "NO_PROXY",
    "http_proxy",
    "https_proxy",
    "no_proxy",
    "SYSTEMROOT",
    "PATHEXT",
];

/// pnpm cache and store locations, always passed through
const CACHE_VARS: [&str; 2] = ["NPM_CONFIG_CACHE", "npm_config_store"];

/// Registry credentials, only passed through when the policy exposes them
const AUTH_VARS: [&str; 2] = ["NPM_AUTH", "NPM_EMAIL"];

/// Allow-listed subset of the host environment
pub fn base_env(host: &Env) -> Env {
    BASE_ENV_VARS
        .iter()
        .filter_map(|name| host.get(*name).map(|value| (name.to_string(), value.clone())))
        .collect()
}

/// Overrides for a pnpm run; unset variables are left out
pub fn scoped_env(env: &Env, expose_all_env: bool) -> Env {
    let mut names: Vec<&str> = CACHE_VARS.to_vec();
    if expose_all_env {
        names.extend(AUTH_VARS);
    }
    names
        .into_iter()
        .filter_map(|name| env.get(name).map(|value| (name.to_string(), value.clone())))
        .collect()
}
