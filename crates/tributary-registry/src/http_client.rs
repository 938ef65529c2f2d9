//! Process-wide HTTP agent used to fetch remote package indexes.
//!
//! The CLI adjusts proxy, user agent and timeout once at startup through
//! [`configure_http_client`]; every fetch afterwards clones the same agent.

use std::{
    sync::{LazyLock, PoisonError, RwLock},
    time::Duration,
};

use ureq::{Agent, Proxy};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_agent: String,
    pub proxy: Option<Proxy>,
    /// Limit for a whole request, connection through body.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("tributary/", env!("CARGO_PKG_VERSION")).to_string(),
            proxy: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn build(&self) -> Agent {
        Agent::config_builder()
            .proxy(self.proxy.clone())
            .timeout_global(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .into()
    }
}

struct HttpClient {
    config: ClientConfig,
    agent: Agent,
}

impl HttpClient {
    fn new(config: ClientConfig) -> Self {
        let agent = config.build();
        Self {
            config,
            agent,
        }
    }
}

static CLIENT: LazyLock<RwLock<HttpClient>> =
    LazyLock::new(|| RwLock::new(HttpClient::new(ClientConfig::default())));

/// The shared agent. Cloning is cheap; clones share the connection pool.
pub fn agent() -> Agent {
    CLIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .agent
        .clone()
}

/// Applies `updater` to the current configuration and rebuilds the agent.
pub fn configure_http_client<F>(updater: F)
where
    F: FnOnce(&mut ClientConfig),
{
    let mut client = CLIENT.write().unwrap_or_else(PoisonError::into_inner);
    let mut config = client.config.clone();
    updater(&mut config);
    *client = HttpClient::new(config);
}
