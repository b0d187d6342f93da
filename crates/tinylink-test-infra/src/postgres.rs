use crate::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const POSTGRES_PORT: u16 = 5432;
const READY_LINE: &str = "database system is ready to accept connections";

#[derive(Debug, Clone, TypedBuilder)]
pub struct PostgresConfig {
    #[builder(default = "tinylink".to_string(), setter(into))]
    database: String,
    #[builder(default = "tinylink".to_string(), setter(into))]
    user: String,
    #[builder(default = "tinylink".to_string(), setter(into))]
    password: String,
    #[builder(default = "16-alpine".to_string(), setter(into))]
    tag: String,
}

impl PostgresConfig {
    fn image(&self) -> GenericImage {
        // The entrypoint boots a socket-only server to run initdb, stops it
        // and then starts the real one. Both print the ready line: the first
        // on stderr, the second on stdout. Waiting on one of them is not
        // enough to know the TCP listener is up.
        GenericImage::new("postgres", self.tag.as_str())
            .with_exposed_port(POSTGRES_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_LINE))
            .with_wait_for(WaitFor::message_on_stdout(READY_LINE))
    }
}

/// Test fixture for a disposable PostgreSQL server.
///
/// `new` returns only after the post-initdb server accepts TCP connections,
/// so callers can connect once without polling. The container is removed
/// when the fixture is dropped.
pub struct PostgresServer {
    container: ContainerAsync<GenericImage>,
    config: PostgresConfig,
}

impl PostgresServer {
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        let container = config
            .image()
            .with_env_var("POSTGRES_DB", config.database.as_str())
            .with_env_var("POSTGRES_USER", config.user.as_str())
            .with_env_var("POSTGRES_PASSWORD", config.password.as_str())
            // throwaway data, no need to flush
            .with_cmd(["postgres", "-c", "fsync=off"])
            .start()
            .await?;

        Ok(Self { container, config })
    }

    /// `postgres://` URL reachable from the host running the tests.
    pub async fn database_url(&self) -> Result<String> {
        let host = self.container.get_host().await?;
        let port = self.container.get_host_port_ipv4(POSTGRES_PORT).await?;
        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.config.user, self.config.password, host, port, self.config.database
        ))
    }
}
