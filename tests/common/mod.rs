use ocr_auth::db::postgres_service::PostgresService;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub mod client;

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let postgres = Postgres::default();
        let container = postgres.start().await.expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService")
        );

        TestContext {
            db,
            _container: container,
        }
    }
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use ocr_auth::types::user::{RLogin, RUserCreate};

    pub fn sample_user() -> RUserCreate {
        sample_user_named("ana", "ana@example.com")
    }

    pub fn sample_user_named(username: &str, email: &str) -> RUserCreate {
        RUserCreate {
            username: username.to_string(),
            email: email.to_string(),
            password: "correct-horse-battery-staple".to_string(),
        }
    }

    pub fn login(identifier: &str, password: &str) -> RLogin {
        RLogin {
            username: identifier.to_string(),
            password: password.to_string(),
        }
    }

    /// A `multipart/form-data` body with a single `file` part.
    pub fn multipart_file(file_name: &str, bytes: &[u8]) -> (String, Vec<u8>) {
        let boundary = "----ocr-auth-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        (format!("multipart/form-data; boundary={boundary}"), body)
    }
}
