use actix_web::{web, App};
use async_trait::async_trait;
use ocr_auth::{
    auth::{hash_password, AuthGate, TokenService},
    db::postgres_service::PostgresService,
    ocr::{OcrBackend, OcrError},
    routes::ocr::UploadLimit,
    types::{error::AppError, user::{DBUserCreate, Principal}},
};
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret-integration-test";
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";
#[allow(dead_code)]
pub const TEST_UPLOAD_LIMIT: usize = 1024;

/// Stands in for poppler/tesseract. PDFs whose bytes start with `%PDF-TEXT:`
/// have a text layer (the rest of the bytes); other PDFs have none.
pub struct FakeOcr;

#[async_trait]
impl OcrBackend for FakeOcr {
    async fn text_layer(&self, pdf: &[u8]) -> Result<String, OcrError> {
        Ok(pdf
            .strip_prefix(b"%PDF-TEXT:")
            .map(|rest| String::from_utf8_lossy(rest).into_owned())
            .unwrap_or_default())
    }

    async fn rasterize_and_recognize(&self, _pdf: &[u8]) -> Result<String, OcrError> {
        Ok("text recognized from scanned pages".to_string())
    }

    async fn recognize_image(&self, _image: &[u8]) -> Result<String, OcrError> {
        Ok("text recognized from image".to_string())
    }
}

pub struct TestClient {
    pub db: Arc<PostgresService>,
    pub tokens: TokenService,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient {
            db,
            tokens: TokenService::new(TEST_SECRET).expect("Failed to build token service"),
        }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let backend: Arc<dyn OcrBackend> = Arc::new(FakeOcr);

        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(AuthGate::new(self.tokens.clone(), self.db.clone())))
            .app_data(web::Data::from(backend))
            .app_data(web::Data::new(UploadLimit(TEST_UPLOAD_LIMIT)))
            .configure(ocr_auth::routes::configure_routes)
    }

    /// Insert a user straight into the database and hand back a valid token.
    #[allow(dead_code)]
    pub async fn create_test_user(&self, username: &str) -> Result<(Principal, String), AppError> {
        let user = self.db.create_user(DBUserCreate {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD)?,
        }).await?;

        let access_token = self.tokens.issue(&user.id.to_string())?;

        Ok((Principal::from(user), access_token))
    }
}
