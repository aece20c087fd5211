use actix_web::{web, App};
use chrono::Duration;
use lantern_auth::{
    db::postgres_service::PostgresService,
    session::{SessionCoordinator, SessionPolicy},
    types::{error::AppError, user::DBUserCreate},
    utils::token::encrypt,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct TestClient {
    pub db: Arc<PostgresService>,
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient { db }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        self.create_app_with_policy(SessionPolicy {
            destroy_on_sign_out: true,
            keep_signed_ttl: Duration::days(30),
        })
    }

    #[allow(dead_code)]
    pub fn create_app_with_policy(
        &self,
        policy: SessionPolicy,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let coordinator = SessionCoordinator::new(Arc::clone(&self.db), policy);
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(coordinator))
            .configure(lantern_auth::routes::configure_routes)
    }

    #[allow(dead_code)]
    pub fn coordinator(&self, policy: SessionPolicy) -> SessionCoordinator {
        SessionCoordinator::new(Arc::clone(&self.db), policy)
    }

    pub async fn create_test_user(&self, phone: Option<String>) -> Result<TestUser, AppError> {
        let tag = Uuid::new_v4();
        let name = format!("user-{}", tag);
        let email = format!("user-{}@test.com", tag);
        let password = super::test_data::PASSWORD.to_string();
        let password_hash = encrypt(&password).expect("Failed to hash password");

        let id = self
            .db
            .create_user(DBUserCreate {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                first_name: None,
                last_name: None,
                birthday: None,
                password_hash,
            })
            .await?;

        Ok(TestUser {
            id,
            name,
            email,
            phone,
            password,
        })
    }
}
