use actix_web::{http::StatusCode, test, web, App};
use entity::user::Model as UserModel;
use hospital_backend::accounts::{create_user, NewUser};
use hospital_backend::config::AppConfig;
use hospital_backend::db::service::DbService;
use hospital_backend::services::AuthServices;
use std::sync::Arc;

pub struct TestClient {
    pub db: Arc<DbService>,
    pub config: AppConfig,
    pub auth: AuthServices,
}

impl TestClient {
    pub fn new(ctx: &super::TestContext) -> Self {
        TestClient {
            db: Arc::clone(&ctx.db),
            config: ctx.config.clone(),
            auth: ctx.auth.clone(),
        }
    }

    #[allow(dead_code)]
    pub fn with_auth_services(mut self, auth: AuthServices) -> Self {
        self.auth = auth;
        self
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
        let routes_config = self.config.clone();
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .configure(move |cfg| hospital_backend::routes::configure_routes(cfg, &routes_config))
    }

    /// Creates an account directly through the account manager, bypassing HTTP.
    #[allow(dead_code)]
    pub async fn create_test_user(&self, email: &str, password: &str) -> UserModel {
        create_user(
            self.db.as_ref(),
            &self.auth.hasher,
            NewUser::new(email, password).with_name("Test user"),
        )
        .await
        .expect("Failed to create test user")
    }

    /// Creates a user and logs them in, returning the user and bearer token.
    #[allow(dead_code)]
    pub async fn create_logged_in_user<S>(&self, app: &S, email: &str) -> (UserModel, String)
    where
        S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    {
        let user = self.create_test_user(email, "pasword221").await;

        let req = test::TestRequest::post()
            .uri("/users/token")
            .set_json(serde_json::json!({ "email": email, "password": "pasword221" }))
            .to_request();
        let resp = test::call_service(app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let token = body["token"].as_str().expect("token in response").to_string();
        (user, token)
    }
}
