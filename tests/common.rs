use room_booking::{
    api::router::create_router,
    config::{hash_password, Config, Login},
    infra::factory::{build_state, load_templates},
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_PASSWORD: &str = "correct horse";
pub const STAFF_PASSWORD: &str = "battery staple";

pub struct AuthHeaders {
    pub session_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            port: 0,
            database_url: db_url.clone(),
            timezone: chrono_tz::UTC,
            lessons_per_day: 6,
            secure_cookies: false,
            session_secret: "integration-test-secret".to_string(),
            logins: vec![
                Login {
                    user: "admin".to_string(),
                    password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
                    admin: true,
                },
                Login {
                    user: "staff".to_string(),
                    password_hash: hash_password(STAFF_PASSWORD).unwrap(),
                    admin: false,
                },
            ],
        };

        let templates = load_templates().expect("Failed to load templates");
        let state = Arc::new(build_state(&config, pool.clone(), templates));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({ "user": username, "pass": password });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/ajax/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let session_cookie = cookies.iter()
            .find(|c| c.starts_with("session="))
            .unwrap_or_else(|| panic!("Login failed in test helper for {}", username));

        let start = "session=".len();
        let end = session_cookie.find(';').unwrap_or(session_cookie.len());
        let session_token = session_cookie[start..end].to_string();

        let body_json = json_body(response).await;
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders { session_token, csrf_token }
    }

    pub async fn admin(&self) -> AuthHeaders {
        self.login("admin", ADMIN_PASSWORD).await
    }

    pub async fn staff(&self) -> AuthHeaders {
        self.login("staff", STAFF_PASSWORD).await
    }

    pub async fn post_json(&self, uri: &str, auth: Option<&AuthHeaders>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("session={}", auth.session_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }

        let response = self.router.clone().oneshot(builder.body(Body::from(body.to_string())).unwrap()).await.unwrap();
        let status = response.status();
        if status != StatusCode::OK {
            return (status, Value::Null);
        }
        (status, json_body(response).await)
    }

    pub async fn get_page(&self, uri: &str, auth: Option<&AuthHeaders>) -> (StatusCode, String) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::COOKIE, format!("session={}", auth.session_token));
        }

        let response = self.router.clone().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    pub async fn add_room(&self, auth: &AuthHeaders, name: &str, capacity: i64) -> i64 {
        let (_, body) = self.post_json(
            "/ajax/add/room",
            Some(auth),
            serde_json::json!({ "name": name, "capacity": capacity }),
        ).await;
        assert_eq!(body["success"], 1, "add room failed: {}", body);
        body["roomID"].as_i64().unwrap()
    }

    pub async fn add_teacher(&self, auth: &AuthHeaders, title: &str, first: &str, last: &str) -> i64 {
        let (_, body) = self.post_json(
            "/ajax/add/teacher",
            Some(auth),
            serde_json::json!({ "title": title, "fName": first, "lName": last }),
        ).await;
        assert_eq!(body["success"], 1, "add teacher failed: {}", body);

        let teachers = self.state.teacher_repo.list_by_last_name().await.unwrap();
        teachers.iter()
            .filter(|t| t.last_name == last && t.first_name == first)
            .map(|t| t.id)
            .max()
            .unwrap()
    }
}

#[allow(dead_code)]
pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
