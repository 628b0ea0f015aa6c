//! End-to-end flows through the router against an in-memory database

use pretty_assertions::assert_eq;
use substations::migrations::Migrator;
use substations::query::QuerySpec;
use substations::routes;
use substations::store::SubstationStore;
use substations::AppState;
use web::testing::TestDatabase;
use web::{FlashKey, HttpResponse, Request, Router, FLASH_COOKIE};

struct TestApp {
    _db: TestDatabase,
    router: Router<AppState>,
    state: AppState,
}

impl TestApp {
    async fn new() -> Self {
        let db = TestDatabase::fresh::<Migrator>().await.unwrap();
        let store = SubstationStore::new(db.connection().clone());
        let state = AppState::new(store, FlashKey::new("test-key"), "Registry");
        Self {
            _db: db,
            router: routes::register(),
            state,
        }
    }

    async fn send(&self, req: Request) -> HttpResponse {
        self.router.dispatch(req, self.state.clone()).await
    }

    async fn get(&self, uri: &str) -> HttpResponse {
        self.send(Request::builder().get(uri).build()).await
    }

    async fn post(&self, uri: &str, fields: &[(&str, &str)]) -> HttpResponse {
        self.send(Request::builder().post(uri).form(fields).build())
            .await
    }

    async fn breakers(&self, spec: QuerySpec) -> Vec<(i32, String)> {
        self.state
            .store
            .list_filtered(&spec)
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.id, r.breaker_name))
            .collect()
    }
}

fn record<'a>(name: &'a str, breaker: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("substation_name", name),
        ("full_name", ""),
        ("p_number", ""),
        ("breaker_name", breaker),
        ("feeding_station_details", "Line 1"),
        ("bay_name", "Bay1"),
    ]
}

#[tokio::test]
async fn create_reject_edit_and_filter() {
    let app = TestApp::new().await;

    let created = app.post("/create", &record("Substation A", "B1")).await;
    assert_eq!(created.status_code(), 302);
    assert_eq!(created.header_value("location"), Some("/"));

    let duplicate = app.post("/create", &record("Substation B", "B1")).await;
    assert_eq!(duplicate.status_code(), 422);
    assert!(duplicate
        .body()
        .contains("Breaker Name already exists! Please use a different one."));
    assert_eq!(app.state.store.count().await.unwrap(), 1);

    let edited = app.post("/1/edit", &record("Substation A", "B2")).await;
    assert_eq!(edited.status_code(), 302);

    assert!(app.breakers(QuerySpec::Breaker("B1".into())).await.is_empty());
    assert_eq!(
        app.breakers(QuerySpec::Breaker("B2".into())).await,
        vec![(1, "B2".to_string())]
    );

    let listed = app.get("/?breaker_name=B2").await;
    assert_eq!(listed.status_code(), 200);
    assert!(listed.body().contains("href=\"/1/edit\""));
    assert!(!app.get("/?breaker_name=B1").await.body().contains("/1/edit"));
}

#[tokio::test]
async fn create_sets_flash_that_the_list_shows_once() {
    let app = TestApp::new().await;

    let created = app.post("/create", &record("Substation A", "B1")).await;
    let cookie = created.header_value("set-cookie").unwrap();
    let value = cookie
        .strip_prefix("flash=")
        .and_then(|rest| rest.split(';').next())
        .unwrap();

    let listed = app
        .send(Request::builder().get("/").cookie(FLASH_COOKIE, value).build())
        .await;
    assert!(listed.body().contains("Substation created successfully!"));
    assert!(listed.header_value("set-cookie").unwrap().contains("Max-Age=0"));

    let forged = app
        .send(Request::builder().get("/").cookie(FLASH_COOKIE, "abc.def").build())
        .await;
    assert!(!forged.body().contains("class=\"flash "));
}

#[tokio::test]
async fn missing_required_fields_keep_input_and_persist_nothing() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/create",
            &[("substation_name", "Kept"), ("breaker_name", "  ")],
        )
        .await;

    assert_eq!(response.status_code(), 422);
    let body = response.body();
    assert!(body.contains("All required fields must be filled!"));
    assert!(body.contains("Breaker name is required."));
    assert!(body.contains("Feeding station details are required."));
    assert!(body.contains("Bay name is required."));
    assert!(body.contains("value=\"Kept\""));
    assert_eq!(app.state.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn edit_to_taken_breaker_leaves_record_unchanged() {
    let app = TestApp::new().await;
    app.post("/create", &record("Substation A", "B1")).await;
    app.post("/create", &record("Substation B", "B2")).await;

    let response = app.post("/2/edit", &record("Substation B renamed", "B1")).await;
    assert_eq!(response.status_code(), 422);

    let unchanged = app.state.store.get_by_id(2).await.unwrap();
    assert_eq!(unchanged.substation_name, "Substation B");
    assert_eq!(unchanged.breaker_name, "B2");

    // Keeping its own breaker name is not a conflict
    let same = app.post("/2/edit", &record("Substation B renamed", "B2")).await;
    assert_eq!(same.status_code(), 302);
}

#[tokio::test]
async fn edit_form_and_missing_ids() {
    let app = TestApp::new().await;
    app.post("/create", &record("Substation A", "B1")).await;

    let form = app.get("/1/edit").await;
    assert_eq!(form.status_code(), 200);
    assert!(form.body().contains("action=\"/1/edit\""));

    assert_eq!(app.get("/99/edit").await.status_code(), 404);
    assert_eq!(app.get("/abc/edit").await.status_code(), 404);
    assert_eq!(
        app.post("/99/edit", &record("X", "B9")).await.status_code(),
        404
    );
}

#[tokio::test]
async fn delete_removes_record_and_missing_id_is_404() {
    let app = TestApp::new().await;
    app.post("/create", &record("Substation A", "B1")).await;

    let missing = app.post("/42/delete", &[]).await;
    assert_eq!(missing.status_code(), 404);
    assert_eq!(app.state.store.count().await.unwrap(), 1);

    let deleted = app.post("/1/delete", &[]).await;
    assert_eq!(deleted.status_code(), 302);
    assert_eq!(app.state.store.count().await.unwrap(), 0);

    assert_eq!(app.get("/1/delete").await.status_code(), 405);
}

#[tokio::test]
async fn name_filter_matches_substrings() {
    let app = TestApp::new().await;
    app.post("/create", &record("North Yard", "B1")).await;
    app.post("/create", &record("South Yard", "B2")).await;
    app.post("/create", &record("Northgate", "B3")).await;

    assert_eq!(
        app.breakers(QuerySpec::Name("North".into())).await,
        vec![(1, "B1".to_string()), (3, "B3".to_string())]
    );
    assert_eq!(app.breakers(QuerySpec::All).await.len(), 3);

    let page = app.get("/?substation_name=Yard&breaker_name=B2").await;
    assert!(page.body().contains("South Yard"));
    assert!(!page.body().contains("North Yard"));
}

#[tokio::test]
async fn concurrent_creates_with_one_breaker_keep_it_unique() {
    let app = TestApp::new().await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        let router = routes::register();
        let state = app.state.clone();
        tasks.push(tokio::spawn(async move {
            let name = format!("Substation {}", i);
            let req = Request::builder()
                .post("/create")
                .form(&record(&name, "SHARED"))
                .build();
            router.dispatch(req, state).await.status_code()
        }));
    }

    let mut statuses = Vec::new();
    for task in tasks {
        statuses.push(task.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == 302).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == 422).count(), 7);
    assert_eq!(
        app.breakers(QuerySpec::Breaker("SHARED".into())).await.len(),
        1
    );
}
