use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use opkb::api::AppState;
use opkb::config::Config;
use opkb::entities::characters::{CharacterStatus, Role};
use opkb::entities::devil_fruits::{FruitStatus, FruitType};
use opkb::models::catalog::{
    ArcInput, CharacterInput, CrewInput, DevilFruitInput, EpisodeInput, HolderInput,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Bootstrap API key inserted by the users migration
const DEFAULT_API_KEY: &str = "opkb_default_api_key_please_rotate";

async fn spawn_app() -> (Arc<AppState>, Router) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = opkb::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    let router = opkb::api::router(state.clone()).await;
    (state, router)
}

fn arc_input(name: &str, start: i32, end: i32) -> ArcInput {
    ArcInput {
        name: name.to_string(),
        saga: "East Blue".to_string(),
        start_episode_number: start,
        end_episode_number: end,
        description: String::new(),
    }
}

fn character_input(name: &str, bounty: i64) -> CharacterInput {
    CharacterInput {
        name: name.to_string(),
        epithet: String::new(),
        role: Role::Pirate,
        bounty,
        origin: "East Blue".to_string(),
        status: CharacterStatus::Alive,
        first_appearance_episode_id: None,
        description: String::new(),
        image_url: String::new(),
    }
}

fn crew_input(name: &str, captain_id: Option<i32>) -> CrewInput {
    CrewInput {
        name: name.to_string(),
        ship_name: format!("{name} ship"),
        base_location: "Grand Line".to_string(),
        description: String::new(),
        captain_id,
    }
}

fn fruit_input(name: &str, fruit_type: FruitType, rarity: i32) -> DevilFruitInput {
    DevilFruitInput {
        name: name.to_string(),
        romanji: name.to_string(),
        fruit_type,
        ability: "Corps élastique".to_string(),
        weaknesses: "Eau de mer".to_string(),
        rarity,
        status: FruitStatus::Active,
        first_appearance_arc_id: None,
        description: String::new(),
    }
}

struct Scenario {
    luffy: i32,
    gomu: i32,
    crew: i32,
}

/// Luffy, captain of the Straw Hats, current holder of the Gomu Gomu no Mi.
async fn seed_luffy(state: &AppState) -> Scenario {
    let admin = state.admin_service();

    let arc = admin
        .create_arc(arc_input("Romance Dawn", 1, 3))
        .await
        .unwrap();
    let episode = admin
        .create_episode(EpisodeInput {
            number: 1,
            title: "Je suis Luffy !".to_string(),
            air_date: None,
            arc_id: Some(arc.id),
        })
        .await
        .unwrap();

    let mut luffy = character_input("Monkey D. Luffy", 3_000_000_000);
    luffy.first_appearance_episode_id = Some(episode.id);
    let luffy = admin.create_character(luffy).await.unwrap();

    let crew = admin
        .create_crew(crew_input("Équipage du Chapeau de Paille", Some(luffy.id)))
        .await
        .unwrap();
    admin.set_crew_members(crew.id, &[luffy.id]).await.unwrap();

    let gomu = admin
        .create_fruit(fruit_input("Gomu Gomu no Mi", FruitType::Paramecia, 3))
        .await
        .unwrap();
    admin
        .create_holder(HolderInput {
            devil_fruit_id: gomu.id,
            character_id: luffy.id,
            from_date: None,
            to_date: None,
            is_current: true,
        })
        .await
        .unwrap();

    Scenario {
        luffy: luffy.id,
        gomu: gomu.id,
        crew: crew.id,
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn admin_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Api-Key", DEFAULT_API_KEY)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_character_list_and_fruit_detail_shape() {
    let (state, app) = spawn_app().await;
    let ids = seed_luffy(&state).await;

    let (status, body) = get(&app, "/api/characters").await;
    assert_eq!(status, StatusCode::OK);
    let page = &body["data"];
    assert_eq!(page["count"], 1);
    assert_eq!(page["page"], 1);
    assert_eq!(page["total_pages"], 1);

    let luffy = &page["results"][0];
    assert_eq!(luffy["id"], ids.luffy);
    assert_eq!(luffy["name"], "Monkey D. Luffy");
    assert_eq!(luffy["role"], "PIRATE");
    assert_eq!(luffy["bounty"], 3_000_000_000_i64);
    assert_eq!(luffy["status"], "ALIVE");
    assert_eq!(luffy["crews"][0]["name"], "Équipage du Chapeau de Paille");
    assert_eq!(
        luffy["current_fruits"],
        json!([{ "id": ids.gomu, "name": "Gomu Gomu no Mi" }])
    );

    let (status, body) = get(&app, &format!("/api/fruits/{}", ids.gomu)).await;
    assert_eq!(status, StatusCode::OK);
    let fruit = &body["data"];
    assert_eq!(fruit["fruit_type"], "PARAMECIA");
    assert_eq!(fruit["rarity"], 3);
    assert_eq!(fruit["status"], "ACTIVE");
    assert!(fruit["first_appearance_arc"].is_null());
    assert_eq!(fruit["holders"].as_array().unwrap().len(), 1);
    assert_eq!(
        fruit["holders"][0]["character"],
        json!({ "id": ids.luffy, "name": "Monkey D. Luffy" })
    );
    assert_eq!(fruit["holders"][0]["is_current"], true);
    assert!(fruit["holders"][0]["from_date"].is_null());
}

#[tokio::test]
async fn test_character_and_crew_detail_shape() {
    let (state, app) = spawn_app().await;
    let ids = seed_luffy(&state).await;

    let (status, body) = get(&app, &format!("/api/characters/{}", ids.luffy)).await;
    assert_eq!(status, StatusCode::OK);
    let luffy = &body["data"];
    assert_eq!(
        luffy["first_appearance_episode"],
        json!({ "number": 1, "title": "Je suis Luffy !", "arc": "Romance Dawn" })
    );
    assert_eq!(luffy["crews"][0]["captain"]["name"], "Monkey D. Luffy");
    assert_eq!(luffy["fruits_history"][0]["devil_fruit"]["name"], "Gomu Gomu no Mi");
    assert_eq!(luffy["fruits_history"][0]["devil_fruit"]["fruit_type"], "PARAMECIA");

    let (status, body) = get(&app, &format!("/api/crews/{}", ids.crew)).await;
    assert_eq!(status, StatusCode::OK);
    let crew = &body["data"];
    assert_eq!(
        crew["captain"],
        json!({ "id": ids.luffy, "name": "Monkey D. Luffy" })
    );
    assert_eq!(
        crew["members"],
        json!([{ "id": ids.luffy, "name": "Monkey D. Luffy", "bounty": 3_000_000_000_i64 }])
    );
}

#[tokio::test]
async fn test_arc_default_ordering() {
    let (state, app) = spawn_app().await;
    let admin = state.admin_service();

    admin.create_arc(arc_input("Jaya", 144, 152)).await.unwrap();
    admin.create_arc(arc_input("Romance Dawn", 1, 3)).await.unwrap();
    admin.create_arc(arc_input("Alabasta", 62, 130)).await.unwrap();

    let (status, body) = get(&app, "/api/arcs").await;
    assert_eq!(status, StatusCode::OK);
    let starts: Vec<i64> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|arc| arc["start_episode_number"].as_i64().unwrap())
        .collect();
    assert_eq!(starts, vec![1, 62, 144]);

    let (_, body) = get(&app, "/api/arcs?ordering=-name").await;
    let names: Vec<&str> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|arc| arc["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Romance Dawn", "Jaya", "Alabasta"]);

    // Unknown ordering fields fall back to the default ordering.
    let (_, body) = get(&app, "/api/arcs?ordering=bogus").await;
    assert_eq!(body["data"]["results"][0]["name"], "Romance Dawn");
}

#[tokio::test]
async fn test_search_and_paging() {
    let (state, app) = spawn_app().await;
    seed_luffy(&state).await;
    state
        .admin_service()
        .create_character(character_input("Roronoa Zoro", 1_111_000_000))
        .await
        .unwrap();

    let (_, body) = get(&app, "/api/characters?search=LUF").await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["name"], "Monkey D. Luffy");

    let (_, body) = get(&app, "/api/characters?ordering=-bounty&page_size=1").await;
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(body["data"]["results"][0]["name"], "Monkey D. Luffy");

    let (_, body) = get(&app, "/api/characters?ordering=-bounty&page_size=1&page=2").await;
    assert_eq!(body["data"]["results"][0]["name"], "Roronoa Zoro");

    let (status, body) = get(&app, "/api/characters?page=9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid page.");
}

#[tokio::test]
async fn test_huge_page_is_invalid_page() {
    let (state, app) = spawn_app().await;
    seed_luffy(&state).await;

    let (status, body) = get(&app, &format!("/api/characters?page={}", u64::MAX)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid page.");

    let (status, _) = get(&app, "/api/characters?page=1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let (state, app) = spawn_app().await;
    seed_luffy(&state).await;

    let (_, body) = get(&app, "/api/characters?search=%25").await;
    assert_eq!(body["data"]["count"], 0);

    let (_, body) = get(&app, "/api/characters?search=_").await;
    assert_eq!(body["data"]["count"], 0);

    state
        .admin_service()
        .create_character(character_input("Mr. 100%_Man", 0))
        .await
        .unwrap();
    let (_, body) = get(&app, "/api/characters?search=%25_").await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["name"], "Mr. 100%_Man");
}

#[tokio::test]
async fn test_detail_not_found_and_bad_id() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/api/characters/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = get(&app, "/api/fruits/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_requires_api_key() {
    let (_, app) = spawn_app().await;
    let body = serde_json::to_string(&json!({ "name": "Zou" })).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/arcs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.clone()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/arcs")
                .header("X-Api-Key", "wrong-key")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.clone()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/arcs")
                .header(header::AUTHORIZATION, format!("Bearer {DEFAULT_API_KEY}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_returns_api_key() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": "admin", "password": "password" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["data"]["api_key"], DEFAULT_API_KEY);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": "admin", "password": "nope" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_validation_and_conflict() {
    let (_, app) = spawn_app().await;

    let fruit = json!({ "name": "Mera Mera no Mi", "ability": "Feu", "rarity": 6 });
    let response = app
        .clone()
        .oneshot(admin_request("POST", "/api/admin/fruits", &fruit))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("rarity:"));

    let fruit = json!({ "name": "Mera Mera no Mi", "ability": "Feu", "rarity": 5 });
    let response = app
        .clone()
        .oneshot(admin_request("POST", "/api/admin/fruits", &fruit))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(admin_request("POST", "/api/admin/fruits", &fruit))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let character = json!({ "name": "Ace", "bounty": -1 });
    let response = app
        .oneshot(admin_request("POST", "/api/admin/characters", &character))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inline_holder_takeover_over_http() {
    let (state, app) = spawn_app().await;
    let ids = seed_luffy(&state).await;
    let ace = state
        .admin_service()
        .create_character(character_input("Portgas D. Ace", 550_000_000))
        .await
        .unwrap();

    let holder = json!({ "character_id": ace.id, "is_current": true });
    let response = app
        .clone()
        .oneshot(admin_request(
            "POST",
            &format!("/api/admin/fruits/{}/holders", ids.gomu),
            &holder,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, body) = get(&app, &format!("/api/fruits/{}", ids.gomu)).await;
    let holders = body["data"]["holders"].as_array().unwrap();
    let current: Vec<&Value> = holders.iter().filter(|h| h["is_current"] == true).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0]["character"]["name"], "Portgas D. Ace");

    let holder = json!({ "is_current": true });
    let response = app
        .oneshot(admin_request(
            "POST",
            &format!("/api/admin/fruits/{}/holders", ids.gomu),
            &holder,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pdf_export_requires_exactly_one_id() {
    let (state, app) = spawn_app().await;
    let ids = seed_luffy(&state).await;
    let zoro = state
        .admin_service()
        .create_character(character_input("Roronoa Zoro", 1_111_000_000))
        .await
        .unwrap();

    for selection in [json!({ "ids": [] }), json!({ "ids": [ids.luffy, zoro.id] })] {
        let response = app
            .clone()
            .oneshot(admin_request(
                "POST",
                "/api/admin/characters/export/pdf",
                &selection,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_ne!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
    }

    let response = app
        .oneshot(admin_request(
            "POST",
            "/api/admin/characters/export/pdf",
            &json!({ "ids": [ids.luffy] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"character_Monkey_D._Luffy.pdf\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF-1.4"));
}

#[tokio::test]
async fn test_csv_export() {
    let (state, app) = spawn_app().await;
    let ids = seed_luffy(&state).await;

    let response = app
        .clone()
        .oneshot(admin_request(
            "POST",
            "/api/admin/characters/export/csv",
            &json!({ "ids": [ids.luffy] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"characters_export.csv\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Nom,Surnom,Rôle,Prime,Origine,Statut,Épisode première apparition")
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("Monkey D. Luffy,"));
    assert!(row.contains("Pirate"));

    let response = app
        .oneshot(admin_request(
            "POST",
            "/api/admin/fruits/export/csv",
            &json!({ "ids": [ids.gomu] }),
        ))
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("Nom,Romanji,Type,Capacité,Rareté,Statut,Arc première apparition"));
    assert!(text.contains("Gomu Gomu no Mi,Gomu Gomu no Mi,Paramecia,"));
}

#[tokio::test]
async fn test_dashboard_stats() {
    let (state, app) = spawn_app().await;
    let admin = state.admin_service();

    let mut member_ids = Vec::new();
    for i in 0..4 {
        let character = admin
            .create_character(character_input(&format!("Pirate {i}"), 0))
            .await
            .unwrap();
        member_ids.push(character.id);
    }

    let big = admin.create_crew(crew_input("Big", None)).await.unwrap();
    let alpha = admin.create_crew(crew_input("Alpha", None)).await.unwrap();
    let beta = admin.create_crew(crew_input("Beta", None)).await.unwrap();
    admin.set_crew_members(big.id, &member_ids[..3]).await.unwrap();
    admin.set_crew_members(alpha.id, &member_ids[3..]).await.unwrap();
    admin.set_crew_members(beta.id, &member_ids[..1]).await.unwrap();

    admin
        .create_fruit(fruit_input("Mera Mera no Mi", FruitType::Logia, 5))
        .await
        .unwrap();
    admin
        .create_fruit(fruit_input("Gomu Gomu no Mi", FruitType::Paramecia, 3))
        .await
        .unwrap();
    admin
        .create_fruit(fruit_input("Bara Bara no Mi", FruitType::Paramecia, 2))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/stats")
                .header("X-Api-Key", DEFAULT_API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    let stats = &body["data"];

    assert_eq!(
        stats["fruit_types"],
        json!([
            { "label": "Paramecia", "count": 2 },
            { "label": "Logia", "count": 1 },
        ])
    );
    assert_eq!(
        stats["top_crews"],
        json!([
            { "label": "Big", "count": 3 },
            { "label": "Alpha", "count": 1 },
            { "label": "Beta", "count": 1 },
        ])
    );
    assert_eq!(stats["totals"]["characters"], 4);
}
