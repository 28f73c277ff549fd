mod common;

use common::{context, features_section, legacy_catalog, start, StoreState, EMAIL, PASSWORD};
use content_admin::{create_handler, CommandHandler};
use serde_json::json;
use tempfile::TempDir;

async fn signed_in(handler: &CommandHandler) {
    let result = handler
        .handle_input(&format!("login {} {}", EMAIL, PASSWORD))
        .await;
    assert!(result.success, "login failed: {}", result.message);
}

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, value.to_string()).expect("write json");
    path.display().to_string()
}

#[actix_rt::test]
async fn builtin_commands_answer_without_a_store() {
    let store = start(StoreState::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));

    let version = handler.handle_input("version").await;
    assert!(version.success);
    assert!(version.message.contains("CONTENT ADMIN"));

    let help = handler.handle_input("help").await;
    assert!(help.success);
    for name in ["catalog", "home", "page", "upload", "login"] {
        assert!(help.message.contains(name), "help lacks {}", name);
    }

    let unknown = handler.handle_input("frobnicate").await;
    assert!(!unknown.success);

    let exit = handler.handle_input("exit").await;
    assert!(exit.success && exit.should_exit);
    assert!(!exit.message.contains("__EXIT__"));

    assert_eq!(store.requests(), 0);
}

#[actix_rt::test]
async fn login_and_whoami() {
    let store = start(StoreState::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));

    let anonymous = handler.handle_input("whoami").await;
    assert!(anonymous.success);
    assert!(!anonymous.message.contains(EMAIL));

    signed_in(&handler).await;
    let whoami = handler.handle_input("whoami").await;
    assert!(whoami.message.contains(EMAIL));

    let logout = handler.handle_input("logout").await;
    assert!(logout.success);
    assert!(!handler.handle_input("whoami").await.message.contains(EMAIL));
}

#[actix_rt::test]
async fn catalog_edit_and_save_flow() {
    let store = start(StoreState {
        catalogs: vec![legacy_catalog()],
        ..StoreState::default()
    })
    .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));

    let list = handler.handle_input("catalog list").await;
    assert!(list.success);
    assert!(list.message.contains("c1"));

    let set = handler
        .handle_input("catalog set c1 title en \"New title\"")
        .await;
    assert!(set.success, "{}", set.message);

    let unsaved = handler.handle_input("catalog save c1").await;
    assert!(!unsaved.success);
    assert!(store.state().writes.is_empty());

    signed_in(&handler).await;
    let lengths = handler.handle_input("catalog lengths c1 1 \"6, 8\"").await;
    assert!(lengths.success, "{}", lengths.message);
    let saved = handler.handle_input("catalog save c1").await;
    assert!(saved.success, "{}", saved.message);

    let stored = store.state().catalogs[0].clone();
    assert_eq!(stored["title"], json!({"de": "Titel", "en": "New title"}));
    assert_eq!(stored["variants"][0]["lengths"], json!(["6", "8"]));
    assert_eq!(stored["_id"], "c1");
}

#[actix_rt::test]
async fn invalid_home_section_file_is_not_sent() {
    let store = start(StoreState::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));
    signed_in(&handler).await;

    let file = write_json(
        &dir,
        "stats.json",
        &json!({"section": "stats-1", "type": "stats", "data": {"stats": []}}),
    );
    let before = store.requests();

    let check = handler.handle_input(&format!("home check {}", file)).await;
    assert!(!check.success);
    let save = handler.handle_input(&format!("home save {}", file)).await;
    assert!(!save.success);

    assert_eq!(store.requests(), before);
    assert!(store.state().writes.is_empty());
}

#[actix_rt::test]
async fn home_template_save_and_move() {
    let store = start(StoreState {
        home: vec![features_section("a", 1)],
        ..StoreState::default()
    })
    .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));
    signed_in(&handler).await;

    let template = handler.handle_input("home template about").await;
    assert!(template.success);
    let mut section: serde_json::Value =
        serde_json::from_str(&template.message).expect("template json");
    assert_eq!(section["order"], 2);
    assert_eq!(section["isActive"], true);

    section["data"]["about"] = json!({
        "title": {"de": "Über uns", "en": "About us"},
        "content": {"de": "Text", "en": "Text"},
        "image": "/uploads/team.jpg"
    });
    let id = section["section"].as_str().expect("id").to_string();
    let file = write_json(&dir, "about.json", &section);
    let saved = handler.handle_input(&format!("home save {}", file)).await;
    assert!(saved.success, "{}", saved.message);

    let moved = handler.handle_input(&format!("home move {} up", id)).await;
    assert!(moved.success, "{}", moved.message);
    let list = handler.handle_input("home list").await;
    let first = list.message.lines().nth(1).expect("first row");
    assert!(first.contains(&id), "{}", list.message);
}

#[actix_rt::test]
async fn home_defaults_print_the_empty_payload() {
    let store = start(StoreState::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));

    let stats = handler.handle_input("home defaults stats").await;
    assert!(stats.success, "{}", stats.message);
    let data: serde_json::Value = serde_json::from_str(&stats.message).expect("json");
    assert_eq!(data, json!({"stats": []}));

    let unknown = handler.handle_input("home defaults carousel").await;
    assert!(unknown.success, "{}", unknown.message);
    let data: serde_json::Value = serde_json::from_str(&unknown.message).expect("json");
    assert_eq!(data, json!({}));
    assert_eq!(store.requests(), 0);
}

#[actix_rt::test]
async fn page_edit_creates_missing_page() {
    let store = start(StoreState::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));
    signed_in(&handler).await;

    let list = handler.handle_input("page list").await;
    assert!(list.success);
    assert!(list.message.contains("datenschutz"));

    for line in [
        "page set impressum title en Imprint",
        "page set impressum content de \"Angaben gemäß § 5 TMG\"",
        "page save impressum",
    ] {
        let result = handler.handle_input(line).await;
        assert!(result.success, "{}: {}", line, result.message);
    }

    let stored = store.state().pages[0].clone();
    assert_eq!(stored["page"], "impressum");
    assert_eq!(stored["title"], json!({"de": "IMPRESSUM", "en": "Imprint"}));
    assert_eq!(stored["content"]["de"], "Angaben gemäß § 5 TMG");
}

#[actix_rt::test]
async fn upload_command_rejects_non_images() {
    let store = start(StoreState::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));
    signed_in(&handler).await;

    let doc = dir.path().join("notes.txt");
    std::fs::write(&doc, "hello").expect("file");
    let before = store.requests();
    let result = handler
        .handle_input(&format!("upload {}", doc.display()))
        .await;
    assert!(!result.success);
    assert_eq!(store.requests(), before);
}

#[actix_rt::test]
async fn apostrophes_and_quotes_reach_the_store_unchanged() {
    let store = start(StoreState {
        catalogs: vec![legacy_catalog()],
        ..StoreState::default()
    })
    .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let handler = create_handler(context(&store, &dir));
    signed_in(&handler).await;

    let typed = handler
        .handle_input("catalog set c1 title en Women's health products")
        .await;
    assert!(typed.success, "{}", typed.message);

    let argv: Vec<String> = [
        "catalog",
        "set",
        "c1",
        "name",
        "de",
        r#"Das "Original" von O'Neill"#,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let passed = handler.handle_args(&argv).await;
    assert!(passed.success, "{}", passed.message);

    let saved = handler.handle_input("catalog save c1").await;
    assert!(saved.success, "{}", saved.message);

    let stored = store.state().catalogs[0].clone();
    assert_eq!(stored["title"]["en"], "Women's health products");
    assert_eq!(stored["name"]["de"], r#"Das "Original" von O'Neill"#);
}
