mod common;

use actix_web::{http::StatusCode, test};
use common::{client::{TestClient, TEST_UPLOAD_LIMIT}, test_data, TestContext};

fn upload(uri: &str, token: &str, file_name: &str, bytes: &[u8]) -> test::TestRequest {
    let (content_type, body) = test_data::multipart_file(file_name, bytes);
    test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
}

#[tokio::test]
async fn test_scan_flow_each_route_records_history() {
    println!("\n\n[+] Running test: test_scan_flow_each_route_records_history");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, token) = client.create_test_user("gina").await.expect("Failed creating a test user");

    let cases = [
        ("/ocr/simple-pdf", "a.pdf", b"%PDF-TEXT:hello layer".as_slice(), "hello layer", "simple_pdf"),
        ("/ocr/scanned-pdf", "b.pdf", b"%PDF-1.7".as_slice(), "text recognized from scanned pages", "scanned_pdf"),
        ("/ocr/image", "c.png", b"\x89PNG".as_slice(), "text recognized from image", "image"),
    ];

    for (uri, file_name, bytes, expected, _) in cases {
        println!("[>] Uploading {file_name} to {uri}");
        let resp = test::call_service(&app, upload(uri, &token, file_name, bytes).to_request()).await;
        println!("[<] Received response with status: {}", resp.status());
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["extracted_text"], expected);
        assert!(body.get("scan_type").is_none());
    }

    println!("[>] Checking history for user {}", user.id);
    let req = test::TestRequest::get()
        .uri("/history")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let history: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(history.len(), 3);

    // newest first
    for (record, (_, file_name, _, expected, scan_type)) in history.iter().zip(cases.iter().rev()) {
        assert_eq!(record["file_name"], *file_name);
        assert_eq!(record["scan_type"], *scan_type);
        assert_eq!(record["extracted_text"], *expected);
    }
    println!("[/] Test passed: Each scan route stored a history row.");
}

#[tokio::test]
async fn test_scan_flow_auto_detect() {
    println!("\n\n[+] Running test: test_scan_flow_auto_detect");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (_, token) = client.create_test_user("hank").await.expect("Failed creating a test user");

    let cases = [
        ("text.pdf", b"%PDF-TEXT:embedded".as_slice(), "simple_pdf"),
        ("scan.PDF", b"%PDF-1.4".as_slice(), "scanned_pdf"),
        ("photo.jpeg", b"\xff\xd8\xff".as_slice(), "image"),
    ];

    for (file_name, bytes, scan_type) in cases {
        println!("[>] Auto-detecting {file_name}");
        let resp = test::call_service(&app, upload("/ocr/auto-detect", &token, file_name, bytes).to_request()).await;
        println!("[<] Received response with status: {}", resp.status());
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["scan_type"], scan_type);
    }
    println!("[/] Test passed: Auto-detect picked the right path.");
}

#[tokio::test]
async fn test_scan_flow_rejects_bad_uploads() {
    println!("\n\n[+] Running test: test_scan_flow_rejects_bad_uploads");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, token) = client.create_test_user("iris").await.expect("Failed creating a test user");

    println!("[>] Uploading without a token");
    let (content_type, body) = test_data::multipart_file("a.png", b"\x89PNG");
    let req = test::TestRequest::post()
        .uri("/ocr/image")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    println!("[>] Uploading an empty file");
    let resp = test::call_service(&app, upload("/ocr/image", &token, "empty.png", b"").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    println!("[>] Uploading past the size limit");
    let big = vec![0u8; TEST_UPLOAD_LIMIT + 1];
    let resp = test::call_service(&app, upload("/ocr/image", &token, "big.png", &big).to_request()).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let stored = ctx.db.list_user_history(user.id).await.unwrap();
    assert!(stored.is_empty());
    println!("[/] Test passed: Bad uploads rejected and nothing recorded.");
}

#[tokio::test]
async fn test_history_flow_owner_scoping() {
    println!("\n\n[+] Running test: test_history_flow_owner_scoping");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (owner, owner_token) = client.create_test_user("jane").await.expect("Failed creating owner");
    let (_, other_token) = client.create_test_user("kyle").await.expect("Failed creating other user");

    let resp = test::call_service(&app, upload("/ocr/image", &owner_token, "mine.png", b"\x89PNG").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let record_id = ctx.db.list_user_history(owner.id).await.unwrap()[0].id;
    println!("[+] Owner has history record {record_id}");

    println!("[>] Other user lists history");
    let req = test::TestRequest::get()
        .uri("/history")
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    let history: Vec<serde_json::Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(history.is_empty());

    println!("[>] Other user tries to delete owner's record");
    let req = test::TestRequest::delete()
        .uri(&format!("/history/{record_id}"))
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    println!("[<] Received response with status: {}", resp.status());
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.db.list_user_history(owner.id).await.unwrap().len(), 1);

    println!("[>] Owner deletes own record");
    let req = test::TestRequest::delete()
        .uri(&format!("/history/{record_id}"))
        .insert_header(("Authorization", format!("Bearer {}", owner_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    println!("[<] Received response with status: {}", resp.status());
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Deleted successfully");
    assert!(ctx.db.list_user_history(owner.id).await.unwrap().is_empty());

    println!("[>] Deleting it again");
    let req = test::TestRequest::delete()
        .uri(&format!("/history/{record_id}"))
        .insert_header(("Authorization", format!("Bearer {}", owner_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    println!("[/] Test passed: History is scoped to its owner.");
}
