use axum_test::TestServer;
use hbnb::web::router;

fn server() -> TestServer {
    TestServer::new(router()).unwrap()
}

#[tokio::test]
async fn test_hello_route() {
    let server = server();

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_text("Hello HBNB!");
}

#[tokio::test]
async fn test_hbnb_route() {
    let server = server();

    let response = server.get("/hbnb").await;
    response.assert_status_ok();
    response.assert_text("HBNB");

    let response = server.get("/hbnb/").await;
    response.assert_status_ok();
    response.assert_text("HBNB");
}

#[tokio::test]
async fn test_c_route_replaces_underscores() {
    let server = server();

    let response = server.get("/c/Mexico_city").await;

    response.assert_status_ok();
    response.assert_text("C Mexico city");
}

#[tokio::test]
async fn test_c_route_decodes_path() {
    let server = server();

    let response = server.get("/c/is%20fun").await;

    response.assert_status_ok();
    response.assert_text("C is fun");
}

#[tokio::test]
async fn test_python_route_default() {
    let server = server();

    let response = server.get("/python/").await;
    response.assert_status_ok();
    response.assert_text("Python is cool");

    let response = server.get("/python").await;
    response.assert_status_ok();
    response.assert_text("Python is cool");
}

#[tokio::test]
async fn test_python_route_with_text() {
    let server = server();

    let response = server.get("/python/is_magic").await;

    response.assert_status_ok();
    response.assert_text("Python is magic");
}

#[tokio::test]
async fn test_number_route() {
    let server = server();

    let response = server.get("/number/42").await;
    response.assert_status_ok();
    response.assert_text("42 is a number");

    let response = server.get("/number/42/").await;
    response.assert_status_ok();
    response.assert_text("42 is a number");
}

#[tokio::test]
async fn test_number_route_large_and_padded_integers() {
    let server = server();

    let response = server.get("/number/123456789012345678901234567890").await;
    response.assert_status_ok();
    response.assert_text("123456789012345678901234567890 is a number");

    let response = server.get("/number/007").await;
    response.assert_status_ok();
    response.assert_text("7 is a number");
}

#[tokio::test]
async fn test_number_route_rejects_non_integers() {
    let server = server();

    for path in ["/number/abc", "/number/-3", "/number/4.5"] {
        let response = server.get(path).await;
        response.assert_status_not_found();
    }
}

#[tokio::test]
async fn test_number_template_route() {
    let server = server();

    let response = server.get("/number_template/89").await;

    response.assert_status_ok();
    response.assert_header("content-type", "text/html; charset=utf-8");
    assert!(response.text().contains("<H1>Number: 89</H1>"));
}

#[tokio::test]
async fn test_number_template_rejects_non_integers() {
    let server = server();

    let response = server.get("/number_template/eighty").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_unknown_path() {
    let server = server();

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();
}
