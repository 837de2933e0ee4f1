mod common;

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use common::{INDEX_HTML, TestServer};

const TOKEN_PATH: &str = "/auth/realms/interview/protocol/openid-connect/token";

#[tokio::test]
async fn login_returns_provider_token() {
	let provider = MockServer::start_async().await;
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("content-type", "application/x-www-form-urlencoded")
				.form_urlencoded_tuple("username", "alice")
				.form_urlencoded_tuple("password", "correct")
				.form_urlencoded_tuple("grant_type", "password")
				.form_urlencoded_tuple("client_id", "interview");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"abc123\",\"token_type\":\"bearer\",\"expires_in\":300}");
		})
		.await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) = server.post_json(r#"{"username":"alice","password":"correct"}"#).await;

	assert_eq!(status, 200);
	assert_eq!(body, json!({ "token": "abc123" }));

	mock.assert_async().await;
}

#[tokio::test]
async fn rejected_credentials_return_generic_error() {
	let provider = MockServer::start_async().await;
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"invalid_grant\",\"error_description\":\"Invalid user credentials\"}",
			);
		})
		.await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) = server.post_json(r#"{"username":"alice","password":"wrong"}"#).await;

	assert_eq!(status, 500);
	assert_eq!(body, json!({ "error": "Invalid Credentials" }));

	mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_provider_returns_generic_error() {
	let server = TestServer::start("http://127.0.0.1:1/token").await;
	let (status, body) = server.post_json(r#"{"username":"alice","password":"correct"}"#).await;

	assert_eq!(status, 500);
	assert_eq!(body, json!({ "error": "Error authenticating user" }));
}

#[tokio::test]
async fn form_encoded_login_is_forwarded() {
	let provider = MockServer::start_async().await;
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.form_urlencoded_tuple("username", "bob smith")
				.form_urlencoded_tuple("password", "p&ss=word");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"form-token\"}");
		})
		.await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) =
		server.post_form(&[("username", "bob smith"), ("password", "p&ss=word")]).await;

	assert_eq!(status, 200);
	assert_eq!(body, json!({ "token": "form-token" }));

	mock.assert_async().await;
}

#[tokio::test]
async fn missing_fields_are_forwarded_empty() {
	let provider = MockServer::start_async().await;
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.form_urlencoded_tuple("username", "")
				.form_urlencoded_tuple("password", "");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_request\"}");
		})
		.await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) = server.post_json("{}").await;

	assert_eq!(status, 500);
	assert_eq!(body, json!({ "error": "Invalid Credentials" }));

	mock.assert_async().await;
}

#[tokio::test]
async fn concurrent_logins_do_not_cross_contaminate() {
	let provider = MockServer::start_async().await;
	let alice = provider
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH).form_urlencoded_tuple("username", "alice");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"alice-token\"}");
		})
		.await;
	let bob = provider
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH).form_urlencoded_tuple("username", "bob");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"bob-token\"}");
		})
		.await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (first, second) = tokio::join!(
		server.post_json(r#"{"username":"alice","password":"a"}"#),
		server.post_json(r#"{"username":"bob","password":"b"}"#),
	);

	assert_eq!(first, (200, json!({ "token": "alice-token" })));
	assert_eq!(second, (200, json!({ "token": "bob-token" })));

	alice.assert_calls_async(1).await;
	bob.assert_calls_async(1).await;
}

#[tokio::test]
async fn get_login_serves_spa_without_exchange() {
	let provider = MockServer::start_async().await;
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"unused\"}");
		})
		.await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) = server.get_text("/login").await;

	assert_eq!(status, 200);
	assert_eq!(body, INDEX_HTML);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn malformed_body_is_rejected_without_exchange() {
	let provider = MockServer::start_async().await;
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"unused\"}");
		})
		.await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) = server.post_json("{\"username\":").await;

	assert_eq!(status, 400);
	assert!(body["error"].is_string());

	mock.assert_calls_async(0).await;
}

async fn provider_expecting<'a>(
	provider: &'a MockServer,
	username: &str,
	password: &str,
) -> Mock<'a> {
	provider
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.form_urlencoded_tuple("username", username)
				.form_urlencoded_tuple("password", password)
				.form_urlencoded_tuple("grant_type", "password")
				.form_urlencoded_tuple("client_id", "interview");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\"}");
		})
		.await
}

#[tokio::test]
async fn body_without_content_type_is_forwarded_empty() {
	let provider = MockServer::start_async().await;
	let mock = provider_expecting(&provider, "", "").await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) =
		server.post_raw(None, r#"{"username":"alice","password":"correct"}"#).await;

	assert_eq!(status, 500);
	assert_eq!(body, json!({ "error": "Invalid Credentials" }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn null_username_is_forwarded_empty() {
	let provider = MockServer::start_async().await;
	let mock = provider_expecting(&provider, "", "secret").await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) = server.post_json(r#"{"username":null,"password":"secret"}"#).await;

	assert_eq!(status, 500);
	assert_eq!(body, json!({ "error": "Invalid Credentials" }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn numeric_username_is_forwarded_as_text() {
	let provider = MockServer::start_async().await;
	let mock = provider_expecting(&provider, "12345", "").await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, body) = server.post_json(r#"{"username":12345}"#).await;

	assert_eq!(status, 500);
	assert_eq!(body, json!({ "error": "Invalid Credentials" }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn plain_text_body_is_forwarded_empty() {
	let provider = MockServer::start_async().await;
	let mock = provider_expecting(&provider, "", "").await;
	let server = TestServer::start(&provider.url(TOKEN_PATH)).await;
	let (status, _) = server.post_raw(Some("text/plain"), "alice:correct").await;

	assert_eq!(status, 500);

	mock.assert_calls_async(1).await;
}
