use adk_api::config::AdkEndpoints;
use adk_api::url::{health_url, run_url, session_url, DEFAULT_BASE_URL};
use adk_api::{normalize_base_url, AdkApiConfig};

#[test]
fn url_normalization_trims_trailing_slashes_and_blank_input() {
    assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
    assert_eq!(normalize_base_url("  https://agents.example/api//  "), "https://agents.example/api");
    assert_eq!(normalize_base_url("   "), DEFAULT_BASE_URL);
}

#[test]
fn url_default_endpoints_follow_backend_routes() {
    let config = AdkApiConfig::new("http://localhost:8000/api/");

    assert_eq!(
        session_url(&config, "3f2a"),
        "http://localhost:8000/api/apps/app/users/u_999/sessions/3f2a"
    );
    assert_eq!(run_url(&config), "http://localhost:8000/api/run_sse");
    assert_eq!(health_url(&config), "http://localhost:8000/api/docs");
}

#[test]
fn url_custom_endpoint_templates_are_substituted() {
    let config = AdkApiConfig::new("http://backend")
        .with_app_name("reports")
        .with_user_id("alice")
        .with_endpoints(AdkEndpoints {
            session: "/sessions/{session}?app={app}&user={user}".to_string(),
            run: "/messages".to_string(),
            health: "/health".to_string(),
        });

    assert_eq!(
        session_url(&config, "s-1"),
        "http://backend/sessions/s-1?app=reports&user=alice"
    );
    assert_eq!(run_url(&config), "http://backend/messages");
    assert_eq!(health_url(&config), "http://backend/health");
}

#[test]
fn url_session_segments_are_percent_encoded() {
    let config = AdkApiConfig::new("http://localhost:8000")
        .with_app_name("sales reports")
        .with_user_id("team/a?x=1");

    assert_eq!(
        session_url(&config, "s#1"),
        "http://localhost:8000/apps/sales%20reports/users/team%2Fa%3Fx%3D1/sessions/s%231"
    );
}
