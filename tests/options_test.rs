use pagesift::{analyze_html, ErrorKind, Options, Proxy, ProxyKind, ScoringOptions, DEFAULT_USER_AGENT};

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();
    assert_eq!(options.timeout_ms, 5000);
    assert_eq!(options.max_redirects, 30);
    assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
    assert!(options.proxy.is_none());
    assert!(!options.fallback_request);
    assert!(!options.return_source);
    assert_eq!(options.scoring, ScoringOptions::default());
    assert_eq!(options.scoring.limit, 20);
    assert!(options.validate().is_ok());
}

#[test]
fn default_user_agent_names_agent_and_contact() {
    assert!(DEFAULT_USER_AGENT.starts_with("pagesift/"));
    assert!(DEFAULT_USER_AGENT.contains("https://"));
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        fallback_request: true,
        proxy: Some(Proxy::socks5("127.0.0.1", 9050)),
        ..Options::default()
    };

    assert!(options.fallback_request);
    assert_eq!(options.timeout_ms, 5000);
    assert_eq!(options.proxy.as_ref().map(Proxy::address).as_deref(), Some("127.0.0.1:9050"));
}

#[test]
fn validate_rejects_unusable_values() {
    let cases = [
        Options { timeout_ms: 0, ..Options::default() },
        Options { user_agent: "  ".into(), ..Options::default() },
        Options {
            scoring: ScoringOptions { limit: 0, ..ScoringOptions::default() },
            ..Options::default()
        },
        Options {
            scoring: ScoringOptions { max_ngram: 0, ..ScoringOptions::default() },
            ..Options::default()
        },
    ];
    for options in cases {
        let err = options.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config, "{options:?}");
    }

    let mut options = Options::default();
    options.renderer.program = "".into();
    assert_eq!(options.validate().unwrap_err().kind(), ErrorKind::Config);
}

#[test]
fn proxy_parse_accepts_host_port() {
    let proxy = Proxy::parse("proxy.internal:1080").unwrap();
    assert_eq!(proxy.kind, ProxyKind::Socks5);
    assert_eq!(proxy.host, "proxy.internal");
    assert_eq!(proxy.port, 1080);
    assert_eq!(proxy.url(), "socks5://proxy.internal:1080");
}

#[test]
fn proxy_parse_rejects_malformed_input() {
    for input in ["proxy.internal", ":1080", "proxy.internal:port", "proxy.internal:70000"] {
        let err = Proxy::parse(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config, "input {input:?}");
    }
}

#[test]
fn options_deserialize_from_partial_json() {
    let options: Options = serde_json::from_str(
        r#"{"timeoutMs": 8000, "fallbackRequest": true, "proxy": {"host": "10.0.0.1", "port": 9050}}"#,
    )
    .unwrap();

    assert_eq!(options.timeout_ms, 8000);
    assert!(options.fallback_request);
    assert_eq!(options.max_redirects, 30);
    assert_eq!(options.proxy, Some(Proxy::socks5("10.0.0.1", 9050)));
}

#[tokio::test]
async fn scoring_limit_caps_relevance() {
    let html = "<html><body><p>alpha alpha beta beta gamma gamma delta delta</p></body></html>";
    let options = Options {
        scoring: ScoringOptions {
            limit: 2,
            ..ScoringOptions::default()
        },
        ..Options::default()
    };

    let result = analyze_html("https://example.com/", html, &options).await.unwrap();
    assert_eq!(result.relevance.len(), 2);
}
