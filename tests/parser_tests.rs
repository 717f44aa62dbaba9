/// Integration tests for the input parsers
/// Tests cURL commands, raw HTTP requests and Burp XML exports
use base64::{engine::general_purpose, Engine as _};
use req2postman::error::{ConvertError, ErrorCategory};
use req2postman::models::{AuthScheme, InputParser, Language, Position, QueryParam};
use req2postman::parsers::burp::{convert_items, BurpItems, BurpRawItem, BurpXmlParser};
use req2postman::parsers::curl::{parse_curl_command, parse_curl_commands, CurlFileParser};
use req2postman::parsers::raw_http::parse_raw_request;
use std::fs;

// ---------------------------------------------------------------- cURL

#[test]
fn test_curl_full_command() {
    let line = r#"curl -X POST -H "Content-Type: application/json" -d "{\"a\":1}" "https://api.example.com/v1/widgets?x=1""#;
    let request = parse_curl_command(line, 1);

    assert_eq!(request.method, "POST");
    assert_eq!(request.url.raw, "https://api.example.com/v1/widgets?x=1");
    assert_eq!(request.url.protocol, "https");
    assert_eq!(request.url.host_labels, vec!["api", "example", "com"]);
    assert_eq!(request.url.path_segments, vec!["v1", "widgets"]);
    assert_eq!(request.url.query_params, vec![QueryParam::new("x", "1")]);
    assert_eq!(request.name, "POST widgets");

    let body = request.body.expect("body should be captured from -d");
    assert_eq!(body.mode, "raw");
    assert_eq!(body.raw, r#"{"a":1}"#);
    assert_eq!(body.language, Language::Json);

    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.headers[0].key, "Content-Type");
    assert_eq!(request.headers[0].value, "application/json");
    assert_eq!(request.headers[0].kind, "text");
    assert!(request.auth.is_none());
}

#[test]
fn test_curl_defaults_to_get_and_root_name() {
    let request = parse_curl_command("curl https://example.com/", 4);

    assert_eq!(request.method, "GET");
    assert_eq!(request.url.raw, "https://example.com/");
    assert_eq!(request.url.host_labels, vec!["example", "com"]);
    assert!(request.url.path_segments.is_empty(), "trailing slash adds no segment");
    assert!(request.url.query_params.is_empty());
    assert_eq!(request.name, "GET root");
    assert!(request.body.is_none());
}

#[test]
fn test_curl_without_url_uses_index_name() {
    let request = parse_curl_command("curl -X DELETE -H 'Accept: */*'", 3);

    assert_eq!(request.method, "DELETE");
    assert_eq!(request.name, "Request 3");
    assert_eq!(request.url.raw, "");
    assert!(request.url.host_labels.is_empty());
    assert_eq!(request.headers.len(), 1);
}

#[test]
fn test_curl_quoted_method() {
    let request = parse_curl_command("curl -X 'PUT' https://api.test/items/7", 1);
    assert_eq!(request.method, "PUT");
    assert_eq!(request.name, "PUT 7");
}

#[test]
fn test_curl_bearer_auth() {
    let request = parse_curl_command("curl -H 'Authorization: Bearer abc123' https://api.test/me", 1);

    let auth = request.auth.expect("bearer auth should be extracted");
    assert_eq!(auth.scheme, AuthScheme::Bearer);
    assert_eq!(auth.detail.key, "token");
    assert_eq!(auth.detail.value, "abc123");
    assert_eq!(auth.detail.kind, "string");
    // The header itself is kept
    assert_eq!(request.headers[0].value, "Bearer abc123");
}

#[test]
fn test_curl_basic_auth_and_cookie() {
    let line = r#"curl -H "Authorization: Basic xyz==" -b "session=1; theme=dark" "http://h.test/a/b""#;
    let request = parse_curl_command(line, 1);

    let auth = request.auth.expect("basic auth should be extracted");
    assert_eq!(auth.scheme, AuthScheme::Basic);
    assert_eq!(auth.detail.key, "password");
    assert_eq!(auth.detail.value, "xyz==");

    let keys: Vec<&str> = request.headers.iter().map(|h| h.key.as_str()).collect();
    assert_eq!(keys, vec!["Authorization", "Cookie"]);
    assert_eq!(request.headers[1].value, "session=1; theme=dark");
    assert_eq!(request.url.protocol, "http");
}

#[test]
fn test_curl_last_authorization_header_wins() {
    let line = r#"curl -H "Authorization: Bearer one" -H "Authorization: Bearer two" https://a.test/x"#;
    let request = parse_curl_command(line, 1);

    assert_eq!(request.headers.len(), 2, "duplicate headers are not merged");
    assert_eq!(request.auth.unwrap().detail.value, "two");
}

#[test]
fn test_curl_unknown_auth_scheme_keeps_header_only() {
    let request = parse_curl_command(r#"curl -H "Authorization: Digest abc" https://a.test/x"#, 1);
    assert!(request.auth.is_none());
    assert_eq!(request.headers.len(), 1);
}

#[test]
fn test_curl_data_flag_priority() {
    let request = parse_curl_command("curl --data 'second' -d 'first' https://h.test/x", 1);
    assert_eq!(request.body.unwrap().raw, "first", "-d is checked before --data");

    let request = parse_curl_command("curl --data-raw 'raw' https://h.test/x", 1);
    let body = request.body.unwrap();
    assert_eq!(body.raw, "raw");
    assert_eq!(body.language, Language::Json, "cURL bodies are always tagged json");
}

#[test]
fn test_curl_header_trimming_and_colonless_header() {
    let request = parse_curl_command(r#"curl -H "  X-Trace :  abc  " -H "NoColon" https://h.test/"#, 1);
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.headers[0].key, "X-Trace");
    assert_eq!(request.headers[0].value, "abc");
}

#[test]
fn test_curl_file_counts_only_curl_lines() {
    let content = "# exported commands\ncurl https://a.test/one\n\ncurl -X DELETE\ncurl https://b.test/\n";
    let outcome = parse_curl_commands(content);

    assert!(outcome.warnings.is_empty());
    let names: Vec<&str> = outcome.requests.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["GET one", "Request 2", "GET root"]);
}

#[test]
fn test_curl_url_quotes_must_pair() {
    let request = parse_curl_command(r#"curl "https://h.test/o'brien""#, 1);
    assert_eq!(request.url.raw, "https://h.test/o'brien");
    assert_eq!(request.name, "GET o'brien");

    let request = parse_curl_command("curl -X PUT 'https://h.test/say\"hi\"'", 2);
    assert_eq!(request.url.raw, "https://h.test/say\"hi\"");
    assert_eq!(request.method, "PUT");
}

#[test]
fn test_curl_file_tolerates_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("commands.txt");
    fs::write(
        &path,
        b"curl https://a.test/one\n# caf\xE9\ncurl https://a.test/two\n".as_slice(),
    )
    .unwrap();

    let outcome = CurlFileParser.parse(&path).expect("a Latin-1 byte is not an IO failure");
    let names: Vec<&str> = outcome.requests.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["GET one", "GET two"]);
}

// ---------------------------------------------------------------- raw HTTP

#[test]
fn test_raw_get_with_host_header() {
    let text = "GET /api/v1/users?id=5&flag HTTP/1.1\r\nHost: api.example.com\r\nAccept: */*\r\n\r\n";
    let request = parse_raw_request(text, 1, "GET placeholder").expect("request should parse");

    assert_eq!(request.method, "GET");
    assert_eq!(request.url.raw, "https://api.example.com/api/v1/users?id=5&flag");
    assert_eq!(request.url.protocol, "https");
    assert_eq!(request.url.host_labels, vec!["api", "example", "com"]);
    assert_eq!(request.url.path_segments, vec!["api", "v1", "users"]);
    assert_eq!(
        request.url.query_params,
        vec![QueryParam::new("id", "5"), QueryParam::new("flag", "")]
    );
    assert_eq!(request.name, "GET users");
    assert_eq!(request.headers.len(), 2);
    assert!(request.body.is_none(), "trailing blank line is not a body");
}

#[test]
fn test_raw_target_without_query_has_no_params() {
    let request = parse_raw_request("GET /plain HTTP/1.1\nHost: h.test\n\n", 1, "x").unwrap();
    assert!(request.url.query_params.is_empty());
    assert_eq!(request.url.raw, "https://h.test/plain");
}

#[test]
fn test_raw_body_classified_by_content_type() {
    let cases = [
        ("application/json; charset=utf-8", Language::Json),
        ("application/xml", Language::Xml),
        ("application/javascript", Language::Javascript),
        ("text/html", Language::Html),
        ("application/x-www-form-urlencoded", Language::Text),
    ];
    for (content_type, expected) in cases {
        let text = format!(
            "POST /items HTTP/1.1\nHost: h.test\nContent-Type: {}\n\n{{\"name\":\"x\"}}",
            content_type
        );
        let request = parse_raw_request(&text, 1, "n").unwrap();
        let body = request.body.expect("body should be present");
        assert_eq!(body.raw, "{\"name\":\"x\"}");
        assert_eq!(body.language, expected, "content type {}", content_type);
    }
}

#[test]
fn test_raw_body_without_content_type_is_text() {
    let request = parse_raw_request("POST /a HTTP/1.1\nHost: h.test\n\nline one\nline two", 1, "n").unwrap();
    let body = request.body.unwrap();
    assert_eq!(body.raw, "line one\nline two");
    assert_eq!(body.language, Language::Text);
}

#[test]
fn test_raw_absolute_target_overrides_host() {
    let text = "GET http://proxy.example.com/path/to HTTP/1.1\nHost: other.test\n\n";
    let request = parse_raw_request(text, 1, "n").unwrap();

    assert_eq!(request.url.protocol, "http");
    assert_eq!(request.url.host_labels, vec!["proxy", "example", "com"]);
    assert_eq!(request.url.raw, "http://proxy.example.com/path/to");
    assert_eq!(request.name, "GET to");
}

#[test]
fn test_raw_scheme_inside_query_value_is_treated_as_absolute() {
    // The scheme check is a substring test, so a URL inside a query value
    // switches to absolute handling and the Host header is discarded.
    let text = "GET /redirect?next=https://evil.test/x HTTP/1.1\nHost: app.test\n\n";
    let request = parse_raw_request(text, 1, "n").unwrap();

    assert_eq!(request.url.protocol, "https");
    assert_eq!(request.url.host_labels, vec![""]);
    assert_eq!(request.url.path_segments, vec!["redirect"]);
    assert_eq!(
        request.url.query_params,
        vec![QueryParam::new("next", "https://evil.test/x")]
    );
    assert_eq!(request.url.raw, "https:///redirect?next=https://evil.test/x");
}

#[test]
fn test_raw_name_precedence() {
    let request = parse_raw_request("GET / HTTP/1.1\nHost: example.org\n\n", 1, "GET supplied").unwrap();
    assert_eq!(request.name, "GET example.org", "computed name wins when a host is known");

    let request = parse_raw_request("GET / HTTP/1.1\n\n", 1, "GET supplied").unwrap();
    assert_eq!(request.name, "GET supplied", "supplied name kept without host or path");
}

#[test]
fn test_raw_auth_and_duplicate_headers() {
    let text = "GET /me HTTP/1.1\nhost: h.test\nAuthorization: Basic dTpw\nX-A: 1\nX-A: 2\n\n";
    let request = parse_raw_request(text, 1, "n").unwrap();

    assert_eq!(request.url.host_labels, vec!["h", "test"], "host header match ignores case");
    let auth = request.auth.unwrap();
    assert_eq!(auth.scheme, AuthScheme::Basic);
    assert_eq!(auth.detail.value, "dTpw");
    assert_eq!(request.headers.iter().filter(|h| h.key == "X-A").count(), 2);
}

#[test]
fn test_raw_errors() {
    assert!(matches!(parse_raw_request("", 1, "n"), Err(ConvertError::EmptyRequest)));

    match parse_raw_request("GARBAGE\nHost: x", 1, "n") {
        Err(ConvertError::InvalidRequestLine(line)) => assert_eq!(line, "GARBAGE"),
        other => panic!("expected invalid request line, got {:?}", other),
    }
}

// ---------------------------------------------------------------- Burp XML

fn encode(text: &str) -> String {
    general_purpose::STANDARD.encode(text)
}

fn burp_export(items: &[String]) -> String {
    format!(
        r#"<?xml version="1.0"?>
<!DOCTYPE items [
<!ELEMENT items (item*)>
<!ATTLIST items burpVersion CDATA "">
<!ATTLIST items exportTime CDATA "">
]>
<items burpVersion="2023.10.3.4" exportTime="Mon Oct 30 10:00:00 UTC 2023">
{}
</items>
"#,
        items.join("\n")
    )
}

fn burp_item(method: &str, path: &str, url: &str, base64: bool, request: &str) -> String {
    format!(
        r#"  <item>
    <time>Mon Oct 30 10:00:00 UTC 2023</time>
    <url><![CDATA[{url}]]></url>
    <host ip="93.184.216.34">api.example.com</host>
    <port>443</port>
    <protocol>https</protocol>
    <method><![CDATA[{method}]]></method>
    <path><![CDATA[{path}]]></path>
    <extension>null</extension>
    <request base64="{base64}"><![CDATA[{request}]]></request>
    <status>200</status>
    <responselength>2</responselength>
    <mimetype>JSON</mimetype>
    <response base64="true"><![CDATA[e30=]]></response>
    <comment></comment>
  </item>"#,
        url = url,
        method = method,
        path = path,
        base64 = base64,
        request = request
    )
}

#[test]
fn test_burp_items_decode_with_passthrough_fields() {
    let xml = burp_export(&[burp_item(
        "GET",
        "/v1/users/42",
        "https://api.example.com/v1/users/42",
        false,
        "GET /v1/users/42 HTTP/1.1\nHost: api.example.com",
    )]);
    let items = BurpItems::from_xml(&xml).expect("export should decode");

    assert_eq!(items.burp_version, "2023.10.3.4");
    assert_eq!(items.items.len(), 1);
    let item = &items.items[0];
    assert_eq!(item.method, "GET");
    assert_eq!(item.path, "/v1/users/42");
    assert_eq!(item.host.name, "api.example.com");
    assert_eq!(item.host.ip, "93.184.216.34");
    assert_eq!(item.port, "443");
    assert_eq!(item.status, "200");
    assert_eq!(item.mime_type, "JSON");
    assert!(item.response.is_base64());
    assert!(!item.request.is_base64());
}

#[test]
fn test_burp_bad_base64_item_is_skipped() {
    let first = "GET /v1/users/42 HTTP/1.1\r\nHost: api.example.com\r\nAuthorization: Bearer tok\r\n\r\n";
    let third = "POST /v1/users HTTP/1.1\nHost: api.example.com\nContent-Type: application/xml\n\n<user/>";
    let xml = burp_export(&[
        burp_item("GET", "/v1/users/42", "https://api.example.com/v1/users/42", true, &encode(first)),
        burp_item("GET", "/broken", "https://api.example.com/broken", true, "!!!not base64!!!"),
        burp_item("POST", "/v1/users", "https://api.example.com/v1/users", false, third),
    ]);
    let items = BurpItems::from_xml(&xml).unwrap();
    let outcome = convert_items(&items, "export.xml");

    assert_eq!(outcome.requests.len(), 2, "items after the bad one are still processed");
    assert_eq!(outcome.requests[0].name, "GET 42");
    assert_eq!(outcome.requests[0].auth.as_ref().unwrap().detail.value, "tok");
    assert_eq!(outcome.requests[1].method, "POST");
    let body = outcome.requests[1].body.as_ref().unwrap();
    assert_eq!(body.raw, "<user/>");
    assert_eq!(body.language, Language::Xml);

    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].source, "export.xml");
    assert_eq!(outcome.warnings[0].position, Some(Position::Item(2)));
}

#[test]
fn test_burp_unparseable_request_is_a_warning() {
    let xml = burp_export(&[
        burp_item("GET", "/a", "https://h.test/a", false, "JUNK"),
        burp_item("GET", "/b", "https://h.test/b", true, &encode("GET /b HTTP/1.1\nHost: h.test\n\n")),
    ]);
    let outcome = convert_items(&BurpItems::from_xml(&xml).unwrap(), "f.xml");

    assert_eq!(outcome.requests.len(), 1);
    assert_eq!(outcome.requests[0].name, "GET b");
    assert_eq!(outcome.warnings[0].position, Some(Position::Item(1)));
    assert!(outcome.warnings[0].reason.contains("invalid request line"));
}

#[test]
fn test_burp_resource_name_fallbacks() {
    let mut item = BurpRawItem {
        path: "/a/b/".to_string(),
        url: "https://x.test/c/d?q".to_string(),
        ..Default::default()
    };
    assert_eq!(item.resource_name(), "b");

    item.path.clear();
    assert_eq!(item.resource_name(), "d");

    item.url.clear();
    assert_eq!(item.resource_name(), "request");
}

#[test]
fn test_burp_name_kept_when_request_has_no_host() {
    let xml = burp_export(&[burp_item("GET", "/users/", "https://h.test/other", false, "GET / HTTP/1.1")]);
    let outcome = convert_items(&BurpItems::from_xml(&xml).unwrap(), "f.xml");
    assert_eq!(outcome.requests[0].name, "GET users");
}

#[test]
fn test_burp_parser_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.xml");
    let xml = burp_export(&[burp_item(
        "GET",
        "/v1/orders",
        "https://api.example.com/v1/orders",
        true,
        &encode("GET /v1/orders?page=2 HTTP/1.1\r\nHost: api.example.com\r\n\r\n"),
    )]);
    fs::write(&path, xml).unwrap();

    let outcome = BurpXmlParser.parse(&path).expect("file should parse");
    assert_eq!(outcome.requests.len(), 1);
    assert_eq!(outcome.requests[0].url.raw, "https://api.example.com/v1/orders?page=2");
}

#[test]
fn test_burp_structural_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<items burpVersion=\"1\"><item><method>GET</method></items>").unwrap();

    let err = BurpXmlParser.parse(&path).expect_err("mismatched tags should fail");
    assert!(matches!(err, ConvertError::XmlDecode { .. }));
    assert_eq!(err.category(), ErrorCategory::StructuralDecodeFailure);
}

#[test]
fn test_burp_wrong_root_is_structural_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.xml");
    fs::write(&path, "<?xml version=\"1.0\"?><feed><entry>x</entry></feed>").unwrap();

    let err = BurpXmlParser.parse(&path).expect_err("a <feed> document is not a Burp export");
    assert!(matches!(err, ConvertError::XmlDecode { .. }));
    assert_eq!(err.category(), ErrorCategory::StructuralDecodeFailure);

    assert!(BurpItems::from_xml("").is_err());
    let empty = BurpItems::from_xml(&burp_export(&[])).expect("DOCTYPE before <items> is fine");
    assert!(empty.items.is_empty());
}

#[test]
fn test_burp_file_tolerates_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.xml");
    let raw = "GET /one HTTP/1.1\r\nHost: api.example.com\r\n\r\n";
    let mut bytes = burp_export(&[burp_item("GET", "/one", "https://api.example.com/one", true, &encode(raw))])
        .replace("<comment></comment>", "<comment>caf@</comment>")
        .into_bytes();
    let at = bytes.iter().position(|&b| b == b'@').unwrap();
    bytes[at] = 0xE9;
    fs::write(&path, &bytes).unwrap();

    let outcome = BurpXmlParser.parse(&path).expect("a Latin-1 byte is not an IO failure");
    assert_eq!(outcome.requests.len(), 1);
    assert_eq!(outcome.requests[0].name, "GET one");
}

#[test]
fn test_burp_missing_file_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = BurpXmlParser.parse(&dir.path().join("absent.xml")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::IoFailure);
}
