use super::*;

#[test]
fn headers_insert_replaces_case_insensitively() {
    let mut headers = Headers::new();
    headers.insert("Content-Type", "application/json");
    headers.insert("content-type", "text/plain");
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
}

#[test]
fn headers_preserve_insertion_order() {
    let headers: Headers = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();
    let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn headers_count_ignores_case() {
    let headers: Headers = [("Authorization", "Bearer a")].into_iter().collect();
    assert_eq!(headers.count("authorization"), 1);
    assert_eq!(headers.count("x-missing"), 0);
}

#[test]
fn response_ok_covers_2xx_only() {
    assert!(HttpResponse::new(200, "").ok());
    assert!(HttpResponse::new(204, "").ok());
    assert!(!HttpResponse::new(199, "").ok());
    assert!(!HttpResponse::new(301, "").ok());
    assert!(!HttpResponse::new(401, "").ok());
}

#[test]
fn response_json_decodes_body() {
    let resp = HttpResponse::new(200, r#"{"value": 12.5}"#);
    let body: serde_json::Value = resp.json().unwrap();
    assert_eq!(body["value"], 12.5);
}

#[test]
fn response_json_reports_bad_body() {
    let resp = HttpResponse::new(200, "<html>");
    assert!(resp.json::<serde_json::Value>().is_err());
}

#[test]
fn method_strings() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Delete.as_str(), "DELETE");
    assert_eq!(Method::default(), Method::Get);
}
