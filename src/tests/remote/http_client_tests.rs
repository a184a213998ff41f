use super::*;
use crate::model::AppConfig;

#[test]
fn encode_path_escapes_segments_but_keeps_separators() {
    assert_eq!(encode_path("src/main.rs").unwrap(), "src/main.rs");
    assert_eq!(
        encode_path("docs/my notes/ü.md").unwrap(),
        "docs/my%20notes/%C3%BC.md"
    );
    assert_eq!(encode_path("/a//b/").unwrap(), "a/b");
    assert_eq!(encode_path("").unwrap(), "");
}

#[test]
fn contents_url_omits_trailing_slash_at_root() {
    let cfg = AppConfig {
        api_base_url: "http://api.test/".to_string(),
        ..AppConfig::default()
    };
    let client = RemoteClient::with_token(&cfg, "t").unwrap();
    let repo = RepoRef {
        owner: "octo".to_string(),
        name: "demo".to_string(),
    };
    assert_eq!(
        client.contents_url(&repo, "").unwrap(),
        "http://api.test/repos/octo/demo/contents"
    );
    assert_eq!(
        client.contents_url(&repo, "src/a b.txt").unwrap(),
        "http://api.test/repos/octo/demo/contents/src/a%20b.txt"
    );
}

#[test]
fn dot_segments_cannot_leave_the_contents_tree() {
    let client = RemoteClient::with_token(&AppConfig::default(), "t").unwrap();
    let repo = RepoRef {
        owner: "octo".to_string(),
        name: "demo".to_string(),
    };
    for path in ["../../victim/contents/x.txt", "docs/../../x", "./x"] {
        let err = client.contents_url(&repo, path).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPath(_)), "{}: {:?}", path, err);
    }

    let dotted = RepoRef {
        owner: "octo".to_string(),
        name: "..".to_string(),
    };
    assert!(matches!(
        client.contents_url(&dotted, "x.txt"),
        Err(ApiError::InvalidPath(_))
    ));
    assert!("octo/..".parse::<RepoRef>().is_err());
}
