use social_core::{Account, Post};

#[test]
fn new_records_are_unsaved() {
    let account = Account::new("nick@hotmail.com", "nick");
    assert_eq!(account.id, None);

    let post = Post::new("How to be cool", "Just be", 1);
    assert_eq!(post.id, None);
    assert_eq!(post.view_count, 0);
}

#[test]
fn with_id_sets_the_database_id() {
    let post = Post::with_id(2, "How to be chill", "Just being", 14, 2);
    assert_eq!(post.id, Some(2));
    assert_eq!(post.view_count, 14);
    assert_eq!(Account::with_id(1, "a@b.com", "ab").id, Some(1));
}

#[test]
fn post_serialization_uses_column_names() {
    let post = Post::with_id(1, "How to be cool", "Just be", 3, 1);

    let json = serde_json::to_value(&post).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["title"], "How to be cool");
    assert_eq!(json["view_count"], 3);
    assert_eq!(json["account_id"], 1);

    let decoded: Post = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, post);
}

#[test]
fn post_deserialization_defaults_missing_view_count_to_zero() {
    let value = serde_json::json!({
        "id": null,
        "title": "Draft",
        "content": "Not yet viewed",
        "account_id": 2
    });

    let post: Post = serde_json::from_value(value).unwrap();
    assert_eq!(post, Post::new("Draft", "Not yet viewed", 2));
}

#[test]
fn unsaved_account_serializes_null_id() {
    let json = serde_json::to_value(Account::new("fake@fake.com", "sonotfake")).unwrap();
    assert!(json["id"].is_null());
    assert_eq!(json["username"], "sonotfake");
}
