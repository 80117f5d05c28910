use rusqlite::Connection;
use social_core::db::migrations::latest_version;
use social_core::{
    open_db_in_memory, reset_social_network, Account, AccountRepository, RepoError,
    SqliteAccountRepository,
};

fn seeded_connection() -> Connection {
    let conn = open_db_in_memory().unwrap();
    reset_social_network(&conn).unwrap();
    conn
}

#[test]
fn all_returns_seeded_accounts_in_id_order() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let accounts = repo.all().unwrap();

    assert_eq!(
        accounts,
        vec![
            Account::with_id(1, "nick@hotmail.com", "nick"),
            Account::with_id(2, "jim@hotmail.com", "jimmo"),
        ]
    );
}

#[test]
fn all_on_empty_table_returns_empty_vec() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    assert!(repo.all().unwrap().is_empty());
}

#[test]
fn find_returns_account_with_matching_id() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let account = repo.find(1).unwrap();

    assert_eq!(account.id, Some(1));
    assert_eq!(account.email, "nick@hotmail.com");
    assert_eq!(account.username, "nick");
}

#[test]
fn find_missing_id_returns_not_found() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let err = repo.find(99).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            table: "accounts",
            id: 99
        }
    ));
}

#[test]
fn create_returns_generated_id_and_persists_fields() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let new_account = Account::new("fake@fake.com", "sonotfake");
    let id = repo.create(&new_account).unwrap();
    assert_eq!(id, 3);

    let accounts = repo.all().unwrap();
    let last = accounts.last().unwrap();
    assert_eq!(last.id, Some(id));
    assert_eq!(last.email, "fake@fake.com");
    assert_eq!(last.username, "sonotfake");
    assert_eq!(repo.find(id).unwrap(), Account::with_id(id, "fake@fake.com", "sonotfake"));
}

#[test]
fn create_ignores_caller_supplied_id() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let id = repo
        .create(&Account::with_id(1, "dup@fake.com", "dup"))
        .unwrap();

    assert_ne!(id, 1);
    assert_eq!(repo.find(1).unwrap().email, "nick@hotmail.com");
    assert_eq!(repo.all().unwrap().len(), 3);
}

#[test]
fn update_overwrites_fields_and_leaves_other_rows_unchanged() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let changed = repo
        .update(&Account::with_id(1, "fake@fake.com", "sonotfake"))
        .unwrap();
    assert_eq!(changed, 1);

    let updated = repo.find(1).unwrap();
    assert_eq!(updated.email, "fake@fake.com");
    assert_eq!(updated.username, "sonotfake");
    assert_eq!(
        repo.find(2).unwrap(),
        Account::with_id(2, "jim@hotmail.com", "jimmo")
    );
}

#[test]
fn update_missing_id_is_a_silent_no_op() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let changed = repo
        .update(&Account::with_id(42, "ghost@fake.com", "ghost"))
        .unwrap();

    assert_eq!(changed, 0);
    assert_eq!(repo.all().unwrap().len(), 2);
}

#[test]
fn update_without_id_is_rejected() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    let err = repo.update(&Account::new("a@b.com", "ab")).unwrap_err();
    assert!(matches!(err, RepoError::MissingId("accounts")));
}

#[test]
fn delete_removes_exactly_one_row() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    assert_eq!(repo.delete(1).unwrap(), 1);

    let remaining = repo.all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, Some(2));
}

#[test]
fn deleting_every_account_empties_the_table() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    repo.delete(1).unwrap();
    repo.delete(2).unwrap();

    assert!(repo.all().unwrap().is_empty());
}

#[test]
fn delete_missing_id_is_a_no_op() {
    let conn = seeded_connection();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    assert_eq!(repo.delete(7).unwrap(), 0);
    assert_eq!(repo.all().unwrap().len(), 2);
}

#[test]
fn non_text_email_is_reported_as_invalid_data() {
    let conn = seeded_connection();
    conn.execute("UPDATE accounts SET email = X'00FF' WHERE id = 2;", [])
        .unwrap();
    let repo = SqliteAccountRepository::try_new(&conn).unwrap();

    assert_eq!(repo.find(1).unwrap().username, "nick");
    let err = repo.find(2).unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("accounts.email")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteAccountRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_accounts_table_missing_a_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE accounts (
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAccountRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "accounts",
            column: "username"
        })
    ));
}
