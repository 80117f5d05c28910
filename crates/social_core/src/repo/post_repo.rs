//! Post repository contract and SQLite implementation.
//!
//! # Invariants
//! - `all` returns rows ordered by `id ASC`.
//! - `account_id` is written and read as given; no account row is checked.

use crate::model::account::AccountId;
use crate::model::post::{Post, PostId};
use crate::repo::{ensure_connection_ready, read_integer, read_text, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TABLE: &str = "posts";
const COLUMNS: &[&str] = &["id", "title", "content", "view_count", "account_id"];

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    view_count,
    account_id
FROM posts";

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn all(&self) -> RepoResult<Vec<Post>>;
    fn find(&self, id: PostId) -> RepoResult<Post>;
    /// Inserts the post and returns the generated id; `post.id` is ignored.
    fn create(&self, post: &Post) -> RepoResult<PostId>;
    /// Overwrites every column of the row with `post.id`; returns rows changed.
    fn update(&self, post: &Post) -> RepoResult<usize>;
    /// Returns rows removed, 0 when `id` does not exist.
    fn delete(&self, id: PostId) -> RepoResult<usize>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, TABLE, COLUMNS)?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn all(&self) -> RepoResult<Vec<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;

        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn find(&self, id: PostId) -> RepoResult<Post> {
        let found = self
            .conn
            .query_row(&format!("{POST_SELECT_SQL} WHERE id = ?1;"), [id], |row| {
                Ok(parse_post_row(row))
            })
            .optional()?;

        match found {
            Some(post) => post,
            None => Err(RepoError::NotFound { table: TABLE, id }),
        }
    }

    fn create(&self, post: &Post) -> RepoResult<PostId> {
        self.conn.execute(
            "INSERT INTO posts (title, content, view_count, account_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title.as_str(),
                post.content.as_str(),
                post.view_count,
                post.account_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, post: &Post) -> RepoResult<usize> {
        let id = post.id.ok_or(RepoError::MissingId(TABLE))?;

        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                view_count = ?3,
                account_id = ?4
             WHERE id = ?5;",
            params![
                post.title.as_str(),
                post.content.as_str(),
                post.view_count,
                post.account_id,
                id,
            ],
        )?;

        Ok(changed)
    }

    fn delete(&self, id: PostId) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = read_integer(row, TABLE, "id")?;
    let view_count = read_integer(row, TABLE, "view_count")?;
    let account_id: AccountId = read_integer(row, TABLE, "account_id")?;

    Ok(Post {
        id: Some(id),
        title: read_text(row, TABLE, "title")?,
        content: read_text(row, TABLE, "content")?,
        view_count,
        account_id,
    })
}
