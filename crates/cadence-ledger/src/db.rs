use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::types::{Campaign, Post};

/// Column list shared by every post SELECT; `row_to_post` relies on this order.
pub(crate) const POST_COLUMNS: &str = "id, title, content, platform, scheduled_at, status, tags,
     media_url, published_at, created_at, notes, campaign_id";

pub(crate) const CAMPAIGN_COLUMNS: &str =
    "id, name, description, start_date, end_date, status, created_at";

/// Open the ledger file, creating its parent directory if needed.
///
/// Foreign keys stay off: `posts.campaign_id` may name a campaign that does
/// not exist.
pub fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(Connection::open(path)?)
}

/// Initialise the ledger schema in `conn`.
///
/// Safe to call on every startup — uses `IF NOT EXISTS` throughout.
pub fn init_db(conn: &Connection) -> Result<()> {
    create_campaigns_table(conn)?;
    create_posts_table(conn)?;
    Ok(())
}

fn create_campaigns_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS campaigns (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT    NOT NULL UNIQUE,
            description TEXT    NOT NULL DEFAULT '',
            start_date  TEXT    NOT NULL,
            end_date    TEXT    NOT NULL,
            status      TEXT    NOT NULL DEFAULT 'active',
            created_at  TEXT    NOT NULL
        );",
    )?;
    Ok(())
}

fn create_posts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS posts (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT    NOT NULL,
            content      TEXT    NOT NULL,
            platform     TEXT    NOT NULL,
            scheduled_at TEXT    NOT NULL,   -- ISO-8601 local time
            status       TEXT    NOT NULL DEFAULT 'draft',
            tags         TEXT    NOT NULL DEFAULT '',
            media_url    TEXT    NOT NULL DEFAULT '',
            published_at TEXT,               -- NULL unless status = 'published'
            created_at   TEXT    NOT NULL,
            notes        TEXT    NOT NULL DEFAULT '',
            campaign_id  INTEGER             -- advisory link, not enforced
        );

        -- listing and upcoming queries both ORDER BY scheduled_at
        CREATE INDEX IF NOT EXISTS idx_posts_scheduled_at ON posts (scheduled_at);",
    )?;
    Ok(())
}

/// Map a SELECT row (column order from `POST_COLUMNS`) to a Post.
pub(crate) fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        platform: parse_column(row, 3)?,
        scheduled_at: row.get(4)?,
        status: parse_column(row, 5)?,
        tags: row.get(6)?,
        media_url: row.get(7)?,
        published_at: row.get(8)?,
        created_at: row.get(9)?,
        notes: row.get(10)?,
        campaign_id: row.get(11)?,
    })
}

pub(crate) fn row_to_campaign(row: &rusqlite::Row<'_>) -> rusqlite::Result<Campaign> {
    Ok(Campaign {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Read a TEXT column into an enum through its `FromStr` impl.
fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })
}
