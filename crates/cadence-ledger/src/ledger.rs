use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cadence_core::time::now_timestamp;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::{
    db::{self, row_to_campaign, row_to_post, CAMPAIGN_COLUMNS, POST_COLUMNS},
    error::{LedgerError, Result},
    types::{Campaign, ExportDocument, NewCampaign, NewPost, Platform, Post, PostStatus, Stats},
};

/// Maximum rows returned by [`Ledger::list_upcoming`].
pub const UPCOMING_LIMIT: usize = 10;

/// Data-access handle for the post/campaign ledger.
///
/// Holds only the file path: each call opens a fresh connection, executes
/// one statement batch and drops the connection before returning.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Bootstrap the store at `path` (directories + schema) and return a handle.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = db::open(&path)?;
        db::init_db(&conn)?;
        info!(path = %path.display(), "ledger ready");
        Ok(Self { path })
    }

    fn connect(&self) -> Result<Connection> {
        db::open(&self.path)
    }

    /// Insert a post, optionally attached to a campaign. Returns the new id.
    pub fn add_post(&self, post: &NewPost, campaign_id: Option<i64>) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO posts
             (title, content, platform, scheduled_at, status, tags, media_url,
              published_at, created_at, notes, campaign_id)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
            rusqlite::params![
                post.title,
                post.content,
                post.platform.as_str(),
                post.scheduled_at,
                post.status.as_str(),
                post.tags,
                post.media_url,
                published_at_for(post.status, &post.created_at),
                post.created_at,
                post.notes,
                campaign_id,
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(post_id = id, platform = %post.platform, status = %post.status, "post added");
        Ok(id)
    }

    /// Insert a campaign. Fails with [`LedgerError::DuplicateCampaign`] when
    /// the name is taken.
    pub fn add_campaign(&self, campaign: &NewCampaign) -> Result<i64> {
        let conn = self.connect()?;
        let inserted = conn.execute(
            "INSERT INTO campaigns (name, description, start_date, end_date, status, created_at)
             VALUES (?1,?2,?3,?4,?5,?6)",
            rusqlite::params![
                campaign.name,
                campaign.description,
                campaign.start_date,
                campaign.end_date,
                campaign.status,
                campaign.created_at,
            ],
        );
        match inserted {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                info!(campaign_id = id, name = %campaign.name, "campaign added");
                Ok(id)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!(name = %campaign.name, "campaign name already taken");
                Err(LedgerError::DuplicateCampaign {
                    name: campaign.name.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move a post to `status`, stamping `published_at` for published and
    /// clearing it otherwise. Returns false when no post has `post_id`.
    pub fn update_post_status(&self, post_id: i64, status: PostStatus) -> Result<bool> {
        let conn = self.connect()?;
        let now = now_timestamp();
        let n = conn.execute(
            "UPDATE posts SET status = ?1, published_at = ?2 WHERE id = ?3",
            rusqlite::params![status.as_str(), published_at_for(status, &now), post_id],
        )?;
        if n == 0 {
            debug!(post_id, %status, "status update matched no post");
        } else {
            info!(post_id, %status, "post status updated");
        }
        Ok(n > 0)
    }

    pub fn get_post(&self, post_id: i64) -> Result<Option<Post>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1");
        let post = conn.query_row(&sql, [post_id], row_to_post).optional()?;
        Ok(post)
    }

    /// Posts matching every given filter, ascending by `scheduled_at`.
    pub fn list_posts(
        &self,
        platform: Option<Platform>,
        status: Option<PostStatus>,
    ) -> Result<Vec<Post>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<&'static str> = Vec::new();
        if let Some(p) = platform {
            clauses.push("platform = ?");
            params.push(p.as_str());
        }
        if let Some(s) = status {
            clauses.push("status = ?");
            params.push(s.as_str());
        }
        let filter = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        // id breaks ties so equal timestamps list in insertion order
        let sql = format!("SELECT {POST_COLUMNS} FROM posts{filter} ORDER BY scheduled_at ASC, id ASC");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
            .query_map(rusqlite::params_from_iter(params), row_to_post)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = posts.len(), ?platform, ?status, "listed posts");
        Ok(posts)
    }

    /// Up to [`UPCOMING_LIMIT`] scheduled posts whose time is still ahead.
    pub fn list_upcoming(&self) -> Result<Vec<Post>> {
        self.list_upcoming_after(&now_timestamp())
    }

    /// Same as [`Ledger::list_upcoming`] with an explicit reference time.
    pub fn list_upcoming_after(&self, now: &str) -> Result<Vec<Post>> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE status = 'scheduled' AND scheduled_at > ?1
             ORDER BY scheduled_at ASC, id ASC
             LIMIT ?2"
        );
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
            .query_map(rusqlite::params![now, UPCOMING_LIMIT as i64], row_to_post)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    pub fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY start_date, id");
        let mut stmt = conn.prepare(&sql)?;
        let campaigns = stmt
            .query_map([], row_to_campaign)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(campaigns)
    }

    /// Post counts per status and per platform, plus the campaign total.
    pub fn get_stats(&self) -> Result<Stats> {
        let conn = self.connect()?;
        let by_status = group_counts(&conn, "status")?;
        let by_platform = group_counts(&conn, "platform")?;
        let total_campaigns: i64 =
            conn.query_row("SELECT COUNT(*) FROM campaigns", [], |row| row.get(0))?;
        Ok(Stats {
            by_status,
            by_platform,
            total_campaigns: total_campaigns as u64,
        })
    }

    /// Every post, the stats snapshot and the export time as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        let doc = ExportDocument {
            posts: self.list_posts(None, None)?,
            stats: self.get_stats()?,
            exported_at: now_timestamp(),
        };
        info!(posts = doc.posts.len(), "export built");
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

fn published_at_for(status: PostStatus, now: &str) -> Option<String> {
    (status == PostStatus::Published).then(|| now.to_string())
}

/// `column` is one of our own column names, never user input.
fn group_counts(conn: &Connection, column: &str) -> Result<BTreeMap<String, u64>> {
    let sql = format!("SELECT {column}, COUNT(*) FROM posts GROUP BY {column}");
    let mut stmt = conn.prepare(&sql)?;
    let counts = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })?
        .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
    Ok(counts)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
