//! Terminal rendering for posts and the dashboard.
//!
//! Columns are padded before styling so ANSI escapes never count toward the
//! column width. Colours follow `console`'s global switch, which is off for
//! non-TTY output and when `display.color = false`.

use std::io::{self, Write};

use cadence_ledger::{Campaign, Platform, Post, PostStatus, Stats};
use console::{style, StyledObject};

pub const TITLE_WIDTH: usize = 27;
pub const TIMESTAMP_WIDTH: usize = 19;
pub const UPCOMING_TIME_WIDTH: usize = 16;
pub const UPCOMING_TITLE_WIDTH: usize = 40;
const RULE_WIDTH: usize = 95;

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn platform_style<D>(platform: Platform, val: D) -> StyledObject<D> {
    let s = style(val);
    match platform {
        Platform::Twitter | Platform::Bluesky => s.cyan(),
        Platform::Instagram => s.magenta(),
        Platform::Linkedin | Platform::Facebook => s.blue(),
        Platform::Threads => s.black().bright(),
    }
}

pub fn status_style<D>(status: PostStatus, val: D) -> StyledObject<D> {
    let s = style(val);
    match status {
        PostStatus::Draft => s.yellow(),
        PostStatus::Scheduled => s.blue(),
        PostStatus::Published => s.green(),
        PostStatus::Failed => s.red(),
        PostStatus::Cancelled => s.black().bright(),
    }
}

/// Post table followed by a `Total: N` line.
pub fn post_table(posts: &[Post], out: &mut impl Write) -> io::Result<()> {
    let header = format!(
        "{:<5} {:<28} {:<12} {:<22} {:<12} {}",
        "ID", "Title", "Platform", "Scheduled", "Status", "Tags"
    );
    writeln!(out, "\n{}", style(header).cyan().bold())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for p in posts {
        writeln!(
            out,
            "{:<5} {:<28} {} {:<22} {} {}",
            p.id,
            truncate_chars(&p.title, TITLE_WIDTH),
            platform_style(p.platform, format!("{:<12}", p.platform.as_str())),
            truncate_chars(&p.scheduled_at, TIMESTAMP_WIDTH),
            status_style(p.status, format!("{:<12}", p.status.as_str())),
            p.tags,
        )?;
    }
    writeln!(out, "\n{}\n", style(format!("Total: {}", posts.len())).cyan())
}

/// Status and platform breakdowns, campaign total and the next upcoming posts.
pub fn dashboard(
    stats: &Stats,
    upcoming: &[Post],
    upcoming_limit: usize,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "\n{}\n", style("=== Cadence Dashboard ===").cyan().bold())?;

    writeln!(out, "{}", style("Posts by Status:").bold())?;
    for (status, count) in &stats.by_status {
        let label = format!("{status:<14}");
        match status.parse::<PostStatus>() {
            Ok(s) => writeln!(out, "  {} {count}", status_style(s, label))?,
            Err(_) => writeln!(out, "  {label} {count}")?,
        }
    }

    writeln!(out, "\n{}", style("Posts by Platform:").bold())?;
    for (platform, count) in &stats.by_platform {
        let label = format!("{platform:<14}");
        match platform.parse::<Platform>() {
            Ok(p) => writeln!(out, "  {} {count}", platform_style(p, label))?,
            Err(_) => writeln!(out, "  {label} {count}")?,
        }
    }

    writeln!(out, "\n{} {}", style("Campaigns:").bold(), stats.total_campaigns)?;

    let shown = &upcoming[..upcoming.len().min(upcoming_limit)];
    if !shown.is_empty() {
        writeln!(
            out,
            "\n{}",
            style(format!("Next {} upcoming:", shown.len())).yellow().bold()
        )?;
        for p in shown {
            writeln!(
                out,
                "  [{}] {} - {}",
                platform_style(p.platform, p.platform.as_str()),
                truncate_chars(&p.scheduled_at, UPCOMING_TIME_WIDTH),
                truncate_chars(&p.title, UPCOMING_TITLE_WIDTH),
            )?;
        }
    }
    writeln!(out)
}

pub fn campaign_table(campaigns: &[Campaign], out: &mut impl Write) -> io::Result<()> {
    let header = format!(
        "{:<5} {:<24} {:<12} {:<12} {:<10} {}",
        "ID", "Name", "Start", "End", "Status", "Description"
    );
    writeln!(out, "\n{}", style(header).cyan().bold())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for c in campaigns {
        writeln!(
            out,
            "{:<5} {:<24} {:<12} {:<12} {:<10} {}",
            c.id,
            truncate_chars(&c.name, 23),
            truncate_chars(&c.start_date, 12),
            truncate_chars(&c.end_date, 12),
            c.status,
            c.description,
        )?;
    }
    writeln!(out, "\n{}\n", style(format!("Total: {}", campaigns.len())).cyan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn post(id: i64, title: &str, platform: Platform, status: PostStatus) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: "body".to_string(),
            platform,
            scheduled_at: "2099-01-01T09:30:00.123456".to_string(),
            status,
            tags: "launch".to_string(),
            media_url: String::new(),
            published_at: None,
            created_at: "2026-01-01T00:00:00.000000".to_string(),
            notes: String::new(),
            campaign_id: None,
        }
    }

    fn rendered(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        render(&mut buf).expect("render into memory");
        String::from_utf8(buf).expect("utf8 output")
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn short_text_returned_as_is() {
        assert_eq!(truncate_chars("hello", 27), "hello");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn exact_boundary_not_cut() {
        let s = "x".repeat(TITLE_WIDTH);
        assert_eq!(truncate_chars(&s, TITLE_WIDTH).len(), TITLE_WIDTH);
    }

    #[test]
    fn unicode_cut_on_char_boundary() {
        let s = "€".repeat(30);
        let cut = truncate_chars(&s, TITLE_WIDTH);
        assert_eq!(cut.chars().count(), TITLE_WIDTH);
    }

    #[test]
    fn table_truncates_title_and_timestamp() {
        let long = "A very long title that will not fit in the column";
        let rows = [post(7, long, Platform::Twitter, PostStatus::Scheduled)];
        let out = rendered(|buf| post_table(&rows, buf));
        assert!(out.contains(truncate_chars(long, TITLE_WIDTH)));
        assert!(!out.contains(long));
        assert!(out.contains("2099-01-01T09:30:00"));
        assert!(!out.contains(".123456"));
        assert!(out.contains("twitter"));
        assert!(out.contains("scheduled"));
        assert!(out.contains("Total: 1"));
    }

    #[test]
    fn empty_table_reports_zero() {
        assert!(rendered(|buf| post_table(&[], buf)).contains("Total: 0"));
    }

    #[test]
    fn dashboard_caps_upcoming() {
        let stats = Stats {
            by_status: BTreeMap::from([("scheduled".to_string(), 7)]),
            by_platform: BTreeMap::from([("instagram".to_string(), 7)]),
            total_campaigns: 2,
        };
        let upcoming: Vec<_> = (1..=7)
            .map(|i| post(i, &format!("post {i}"), Platform::Instagram, PostStatus::Scheduled))
            .collect();
        let out = rendered(|buf| dashboard(&stats, &upcoming, 5, buf));
        assert!(out.contains("Next 5 upcoming:"));
        assert!(out.contains("post 5"));
        assert!(!out.contains("post 6"));
        assert!(out.contains("2099-01-01T09:30 - post 1"));
        assert!(out.contains("instagram"));
        assert!(out.contains("Campaigns:"));
    }

    #[test]
    fn dashboard_without_upcoming_omits_section() {
        let out = rendered(|buf| dashboard(&Stats::default(), &[], 5, buf));
        assert!(!out.contains("upcoming"));
    }

    #[test]
    fn write_failures_reach_the_caller() {
        let rows = [post(1, "Launch", Platform::Bluesky, PostStatus::Draft)];
        let err = post_table(&rows, &mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(dashboard(&Stats::default(), &rows, 5, &mut BrokenPipe).is_err());
        assert!(campaign_table(&[], &mut BrokenPipe).is_err());
    }
}
