use std::io::Write;
use std::path::Path;

use anyhow::Context;
use cadence_core::config::DisplayConfig;
use cadence_ledger::{Ledger, NewCampaign, NewPost, Platform, PostStatus};
use console::style;
use tracing::warn;

use crate::cli::{CampaignCommand, Command};
use crate::render;

/// Route a parsed command to its handler. All output goes to `out`.
pub fn dispatch(
    command: Command,
    ledger: &Ledger,
    display: &DisplayConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List {
            platform,
            filter_status,
        } => list(ledger, platform, filter_status, out),
        Command::Add {
            title,
            content,
            platform,
            scheduled_at,
            tags,
            media_url,
            campaign,
        } => {
            let post = NewPost::new(title, content, platform, scheduled_at)
                .with_tags(tags)
                .with_media_url(media_url);
            add(ledger, &post, campaign, out)
        }
        Command::Status => status(ledger, display.upcoming_limit, out),
        Command::Export { output } => export(ledger, output.as_deref(), out),
        Command::Mark { id, status } => mark(ledger, id, status, out),
        Command::Campaign { command } => match command {
            CampaignCommand::Add {
                name,
                start,
                end,
                description,
            } => {
                let campaign = NewCampaign::new(name, start, end).with_description(description);
                add_campaign(ledger, &campaign, out)
            }
            CampaignCommand::List => list_campaigns(ledger, out),
        },
    }
}

pub fn list(
    ledger: &Ledger,
    platform: Option<Platform>,
    status: Option<PostStatus>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let posts = ledger.list_posts(platform, status)?;
    render::post_table(&posts, out)?;
    Ok(())
}

pub fn add(
    ledger: &Ledger,
    post: &NewPost,
    campaign_id: Option<i64>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let id = ledger.add_post(post, campaign_id)?;
    let msg = format!(
        "Post #{id} '{}' {} for {} at {}",
        post.title, post.status, post.platform, post.scheduled_at
    );
    writeln!(out, "{}", style(msg).green())?;
    Ok(())
}

pub fn status(ledger: &Ledger, upcoming_limit: usize, out: &mut impl Write) -> anyhow::Result<()> {
    let stats = ledger.get_stats()?;
    let upcoming = ledger.list_upcoming()?;
    render::dashboard(&stats, &upcoming, upcoming_limit, out)?;
    Ok(())
}

/// Write the JSON snapshot to `output`, or to `out` when no path is given.
pub fn export(ledger: &Ledger, output: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    let json = ledger.export_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("writing export to {}", path.display()))?;
            writeln!(out, "{}", style(format!("Exported to {}", path.display())).green())?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

pub fn mark(
    ledger: &Ledger,
    post_id: i64,
    status: PostStatus,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if ledger.update_post_status(post_id, status)? {
        writeln!(
            out,
            "{}",
            style(format!("Post #{post_id} marked {status}")).green()
        )?;
    } else {
        warn!(post_id, "mark: no such post");
        writeln!(out, "{}", style(format!("No post #{post_id}")).yellow())?;
    }
    Ok(())
}

pub fn add_campaign(
    ledger: &Ledger,
    campaign: &NewCampaign,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let id = ledger.add_campaign(campaign)?;
    writeln!(
        out,
        "{}",
        style(format!(
            "Campaign #{id} '{}' runs {} to {}",
            campaign.name, campaign.start_date, campaign.end_date
        ))
        .green()
    )?;
    Ok(())
}

pub fn list_campaigns(ledger: &Ledger, out: &mut impl Write) -> anyhow::Result<()> {
    let campaigns = ledger.list_campaigns()?;
    render::campaign_table(&campaigns, out)?;
    Ok(())
}
