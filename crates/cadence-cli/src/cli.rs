use std::path::PathBuf;

use cadence_ledger::{Platform, PostStatus};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cadence", version)]
#[command(about = "Plan, track and export social media posts")]
pub struct Cli {
    /// Config file (default: $CADENCE_CONFIG, then ~/.cadence/cadence.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// SQLite ledger file, overrides `database.path` from config
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List posts ordered by scheduled time
    List {
        #[arg(long, value_parser = platform_parser())]
        platform: Option<Platform>,

        #[arg(long = "filter-status", value_parser = status_parser())]
        filter_status: Option<PostStatus>,
    },

    /// Add a post; it is scheduled only when --scheduled-at is given
    Add {
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long, value_parser = platform_parser())]
        platform: Platform,

        /// ISO-8601 time, e.g. 2099-01-01T09:00:00 (default: now, as a draft)
        #[arg(long = "scheduled-at")]
        scheduled_at: Option<String>,

        #[arg(long, default_value = "")]
        tags: String,

        #[arg(long = "media-url", default_value = "")]
        media_url: String,

        /// Attach the post to a campaign by id
        #[arg(long)]
        campaign: Option<i64>,
    },

    /// Dashboard: counts by status and platform, next upcoming posts
    Status,

    /// Dump every post plus stats as JSON
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Move a post to another status
    Mark {
        id: i64,

        #[arg(value_parser = status_parser())]
        status: PostStatus,
    },

    /// Campaign management
    Campaign {
        #[command(subcommand)]
        command: CampaignCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum CampaignCommand {
    /// Create a campaign (names are unique)
    Add {
        name: String,

        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// List campaigns by start date
    List,
}

fn platform_parser() -> impl TypedValueParser<Value = Platform> {
    PossibleValuesParser::new(Platform::names()).try_map(|s| s.parse::<Platform>())
}

fn status_parser() -> impl TypedValueParser<Value = PostStatus> {
    PossibleValuesParser::new(PostStatus::names()).try_map(|s| s.parse::<PostStatus>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cadence").chain(args.iter().copied()))
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_without_time_leaves_schedule_absent() {
        let cli = parse(&["add", "Hi", "--content", "c", "--platform", "twitter"]).unwrap();
        match cli.command {
            Command::Add {
                scheduled_at,
                platform,
                tags,
                ..
            } => {
                assert_eq!(scheduled_at, None);
                assert_eq!(platform, Platform::Twitter);
                assert_eq!(tags, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_filters_parse_into_enums() {
        let cli = parse(&["list", "--platform", "bluesky", "--filter-status", "failed"]).unwrap();
        match cli.command {
            Command::List {
                platform,
                filter_status,
            } => {
                assert_eq!(platform, Some(Platform::Bluesky));
                assert_eq!(filter_status, Some(PostStatus::Failed));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_platform_rejected() {
        let err = parse(&["add", "Hi", "--content", "c", "--platform", "myspace"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn add_requires_content() {
        let err = parse(&["add", "Hi", "--platform", "twitter"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn global_db_flag_after_subcommand() {
        let cli = parse(&["status", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }
}
