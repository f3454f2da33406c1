// Command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod generate;

pub use generate::{run_generate, GenerateArgs};

/// Draftloop - write social posts in someone's voice with a writer/critic loop.
#[derive(Parser, Debug)]
#[command(name = "draftloop")]
#[command(version)]
#[command(about = "Iterative writer/critic engine for short social posts.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.draftloop/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one post from a brief and a style profile
    Generate(GenerateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_minimal() {
        let cli = Cli::try_parse_from([
            "draftloop",
            "generate",
            "--brief",
            "brief.toml",
            "--profile",
            "profile.json",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command;
        assert_eq!(args.brief, PathBuf::from("brief.toml"));
        assert_eq!(args.subject, "default");
        assert!(!args.single_draft);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_generate_all_flags() {
        let cli = Cli::try_parse_from([
            "draftloop",
            "--config",
            "/etc/draftloop.toml",
            "generate",
            "--brief",
            "b.toml",
            "--profile",
            "p.toml",
            "--examples",
            "posts.json",
            "--subject",
            "acme",
            "--max-iterations",
            "5",
            "--single-draft",
            "--seed",
            "42",
            "--json",
            "--no-history",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/draftloop.toml")));
        let Commands::Generate(args) = cli.command;
        assert_eq!(args.examples, Some(PathBuf::from("posts.json")));
        assert_eq!(args.subject, "acme");
        assert_eq!(args.max_iterations, Some(5));
        assert!(args.single_draft && args.json && args.no_history);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_generate_requires_brief_and_profile() {
        assert!(Cli::try_parse_from(["draftloop", "generate", "--brief", "b.toml"]).is_err());
    }
}
