use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vgate_core::Platform;

#[derive(Debug, Parser)]
#[command(
    name = "vgate",
    version,
    about = "Check this build against the remote version manifest"
)]
pub struct Cli {
    /// Settings file to use instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the version check once (default)
    Check(CheckArgs),
    /// Print a version code as DD.MM.YYYY (Rev. R)
    Format { code: String },
    /// Compare two version codes, printing -1, 0 or 1
    Compare { a: String, b: String },
    /// Resolve the update link for a platform
    ResolveUrl(ResolveUrlArgs),
}

#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Platform to resolve the update link for: android or ios
    #[arg(long, default_value_t)]
    pub platform: Platform,

    /// Manifest URL, overriding the settings file
    #[arg(long, value_name = "URL")]
    pub manifest_url: Option<String>,

    /// Application key inside the manifest, overriding the settings file
    #[arg(long, value_name = "KEY")]
    pub app_key: Option<String>,

    /// Version code to check instead of the compiled-in one
    #[arg(long, value_name = "CODE")]
    pub current_code: Option<String>,

    /// Reject version codes whose day or month is out of range
    #[arg(long)]
    pub strict_dates: bool,
}

#[derive(Debug, Args)]
pub struct ResolveUrlArgs {
    /// android or ios
    #[arg(long)]
    pub platform: Platform,

    /// Android store URL
    #[arg(long, value_name = "URL", default_value = "")]
    pub android: String,

    /// iOS store URL
    #[arg(long, value_name = "URL", default_value = "")]
    pub ios: String,
}

impl Command {
    /// Only the network check leaves a trace in the log file.
    #[must_use]
    pub fn writes_log_file(&self) -> bool {
        matches!(self, Self::Check(_))
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use vgate_core::Platform;

    use super::{CheckArgs, Cli, Command};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_default_check() {
        let cli = Cli::try_parse_from(["vgate"]).expect("bare invocation should parse");
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn check_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "vgate",
            "check",
            "--json",
            "--platform",
            "ios",
            "--current-code",
            "010120261",
            "--strict-dates",
            "-v",
        ])
        .expect("check flags should parse");

        let Some(Command::Check(args)) = cli.command else {
            panic!("expected check subcommand");
        };
        assert!(args.json);
        assert!(args.strict_dates);
        assert_eq!(args.platform, Platform::Ios);
        assert_eq!(args.current_code.as_deref(), Some("010120261"));
        assert!(cli.verbose);
    }

    #[test]
    fn resolve_url_requires_platform() {
        assert!(Cli::try_parse_from(["vgate", "resolve-url", "--android", "x"]).is_err());

        let cli = Cli::try_parse_from(["vgate", "resolve-url", "--platform", "android"])
            .expect("platform alone should parse");
        let Some(Command::ResolveUrl(args)) = cli.command else {
            panic!("expected resolve-url subcommand");
        };
        assert_eq!(args.platform, Platform::Android);
        assert_eq!(args.android, "");
        assert_eq!(args.ios, "");
    }

    #[test]
    fn platform_names_are_case_insensitive() {
        let cli = Cli::try_parse_from(["vgate", "resolve-url", "--platform", "iOS"])
            .expect("mixed-case platform should parse");
        let Some(Command::ResolveUrl(args)) = cli.command else {
            panic!("expected resolve-url subcommand");
        };
        assert_eq!(args.platform, Platform::Ios);

        assert!(Cli::try_parse_from(["vgate", "resolve-url", "--platform", "windows"]).is_err());
    }

    #[test]
    fn check_platform_defaults_to_android() {
        let cli = Cli::try_parse_from(["vgate", "check"]).expect("check should parse");
        let Some(Command::Check(args)) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.platform, Platform::Android);
        assert_eq!(CheckArgs::default().platform, Platform::Android);
    }

    #[test]
    fn only_check_writes_the_log_file() {
        assert!(Command::Check(CheckArgs::default()).writes_log_file());
        assert!(
            !Command::Format {
                code: "080120263".to_string()
            }
            .writes_log_file()
        );
        assert!(
            !Command::Compare {
                a: "010120261".to_string(),
                b: "020120261".to_string()
            }
            .writes_log_file()
        );

        let cli = Cli::try_parse_from(["vgate", "resolve-url", "--platform", "ios"])
            .expect("resolve-url should parse");
        let command = cli.command.expect("subcommand should be present");
        assert!(!command.writes_log_file());
    }
}
