use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone, PartialEq, Eq)]
#[command(name = "promptdesk")]
#[command(
    about = "Terminal console for configuring seller conversational agents",
    long_about = "Terminal console for configuring seller conversational agents\n\nConfig file loading:\n  - --config <path> (explicit file, overrides default path discovery)\n  - Default probe path when --config is not provided:\n    1. $XDG_CONFIG_HOME/promptdesk/config.toml\n    2. ~/.config/promptdesk/config.toml\n\nProfile file loading:\n  - --profile <path>, then $PROMPTDESK_PROFILE, then the config entry,\n    then ~/.local/share/promptdesk/profile.toml"
)]
pub struct CliArgs {
    /// Load config from this file path instead of the default discovery path.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Load the seller profile from this file path.
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Print the active system prompt to stdout and exit (no console).
    #[arg(long)]
    pub print_prompt: bool,
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn parse_defaults() {
        let args = CliArgs::try_parse_from(["promptdesk"]).expect("should parse");
        assert_eq!(args.config, None);
        assert_eq!(args.profile, None);
        assert!(!args.print_prompt);
    }

    #[test]
    fn parse_all_flags() {
        let args = CliArgs::try_parse_from([
            "promptdesk",
            "--config",
            "/tmp/custom.toml",
            "--profile",
            "/tmp/tienda.toml",
            "--print-prompt",
        ])
        .expect("parse");
        assert_eq!(
            args.config.as_deref(),
            Some(std::path::Path::new("/tmp/custom.toml"))
        );
        assert_eq!(
            args.profile.as_deref(),
            Some(std::path::Path::new("/tmp/tienda.toml"))
        );
        assert!(args.print_prompt);
    }
}
