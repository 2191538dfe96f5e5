pub mod cli;
pub mod config;
pub mod profile;
pub mod prompt;
pub mod tools;
pub mod trace;

use anyhow::Result;
use cli::theme::Theme;
use cli::{App, CliArgs, run_console};
use config::AppConfig;
use profile::{SellerProfile, resolve_profile_path};
use prompt::PromptSession;
use std::time::{SystemTime, UNIX_EPOCH};
use time::OffsetDateTime;
use trace::SessionTrace;

pub async fn run(args: CliArgs) -> Result<()> {
    let config = AppConfig::load_with_path(args.config.as_deref())?;
    let profile_path = resolve_profile_path(args.profile.as_deref(), config.profile_path.as_deref())?;
    let profile = SellerProfile::load_or_sample(&profile_path)?;
    let today = OffsetDateTime::now_utc().date();

    if args.print_prompt {
        let session = PromptSession::with_custom_text(profile.custom_prompt.clone());
        println!(
            "{}",
            session.active_text(&profile.agent, &profile.tools, today)
        );
        return Ok(());
    }

    let session_id = generate_session_id();
    let trace = SessionTrace::create(&session_id)?;
    trace.log_event("open", &profile_path.display().to_string());
    let theme = Theme::from_config(true, &config.theme);

    run_console(App::new(profile, profile_path, theme, trace)).await
}

fn generate_session_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis());
    format!("{millis:x}-{:x}", std::process::id())
}
