use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_sync_scraper::{
    Credentials, LibraryProtocol, SettingSource, Settings, save_to_file, setting_sources,
    settings_path,
};

use crate::CliError;
use crate::prompts;

fn mask_value(s: &str) -> String {
    match s.char_indices().nth(2) {
        Some((i, _)) => format!("{}****", &s[..i]),
        None => "****".to_string(),
    }
}

fn print_field(name: &str, value: Option<&str>, source: Option<&SettingSource>) {
    let source_str = source.map(|s| format!("({})", s)).unwrap_or_default();
    match value {
        Some(v) => log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            v,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            "not set".if_supports_color(Stdout, |t| t.yellow()),
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
}

/// Show resolved settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = Settings::load()?;
    let sources = setting_sources();

    log::info!(
        "{}",
        "shelf-sync Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Settings file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    print_field(
        "pricecharting_url",
        Some(&settings.pricecharting_url),
        Some(&sources.pricecharting_url),
    );
    print_field(
        "backloggery_url",
        Some(&settings.backloggery_url),
        Some(&sources.backloggery_url),
    );
    print_field(
        "protocol",
        Some(&settings.protocol.to_string()),
        Some(&sources.protocol),
    );
    print_field("username", settings.username.as_deref(), Some(&sources.username));

    let password = Credentials::password_from_env().map(|p| mask_value(&p));
    let password_source = password
        .as_ref()
        .map(|_| SettingSource::EnvVar("BACKLOGGERY_PASSWORD"));
    print_field("password", password.as_deref(), password_source.as_ref());

    log::info!("");
    print_field("max_pages", Some(&settings.max_pages.to_string()), None);
    print_field(
        "submit_delay_ms",
        Some(&settings.submit_delay.as_millis().to_string()),
        None,
    );
    print_field(
        "login_timeout_ms",
        Some(&settings.login_timeout.as_millis().to_string()),
        None,
    );
    print_field("dedupe", Some(&settings.dedupe.to_string()), None);

    Ok(())
}

/// Interactively write the settings file. Passwords are never stored.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    if !prompts::is_interactive_terminal() {
        return Err(CliError::prompt("config setup needs an interactive terminal"));
    }
    let path = settings_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;

    log::info!(
        "{}",
        "shelf-sync Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    // Existing values become the defaults
    let existing = Settings::load().unwrap_or_default();

    let username = prompts::prompt_optional("Backloggery username", existing.username.as_deref())?;
    let protocol = loop {
        let raw = prompts::prompt_with_default(
            "Library protocol (api or ui)",
            &existing.protocol.to_string(),
        )?;
        match raw.parse::<LibraryProtocol>() {
            Ok(p) => break p,
            Err(e) => log::warn!(
                "    {}",
                e.to_string().if_supports_color(Stdout, |t| t.yellow())
            ),
        }
    };
    let dedupe = loop {
        let raw = prompts::prompt_with_default(
            "Collapse duplicate copies (yes or no)",
            if existing.dedupe { "yes" } else { "no" },
        )?;
        match raw.to_lowercase().as_str() {
            "y" | "yes" | "true" => break true,
            "n" | "no" | "false" => break false,
            _ => log::warn!(
                "    {}",
                "Please answer yes or no.".if_supports_color(Stdout, |t| t.yellow())
            ),
        }
    };

    let settings = Settings {
        username,
        protocol,
        dedupe,
        ..existing
    };

    save_to_file(&settings, &path)?;
    log::info!("");
    log::info!(
        "{} Settings saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  {}",
        "Set BACKLOGGERY_PASSWORD or enter it when prompted; it is not saved."
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = settings_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    log::info!("{}", path.display());
    Ok(())
}
