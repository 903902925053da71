use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use keylights_lib::action::Action;
use keylights_lib::batch::{apply_actions, BatchResult};
use keylights_lib::config::{default_config_path, Config};
use keylights_lib::target::{resolve_targets, ALL_TARGETS};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// This struct defines the command line interface of the application
#[derive(Parser)]
#[clap(
    name = "keylights",
    about = "Controls Elgato Key Lights over the local network",
    version
)]
pub struct Cli {
    /// Light alias to target, or "all"
    #[clap(default_value = ALL_TARGETS)]
    pub target: String,

    /// Power action to apply
    #[clap(value_enum)]
    pub action: Option<PowerAction>,

    /// Power action to apply (alternative to the positional form)
    #[clap(short = 'a', long = "action", value_enum)]
    pub action_opt: Option<PowerAction>,

    /// Brightness percentage (5-100); out-of-range values are clamped
    #[clap(short = 'b', long = "brightness")]
    pub brightness: Option<i64>,

    /// Color temperature in Kelvin (2900-7900); out-of-range values are clamped
    #[clap(short = 't', long = "temp")]
    pub temp: Option<i64>,

    /// Path to the config file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Print the loaded config and exit
    #[clap(long)]
    pub show_config: bool,

    /// Print a sample config template and exit
    #[clap(long)]
    pub print_config_template: bool,
}

/// Power actions selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PowerAction {
    On,
    Off,
    Toggle,
}

impl PowerAction {
    /// Recognizes a bare power action given in the target position, so that
    /// `keylights on` means "turn all lights on".
    fn from_target(target: &str) -> Option<Self> {
        match target {
            "on" => Some(PowerAction::On),
            "off" => Some(PowerAction::Off),
            "toggle" => Some(PowerAction::Toggle),
            _ => None,
        }
    }
}

impl From<PowerAction> for Action {
    fn from(power: PowerAction) -> Self {
        match power {
            PowerAction::On => Action::PowerSet(true),
            PowerAction::Off => Action::PowerSet(false),
            PowerAction::Toggle => Action::PowerToggle,
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.print_config_template {
        println!("{}", serde_json::to_string_pretty(&Config::template())?);
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load(&config_path)?;

    if cli.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let (target, power) = resolve_target_and_power(&cli);
    let actions = build_actions(power, cli.temp, cli.brightness);

    let lights = config.lights();
    let targets = resolve_targets(&lights, &target)?;

    let result = apply_actions(&targets, &actions).await;
    Ok(report(&result, &actions))
}

/// Untangles the positional forms: `keylights on` has the action in the
/// target position and implicitly targets every light.
fn resolve_target_and_power(cli: &Cli) -> (String, Option<PowerAction>) {
    let mut target = cli.target.clone();
    let mut power = cli.action_opt.or(cli.action);

    if power.is_none() {
        if let Some(shifted) = PowerAction::from_target(&target) {
            power = Some(shifted);
            target = ALL_TARGETS.to_string();
        }
    }

    (target, power)
}

/// Builds the per-light action sequence for this invocation.
///
/// Temperature is applied before brightness, each as its own device call.
/// With no power action and no modifiers, the default is a toggle.
fn build_actions(
    power: Option<PowerAction>,
    temp: Option<i64>,
    brightness: Option<i64>,
) -> Vec<Action> {
    let mut actions: Vec<Action> = Vec::new();

    if let Some(power) = power {
        actions.push(power.into());
    }
    if let Some(kelvin) = temp {
        actions.push(Action::TemperatureSet(kelvin));
    }
    if let Some(value) = brightness {
        actions.push(Action::BrightnessSet(value));
    }
    if actions.is_empty() {
        actions.push(Action::PowerToggle);
    }

    actions
}

/// Prints the outcome and maps it to the process exit code: success only if
/// every targeted light succeeded.
fn report(result: &BatchResult, actions: &[Action]) -> ExitCode {
    let description = actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Key Light action applied: {description}");

    for (light, message) in &result.failures {
        eprintln!("failed to update {}: {message}", light.label());
    }

    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_action_shifts_to_all_targets() {
        let cli = Cli::parse_from(["keylights", "on"]);
        let (target, power) = resolve_target_and_power(&cli);
        assert_eq!(target, "all");
        assert_eq!(power, Some(PowerAction::On));
    }

    #[test]
    fn test_alias_with_positional_action() {
        let cli = Cli::parse_from(["keylights", "left", "toggle"]);
        let (target, power) = resolve_target_and_power(&cli);
        assert_eq!(target, "left");
        assert_eq!(power, Some(PowerAction::Toggle));
    }

    #[test]
    fn test_action_flag_wins_over_positional() {
        let cli = Cli::parse_from(["keylights", "left", "on", "--action", "off"]);
        let (_, power) = resolve_target_and_power(&cli);
        assert_eq!(power, Some(PowerAction::Off));
    }

    #[test]
    fn test_default_target_is_all_with_toggle() {
        let cli = Cli::parse_from(["keylights"]);
        let (target, power) = resolve_target_and_power(&cli);
        assert_eq!(target, "all");
        assert_eq!(power, None);
        assert_eq!(build_actions(power, None, None), vec![Action::PowerToggle]);
    }

    #[test]
    fn test_modifiers_suppress_default_toggle() {
        let actions = build_actions(None, Some(4000), Some(50));
        assert_eq!(
            actions,
            vec![Action::TemperatureSet(4000), Action::BrightnessSet(50)]
        );
    }

    #[test]
    fn test_power_combines_with_modifiers() {
        let actions = build_actions(Some(PowerAction::On), None, Some(30));
        assert_eq!(
            actions,
            vec![Action::PowerSet(true), Action::BrightnessSet(30)]
        );
    }
}
