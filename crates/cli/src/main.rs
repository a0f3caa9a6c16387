//! gmouse CLI: set DPI, LEDs and speed buttons on Logitech G-series mice.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gmouse_core::hiddev::report_type;
use gmouse_core::payload::{Dpi, LedPattern, SpeedButtons};
use gmouse_core::session::DeviceSession;
use gmouse_core::settings::Settings;
use gmouse_core::{command, identify, inspect};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "gmouse",
    version,
    about = "Configure Logitech G3/G5/G7/G9 hardware settings through hiddev",
    after_help = "Example: gmouse apply --dpi 1600 --led 1 /dev/usb/hiddev0"
)]
struct Cli {
    /// JSON settings file; command-line options override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DeviceArg {
    /// hiddev node (default: /dev/usb/hiddev0).
    device: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply DPI, LED and speed-button settings.
    Apply {
        #[command(flatten)]
        device: DeviceArg,
        /// DPI: 400, 800, 1600 or 2000 (default 1600).
        #[arg(short, long)]
        dpi: Option<Dpi>,
        /// LEDs: none, 1, 2, 3 or all (default none).
        #[arg(short, long)]
        led: Option<LedPattern>,
        /// Enable the + and - DPI speed buttons.
        #[arg(short = 'e', long, conflicts_with = "no_speed_buttons")]
        speed_buttons: bool,
        /// Disable the + and - DPI speed buttons.
        #[arg(short = 'n', long)]
        no_speed_buttons: bool,
    },
    /// Identify the mouse behind a hiddev node.
    Info {
        #[command(flatten)]
        device: DeviceArg,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Show the kernel's layout of the command report.
    Inspect {
        #[command(flatten)]
        device: DeviceArg,
    },
}

fn load_settings(config: Option<&PathBuf>, device: Option<PathBuf>) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(device) = device {
        settings.device = device;
    }
    Ok(settings)
}

fn open(settings: &Settings) -> Result<DeviceSession> {
    DeviceSession::open(&settings.device)
        .with_context(|| format!("cannot open {}", settings.device.display()))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("ERROR: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            device,
            dpi,
            led,
            speed_buttons,
            no_speed_buttons,
        } => {
            let mut settings = load_settings(cli.config.as_ref(), device.device)?;
            if dpi.is_some() {
                settings.dpi = dpi;
            }
            if led.is_some() {
                settings.led = led;
            }
            if speed_buttons {
                settings.speed_buttons = Some(SpeedButtons::Enabled);
            } else if no_speed_buttons {
                settings.speed_buttons = Some(SpeedButtons::Disabled);
            }
            debug!(?settings, "Resolved settings");

            let session = open(&settings)?;
            let (_, model) = identify::identify_supported(&session)?;
            println!("{} detected on {}", model, session.path().display());

            let payloads = settings.payloads();
            command::send_all(&session, &payloads)
                .context("configuration aborted; earlier settings may already be applied")?;

            println!(
                "DPI: {}",
                settings.dpi.unwrap_or(gmouse_core::settings::DEFAULT_DPI)
            );
            println!(
                "LEDs: {}",
                settings.led.unwrap_or(gmouse_core::settings::DEFAULT_LED)
            );
            if let Some(buttons) = settings.speed_buttons {
                println!("Speed buttons: {buttons}");
            }
        }
        Commands::Info { device, json } => {
            let settings = load_settings(cli.config.as_ref(), device.device)?;
            let session = open(&settings)?;
            let identity = identify::identify(&session)?;
            let version = identify::read_driver_version(&session)?;
            let model = identify::validate(&identity).ok();

            if json {
                let out = serde_json::json!({
                    "device": settings.device,
                    "driver_version": version,
                    "identity": identity,
                    "model": model,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Device: {}", settings.device.display());
                println!(
                    "hiddev driver: {}.{}.{}",
                    version >> 16,
                    (version >> 8) & 0xFF,
                    version & 0xFF
                );
                println!(
                    "Vendor: 0x{:04X}  Product: 0x{:04X}  Version: 0x{:04X}",
                    identity.vendor_id, identity.product_id, identity.version
                );
                println!(
                    "Bus: {}  Device: {}  Interface: {}  Applications: {}",
                    identity.bus_number,
                    identity.device_number,
                    identity.interface_number,
                    identity.application_count
                );
                match model {
                    Some(model) => println!("Model: {model}"),
                    None => println!("Model: not a supported G-series mouse"),
                }
            }
        }
        Commands::Inspect { device } => {
            let settings = load_settings(cli.config.as_ref(), device.device)?;
            let session = open(&settings)?;
            identify::identify_supported(&session)?;

            match inspect::read_collection_info(&session, 0) {
                Ok(c) => println!(
                    "Collection 0: type {}, usage 0x{:08X}, level {}",
                    c.kind, c.usage, c.level
                ),
                Err(e) => debug!(error = %e, "No collection info"),
            }

            let layout = inspect::read_report_layout(
                &session,
                report_type::OUTPUT,
                command::COMMAND_REPORT_ID,
            )?;
            println!(
                "Output report 0x{:02X}: {} field(s)",
                layout.report.report_id, layout.report.num_fields
            );
            for field in &layout.fields {
                println!(
                    "  field {}: {} usage(s), logical {}..={}, application 0x{:08X}",
                    field.field_index,
                    field.max_usage,
                    field.logical_minimum,
                    field.logical_maximum,
                    field.application
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn apply_parses_short_flags() {
        let cli = Cli::try_parse_from([
            "gmouse",
            "apply",
            "-d",
            "800",
            "-l",
            "ALL",
            "-n",
            "/dev/usb/hiddev2",
        ])
        .unwrap();
        match cli.command {
            Commands::Apply {
                device,
                dpi,
                led,
                speed_buttons,
                no_speed_buttons,
            } => {
                assert_eq!(device.device, Some(PathBuf::from("/dev/usb/hiddev2")));
                assert_eq!(dpi, Some(Dpi::Dpi800));
                assert_eq!(led, Some(LedPattern::All));
                assert!(!speed_buttons);
                assert!(no_speed_buttons);
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn apply_rejects_unsupported_dpi() {
        assert!(Cli::try_parse_from(["gmouse", "apply", "--dpi", "1200"]).is_err());
    }

    #[test]
    fn speed_button_flags_conflict() {
        assert!(Cli::try_parse_from(["gmouse", "apply", "-e", "-n"]).is_err());
    }

    #[test]
    fn device_argument_overrides_default() {
        let settings = load_settings(None, Some(PathBuf::from("/dev/usb/hiddev5"))).unwrap();
        assert_eq!(settings.device, PathBuf::from("/dev/usb/hiddev5"));
        let settings = load_settings(None, None).unwrap();
        assert_eq!(settings.device, PathBuf::from("/dev/usb/hiddev0"));
    }
}
