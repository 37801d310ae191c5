use camlights::{monitor, CamLightsConfig, CameraFilter, LightFanOut, LightsSession};
use camlights::tracker::{CameraStatus, StatusReport};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    camlights::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args),
        "status" => cmd_status(&args),
        "lights" => cmd_lights(&args),
        "list-cameras" => cmd_list_cameras(&args),
        "init-config" => cmd_init_config(&args),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: camlights <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run [--config <path>]            watch cameras and drive lights until Ctrl-C");
    eprintln!("  status [--config <path>] [--json] one-shot camera/light status report");
    eprintln!("  lights <on|off> [--config <path>] force every configured light on or off");
    eprintln!("  list-cameras [--json]             enumerate cameras");
    eprintln!("  init-config [<path>]              write a default camlights.toml");
}

/// Load config from --config <path> if given, else the default location.
fn config_from_args(args: &[String]) -> Result<CamLightsConfig, Box<dyn std::error::Error>> {
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        let path = args.get(pos + 1).ok_or("--config requires a path")?;
        Ok(CamLightsConfig::load_from_file(path)?)
    } else {
        Ok(CamLightsConfig::load_or_default())
    }
}

fn cmd_run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_from_args(args)?;
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
    if config.lights.is_empty() {
        log::warn!("No lights configured; tracking cameras anyway");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let session = LightsSession::new(&config)?;
        session.start().await?;
        tokio::select! {
            _ = session.run() => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, shutting down");
            }
        }
        session.stop().await;
        Ok::<(), camlights::CamLightsError>(())
    })?;
    Ok(())
}

fn cmd_status(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_from_args(args)?;
    let filter = CameraFilter::from_config(&config.filter)?;
    let cameras = monitor::scan()?;

    let any_in_use = cameras
        .iter()
        .filter(|c| filter.allows(c))
        .any(|c| c.in_use);
    let mut camera_rows: Vec<CameraStatus> = cameras
        .iter()
        .map(|c| CameraStatus {
            id: c.id.clone(),
            name: c.name.clone(),
            in_use: c.in_use,
            allowed: filter.allows(c),
        })
        .collect();
    camera_rows.sort_by(|a, b| a.name.cmp(&b.name));

    let report = StatusReport {
        cameras: camera_rows,
        lights: config.lights.iter().map(|l| l.describe()).collect(),
        any_in_use,
        filter_enabled: filter.is_enabled(),
    };

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Cameras:");
        if report.cameras.is_empty() {
            println!("  (none)");
        }
        for c in &report.cameras {
            println!(
                "  {}: {} (in use: {}, allowed: {})",
                c.id, c.name, c.in_use, c.allowed
            );
        }
        println!("Lights:");
        if report.lights.is_empty() {
            println!("  (none)");
        }
        for l in &report.lights {
            println!("  {}", l);
        }
        println!("Any allowed camera in use: {}", report.any_in_use);
        println!("Filter enabled: {}", report.filter_enabled);
    }
    Ok(())
}

fn cmd_lights(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let on = match args.get(2).map(String::as_str) {
        Some("on") => true,
        Some("off") => false,
        _ => {
            eprintln!("Usage: camlights lights <on|off> [--config <path>]");
            std::process::exit(1);
        }
    };

    let config = config_from_args(args)?;
    if config.lights.is_empty() {
        eprintln!("No lights configured");
        std::process::exit(1);
    }

    let fanout = LightFanOut::new(config.lights.clone(), &config.http)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(fanout.apply_state_and_wait(on));
    println!(
        "Applied {} to {} device(s)",
        if on { "on" } else { "off" },
        fanout.device_count()
    );
    Ok(())
}

fn cmd_list_cameras(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let cameras = monitor::scan()?;
    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string(&cameras)?);
    } else {
        for c in cameras {
            println!("{}: {} (in use: {})", c.id, c.name, c.in_use);
        }
    }
    Ok(())
}

fn cmd_init_config(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = args
        .get(2)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(CamLightsConfig::default_path);
    if path.exists() {
        eprintln!("Refusing to overwrite existing config at {:?}", path);
        std::process::exit(1);
    }
    CamLightsConfig::default().save_to_file(&path)?;
    println!("Wrote default configuration to {:?}", path);
    Ok(())
}
