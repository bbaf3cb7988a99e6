//! Command-line front end: one rebuild per invocation plus settings management.

pub mod cli_args;

use std::fmt::Write as _;

use cli_args::{BuildArgs, Cli, Command, ConfigCommand, ConfigSetArgs};
use glamour_core::logging::{LoggingDestination, init_logging};
use glamour_core::{
    Bundle, BundleEngine, BundleOrigin, CatalogSnapshot, FileConfig, Rebuild,
    apply_runtime_overrides, config_path, load_config, save_config,
};

pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Command::Config(cmd)) => {
            if !cli.build.is_empty() {
                return Err("Build flags cannot be combined with config commands.".into());
            }
            handle_config_command(cmd)
        }
        None => run_build(cli.build),
    }
}

fn run_build(args: BuildArgs) -> Result<(), String> {
    let destination = if args.log_stderr {
        LoggingDestination::FileAndStderr
    } else {
        LoggingDestination::FileOnly
    };
    if let Err(err) = init_logging(destination) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let load = load_config();
    let mut warnings = load.warnings;
    let listing = build_listing(&args, load.config, &mut warnings);

    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
    print!("{}", listing?);
    Ok(())
}

/// Applies the flags over `config`, rebuilds once and returns the rendered
/// listing. Config and rebuild warnings are appended to `warnings`.
pub fn build_listing(
    args: &BuildArgs,
    mut config: FileConfig,
    warnings: &mut Vec<String>,
) -> Result<String, String> {
    apply_runtime_overrides(&mut config, &args.to_runtime_overrides(), warnings);

    let snapshot = CatalogSnapshot::load(&config.catalog_path()).map_err(|err| err.to_string())?;
    let engine = BundleEngine::new(&snapshot, &snapshot, config.sources());
    let rebuild = engine.rebuild(&config.query());
    warnings.extend(rebuild.report.warnings.iter().cloned());

    if args.json {
        let mut json = serde_json::to_string_pretty(&rebuild).map_err(|err| err.to_string())?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_rebuild(&rebuild))
    }
}

/// Plain-text listing: one header line per bundle followed by its items.
pub fn render_rebuild(rebuild: &Rebuild) -> String {
    let mut out = String::new();
    let report = &rebuild.report;
    let _ = writeln!(
        out,
        "{} bundles ({} manual, {} automatic)",
        rebuild.bundles.len(),
        report.manual,
        report.automatic
    );
    for bundle in &rebuild.bundles {
        render_bundle(&mut out, bundle);
    }
    out
}

fn render_bundle(out: &mut String, bundle: &Bundle) {
    let origin = match bundle.origin {
        BundleOrigin::Manual => "manual",
        BundleOrigin::Automatic => "auto",
    };
    let level = bundle
        .min_level()
        .map(|level| level.to_string())
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "{id:>8}  {name}  [lv {level}, {origin}]",
        id = bundle.id,
        name = bundle.display_name(),
    );
    if let Some(image) = bundle.image.as_ref() {
        let _ = writeln!(out, "          image: {}", image.display());
    }
    for item in &bundle.items {
        let _ = writeln!(
            out,
            "          {id:>8}  {name}  (lv {level}, icon {icon})",
            id = item.id,
            name = item.name,
            level = item.level,
            icon = item.icon
        );
    }
}

fn handle_config_command(command: ConfigCommand) -> Result<(), String> {
    let load = load_config();
    for warning in load.warnings {
        eprintln!("Warning: {warning}");
    }
    let mut config = load.config;

    match command {
        ConfigCommand::Show => {
            print!("{}", render_config(&config));
            Ok(())
        }
        ConfigCommand::Set(args) => {
            apply_config_set(&mut config, args);
            save_config(&config).map_err(|err| err.to_string())?;
            // Reload so the printed values reflect clamping and swapping.
            let reloaded = load_config();
            for warning in reloaded.warnings {
                eprintln!("Warning: {warning}");
            }
            print!("{}", render_config(&reloaded.config));
            Ok(())
        }
        ConfigCommand::Reset => {
            save_config(&FileConfig::default()).map_err(|err| err.to_string())?;
            println!("Restored default settings in {}", config_path().display());
            Ok(())
        }
    }
}

pub fn apply_config_set(config: &mut FileConfig, args: ConfigSetArgs) {
    if let Some(min) = args.min_level {
        config.filters.min_level = min;
    }
    if let Some(max) = args.max_level {
        config.filters.max_level = max;
    }
    if let Some(ceiling) = args.level_ceiling {
        config.filters.level_ceiling = ceiling;
    }
    if let Some(search) = args.search {
        config.filters.search = search.trim().to_string();
    }
    if let Some(dir) = args.data_dir {
        config.data.data_dir = dir;
    }
    if let Some(catalog) = args.catalog {
        config.data.catalog = catalog;
    }
    if let Some(file) = args.manual_bundles_file {
        config.data.manual_bundles_file = file;
    }
    if let Some(file) = args.banlist_file {
        config.data.banlist_file = file;
    }
    if let Some(dir) = args.image_dir {
        config.data.image_dir = if dir.trim().is_empty() {
            None
        } else {
            Some(dir)
        };
    }
}

pub fn render_config(config: &FileConfig) -> String {
    let sources = config.sources();
    let query = config.query();
    let mut out = String::new();
    let _ = writeln!(out, "config file:     {}", config_path().display());
    let _ = writeln!(out, "data dir:        {}", sources.data_dir.display());
    let _ = writeln!(out, "catalog:         {}", config.catalog_path().display());
    let _ = writeln!(out, "manual bundles:  {}", sources.manual_bundles.display());
    let _ = writeln!(out, "banlist:         {}", sources.banlist.display());
    let _ = writeln!(out, "image dir:       {}", sources.image_dir.display());
    let _ = writeln!(
        out,
        "levels:          {}-{} (ceiling {})",
        query.levels.min(),
        query.levels.max(),
        config.filters.level_ceiling
    );
    let search = if query.search.is_empty() {
        "(none)"
    } else {
        query.search.as_str()
    };
    let _ = writeln!(out, "search:          {search}");
    out
}
