// main.rs - CLI entry point

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use vcfrep::cli::{Config, ProgressBarObserver};
use vcfrep::data::LoadOptions;
use vcfrep::output::{emit, render_group, run_header, ReportFormat};
use vcfrep::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
        if !args.quiet {
            println!("📄 Loaded configuration from: {}", config_path);
        }
    }

    let settings = validate_args(&args)?;
    let verbose = !args.quiet;

    if verbose {
        println!("🚀 vcfrep v{}", env!("CARGO_PKG_VERSION"));
        println!("📂 Root: {}", settings.root.display());
        println!("🧬 Grouping: {}", settings.grouping.description());
    }

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        if verbose {
            println!("🧵 Threads: {}", n);
        }
    } else if verbose {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    let discovery = find_variant_call_format_files(
        &settings.root,
        &settings.sniff_options,
        &settings.file_filter,
    )
    .map_err(|e| e.to_string())?;

    if verbose {
        println!("🔍 Found {} VCF files", discovery.files.len());
        for (path, reason) in &discovery.skipped {
            eprintln!("⚠️  Skipping {}: {}", path.display(), reason);
        }
    }

    let groups = settings.grouping.group(&discovery.files);
    let output_file = settings.output_file.as_deref();

    if settings.report_options.format == ReportFormat::Text {
        emit(output_file, &run_header(&command_line))?;
    }

    let mut compared_groups = 0;
    for (group_name, files) in &groups {
        if files.len() < 2 {
            if verbose {
                println!("⏭️  Group '{}': only one file, skipped", group_name);
            }
            continue;
        }

        let replicates = load_group(files, verbose);
        if replicates.len() < 2 {
            if verbose {
                println!(
                    "⏭️  Group '{}': fewer than two readable files, skipped",
                    group_name
                );
            }
            continue;
        }

        if verbose {
            println!(
                "📊 Group '{}': comparing {} replicates",
                group_name,
                replicates.len()
            );
        }

        let total_pairs = replicates.len() * (replicates.len() - 1) / 2;
        let mut progress = if verbose {
            ProgressBarObserver::new(total_pairs)
        } else {
            ProgressBarObserver::hidden()
        };

        let group_start = Instant::now();
        let result = compare_replicates(&replicates, &settings.compare_config, &mut progress);
        progress.finish();

        let report = match result {
            Ok(report) => report,
            Err(e) if e.is_configuration() => return Err(e.to_string()),
            Err(e) => {
                eprintln!("❌ Group '{}' failed: {}", group_name, e);
                continue;
            }
        };

        for error in &report.errors {
            eprintln!("⚠️  {}", error);
        }

        let rendered = render_group(group_name, &report, &settings.report_options)?;
        emit(output_file, &rendered)?;
        compared_groups += 1;

        if verbose {
            println!(
                "✅ Group '{}' done in {:.2}s",
                group_name,
                group_start.elapsed().as_secs_f64()
            );
        }
    }

    if verbose {
        if let Some(path) = output_file {
            println!("💾 Reports appended to {}", path.display());
        }
        println!(
            "🏁 {} of {} groups compared in {:.2}s",
            compared_groups,
            groups.len(),
            total_start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Load every file of a group in parallel, keeping the ones that parse
fn load_group(files: &[PathBuf], verbose: bool) -> Vec<(String, ReplicateData)> {
    let options = LoadOptions::alterations_only();

    let loaded: Vec<(&Path, Result<ReplicateData, VcfRepError>)> = files
        .par_iter()
        .map(|path| (path.as_path(), ReplicateData::from_file(path, &options)))
        .collect();

    loaded
        .into_iter()
        .filter_map(|(path, result)| match result {
            Ok(data) => Some((path.display().to_string(), data)),
            Err(e) => {
                if verbose {
                    eprintln!("⚠️  Can not load {}: {}", path.display(), e);
                }
                None
            }
        })
        .collect()
}
