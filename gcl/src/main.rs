use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use gcl::config::GclConfig;
use gcl::gcl_solver::GclSolver;
use gcl::io::cli::Cli;
use gcl::io::output::GclOutput;
use gcl::{EPOCH, io};
use guillo_rs::io::export::export_allocation;
use guillo_rs::io::import::import_request;
use guillo_rs::io::svg::container_to_svg;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            GclConfig::default()
        }
        Some(config_file) => {
            let file = File::open(&config_file).with_context(|| {
                format!("could not open config file: {}", config_file.display())
            })?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed GclConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid file name")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_request = io::read_request(&args.input_file)?;
    let request = import_request(&ext_request).context("invalid request")?;
    let allocation = GclSolver::new(config.cut_config).solve(&request)?;

    {
        let output = GclOutput {
            request: ext_request,
            solution: export_allocation(&allocation),
            config,
            run_time_ms: EPOCH.elapsed().as_millis() as u64,
        };
        let solution_path = args
            .solution_folder
            .join(format!("sol_{input_file_stem}.json"));
        io::write_json(&output, Path::new(&solution_path))?;
    }

    if config.write_svg {
        for container in allocation.containers.iter() {
            let svg_path = args
                .solution_folder
                .join(format!("sol_{input_file_stem}_{}.svg", container.index));
            let svg = container_to_svg(container, config.svg_draw_options, input_file_stem);
            io::write_svg(&svg, Path::new(&svg_path))?;
        }
    }

    Ok(())
}
