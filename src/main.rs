//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs::{self, OpenOptions},
    io::{self, Read, Write},
};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use stagepack::tools::cli::{c_array, init_pack_opts, Mode, PackOpts};
use stagepack::{PackError, Pipeline};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. Stdout may carry the data,
    // so log to stderr.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Logger already initialized");
    }

    let result = init_pack_opts().and_then(|opts| run(&opts));
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Read the input, run the pipeline one way or the other, write the result.
fn run(opts: &PackOpts) -> stagepack::Result<()> {
    let input = read_input(opts)?;
    let pipeline = Pipeline::new(opts.stages.clone(), opts.escape);
    info!("Stages: {}", pipeline);

    let output = match opts.op_mode {
        Mode::Pack => pipeline.pack(&input)?,
        Mode::Unpack => pipeline.unpack(&input)?,
    };
    if !input.is_empty() {
        info!(
            "{} -> {} bytes ({:.1}%)",
            input.len(),
            output.len(),
            output.len() as f64 * 100.0 / input.len() as f64
        );
    }

    if opts.hex {
        write_output(opts, c_array(&opts.symbol, &output).as_bytes())
    } else {
        write_output(opts, &output)
    }
}

fn read_input(opts: &PackOpts) -> stagepack::Result<Vec<u8>> {
    match &opts.file {
        Some(name) => Ok(fs::read(name)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(opts: &PackOpts, data: &[u8]) -> stagepack::Result<()> {
    match opts.output_path() {
        Some(name) => {
            let mut f_out = OpenOptions::new()
                .write(true)
                .create(opts.force_overwrite)
                .create_new(!opts.force_overwrite)
                .truncate(true)
                .open(&name)
                .map_err(|e| match e.kind() {
                    io::ErrorKind::AlreadyExists => PackError::Io(io::Error::new(
                        e.kind(),
                        format!("{} exists, use --force to overwrite", name),
                    )),
                    _ => PackError::Io(e),
                })?;
            f_out.write_all(data)?;
            info!("Wrote {}", name);
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(data)?;
            out.flush()?;
        }
    }
    Ok(())
}
