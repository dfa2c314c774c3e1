use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn};

use crate::compression::pipeline::{parse_stages, Stage};
use crate::error::Result;

/// Suffix added to packed files.
pub const SUFFIX: &str = ".sp";

/// Pack or Unpack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Pack,
    Unpack,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Defines all user settable options to control program behavior
#[derive(Clone, Debug)]
pub struct PackOpts {
    /// Optional name of file to read for input (stdin otherwise)
    pub file: Option<String>,
    /// Explicit output file name
    pub out_file: Option<String>,
    /// Pack/Unpack
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Stages to run, in packing order
    pub stages: Vec<Stage>,
    /// Escape byte for the run-length stage
    pub escape: u8,
    /// Write the result as a C array instead of raw bytes
    pub hex: bool,
    /// Name of the C array
    pub symbol: String,
}

impl PackOpts {
    /// Set default parameters on program start
    pub fn new() -> Self {
        Self {
            file: None,
            out_file: None,
            op_mode: Mode::Pack,
            output: Output::File,
            force_overwrite: false,
            stages: vec![Stage::Bwt, Stage::Mtf, Stage::Rle, Stage::Arith],
            escape: 0xff,
            hex: false,
            symbol: "data".to_string(),
        }
    }

    /// Where the result goes. None means stdout.
    pub fn output_path(&self) -> Option<String> {
        if self.output == Output::Stdout {
            return None;
        }
        if let Some(out) = &self.out_file {
            return Some(out.clone());
        }
        let file = self.file.as_ref()?;
        let name = match self.op_mode {
            Mode::Pack => format!("{}{}", file, SUFFIX),
            Mode::Unpack => match file.strip_suffix(SUFFIX) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", file),
            },
        };
        Some(if self.hex { format!("{}.h", name) } else { name })
    }
}

impl Default for PackOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Packs binary payloads with block sorting, move-to-front, run-length and arithmetic coding",
    long_about = None
)]
pub struct Args {
    /// Filename of file to process (stdin if absent)
    #[clap()]
    filename: Option<String>,

    /// Pack the input (the default)
    #[clap(short = 'z', long = "pack")]
    pack: bool,

    /// Unpack the input
    #[clap(short = 'd', long = "unpack")]
    unpack: bool,

    /// Comma separated stages, in packing order
    #[clap(long, default_value = "bwt,mtf,rle,arith")]
    stages: String,

    /// Escape byte for the run-length stage
    #[clap(short = 'e', long, default_value_t = 0xff)]
    escape: u8,

    /// Output file name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Write the result as a C array for embedding
    #[clap(long)]
    hex: bool,

    /// Name of the C array written by --hex
    #[clap(long, default_value = "data")]
    symbol: String,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,
}

/// Parse the process arguments into PackOpts.
pub fn init_pack_opts() -> Result<PackOpts> {
    pack_opts_from(Args::parse())
}

/// Put command line information from CLAP into our internal structure.
pub fn pack_opts_from(args: Args) -> Result<PackOpts> {
    let mut opts = PackOpts::new();

    opts.file = args.filename;
    opts.out_file = args.output;
    if args.pack {
        opts.op_mode = Mode::Pack
    };
    if args.unpack {
        opts.op_mode = Mode::Unpack
    };
    if args.stdout {
        opts.output = Output::Stdout
    };
    opts.force_overwrite = args.force;
    opts.stages = parse_stages(&args.stages)?;
    opts.escape = args.escape;
    opts.hex = args.hex;
    opts.symbol = args.symbol;

    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    // Below we report initialization status to the user
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.file {
        Some(s) => info!("Getting input from the file {}", s),
        None => info!("Getting input from stdin"),
    }
    if opts.stages.is_empty() {
        warn!("No stages given, data will be copied through");
    }
    if opts.stages.contains(&Stage::Rle) {
        info!("Run-length escape byte set to 0x{:02x}", opts.escape);
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    Ok(opts)
}

/// Format bytes as a C array, sixteen values per line.
pub fn c_array(symbol: &str, data: &[u8]) -> String {
    let mut out = format!("unsigned char {}[] = {{\n", symbol);
    for line in data.chunks(16) {
        let values = line
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<String>>()
            .join(",");
        out.push_str("    ");
        out.push_str(&values);
        out.push_str(",\n");
    }
    out.push_str("};\n");
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::PackError;

    fn opts(args: &[&str]) -> Result<PackOpts> {
        pack_opts_from(Args::parse_from(
            std::iter::once("stagepack").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn defaults_test() {
        let o = opts(&["blob.bin"]).unwrap();
        assert_eq!(o.op_mode, Mode::Pack);
        assert_eq!(o.stages, vec![Stage::Bwt, Stage::Mtf, Stage::Rle, Stage::Arith]);
        assert_eq!(o.escape, 0xff);
        assert_eq!(o.output_path(), Some("blob.bin.sp".to_string()));
    }

    #[test]
    fn unpack_names_test() {
        let o = opts(&["-d", "blob.bin.sp"]).unwrap();
        assert_eq!(o.op_mode, Mode::Unpack);
        assert_eq!(o.output_path(), Some("blob.bin".to_string()));

        let o = opts(&["-d", "blob.bin"]).unwrap();
        assert_eq!(o.output_path(), Some("blob.bin.out".to_string()));

        let o = opts(&["-d", "blob.sp", "-o", "x"]).unwrap();
        assert_eq!(o.output_path(), Some("x".to_string()));
    }

    #[test]
    fn stdout_and_hex_test() {
        let o = opts(&["-c", "blob.bin"]).unwrap();
        assert_eq!(o.output_path(), None);

        let o = opts(&["--hex", "--symbol", "shaders", "blob.bin"]).unwrap();
        assert!(o.hex);
        assert_eq!(o.symbol, "shaders");
        assert_eq!(o.output_path(), Some("blob.bin.sp.h".to_string()));
    }

    #[test]
    fn stages_and_escape_test() {
        let o = opts(&["--stages", "mtf,rle", "-e", "0", "blob.bin"]).unwrap();
        assert_eq!(o.stages, vec![Stage::Mtf, Stage::Rle]);
        assert_eq!(o.escape, 0);
        assert!(matches!(
            opts(&["--stages", "huffman"]),
            Err(PackError::UnknownStage(_))
        ));
    }

    #[test]
    fn c_array_test() {
        let data = (0..18_u8).collect::<Vec<u8>>();
        assert_eq!(
            c_array("data", &data),
            "unsigned char data[] = {\n    0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,\n    16,17,\n};\n"
        );
        assert_eq!(c_array("empty", &[]), "unsigned char empty[] = {\n};\n");
    }
}
