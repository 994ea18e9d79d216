//! Command-line front end for 3-byte instruction streams.
//!
//! Usage: `ycli <disasm|asm|convert|constants> ...`

use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use ymachine::{asm, constants, decode_stream, encode_stream, transcode, CodeImage, Format};

#[derive(Parser, Debug)]
#[command(name = "ycli")]
#[command(about = "Assemble, disassemble and convert 3-byte instruction streams")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a listing of a code file
    Disasm {
        file: PathBuf,

        /// Layout of the file; detected from an image tag when omitted
        #[arg(long)]
        format: Option<Format>,
    },

    /// Assemble a text file into code bytes
    Asm {
        file: PathBuf,

        #[arg(long, default_value_t = Format::V1)]
        format: Format,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix the output with a format tag byte
        #[arg(long)]
        tagged: bool,
    },

    /// Re-encode a code stream in the other layout
    Convert {
        file: PathBuf,

        #[arg(long)]
        from: Format,

        #[arg(long)]
        to: Format,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print every named constant
    Constants,
}

type CliResult = Result<(), Box<dyn Error>>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ymachine=info,ycli=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("couldn't read {}: {}", path.display(), e))
}

fn write(path: Option<&Path>, bytes: &[u8]) -> CliResult {
    match path {
        Some(p) => {
            fs::write(p, bytes).map_err(|e| format!("couldn't write {}: {}", p.display(), e))?;
            info!("wrote {} bytes to {}", bytes.len(), p.display());
        }
        None => io::stdout().write_all(bytes)?,
    }

    Ok(())
}

fn disasm(file: &Path, format: Option<Format>) -> CliResult {
    let bytes = read(file)?;

    let (format, body) = match format {
        Some(f) => (f, &bytes[..]),
        None if CodeImage::sniff(&bytes) => (Format::from_tag(bytes[0])?, &bytes[1..]),
        None => {
            warn!("no format given and no image tag found, assuming {}", Format::V1);
            (Format::V1, &bytes[..])
        }
    };

    let instrs = decode_stream(body, format)?;
    println!("; format {}", format);
    for (i, instr) in instrs.iter().enumerate() {
        println!("{:<20}; {:#06x}", instr.to_string(), i * ymachine::INSTRUCTION_WIDTH);
    }

    Ok(())
}

fn assemble(file: &Path, format: Format, output: Option<&Path>, tagged: bool) -> CliResult {
    let source = fs::read_to_string(file)
        .map_err(|e| format!("couldn't read {}: {}", file.display(), e))?;
    let instrs = asm::assemble(&source)?;

    let bytes = if tagged {
        CodeImage::new(format, instrs).to_bytes()
    } else {
        encode_stream(&instrs, format)
    };

    write(output, &bytes)
}

fn convert(file: &Path, from: Format, to: Format, output: Option<&Path>) -> CliResult {
    if from == to {
        warn!("converting {} to itself", from);
    }

    let bytes = transcode(&read(file)?, from, to)?;
    write(output, &bytes)
}

fn list_constants() {
    let width = textwrap::termwidth();

    for table in constants::TABLES.iter() {
        let entries: Vec<String> = table
            .iter()
            .map(|(name, value)| format!("{}={:#04x}", name, value))
            .collect();

        println!("{}", textwrap::fill(&format!("{}: {}", table.name, entries.join(" ")), width));
    }
}

fn main() {
    init_logging();

    let args = Args::parse();

    let result = match args.command {
        Commands::Disasm { file, format } => disasm(&file, format),
        Commands::Asm { file, format, output, tagged } => {
            assemble(&file, format, output.as_deref(), tagged)
        }
        Commands::Convert { file, from, to, output } => convert(&file, from, to, output.as_deref()),
        Commands::Constants => {
            list_constants();
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
