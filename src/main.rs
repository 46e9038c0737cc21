use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::stdout;
use std::process::ExitCode;

use wasmscan::decoder::delegate::NopDelegate;
use wasmscan::decoder::features::Features;
use wasmscan::decoder::{decode_module, DecodeOptions};

#[derive(Parser)]
#[command(name = "wasmscan")]
#[command(about = "WebAssembly binary format event tracer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DecodeFlags {
    /// Decode "name" custom sections
    #[arg(long)]
    debug_names: bool,

    /// Enable the exception handling opcodes and sections
    #[arg(long)]
    exceptions: bool,

    /// Enable the saturating float-to-int conversion opcodes
    #[arg(long)]
    saturating_truncs: bool,
}

impl DecodeFlags {
    fn features(&self) -> Features {
        Features::new()
            .with_exceptions(self.exceptions)
            .with_saturating_float_to_int(self.saturating_truncs)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a module and print every event to stdout
    Trace {
        /// Path to the WebAssembly module
        file: String,

        #[command(flatten)]
        flags: DecodeFlags,
    },

    /// Decode a module and report only success or failure
    Check {
        /// Path to the WebAssembly module
        file: String,

        #[command(flatten)]
        flags: DecodeFlags,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Trace { file, flags } => trace_module(&file, &flags),
        Commands::Check { file, flags } => check_module(&file, &flags),
    }
}

fn read_module_file(file: &str) -> Result<Vec<u8>, ExitCode> {
    match fs::read(file) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            eprintln!("Error reading {}: {}", file, e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn trace_module(file: &str, flags: &DecodeFlags) -> ExitCode {
    let bytes = match read_module_file(file) {
        Ok(b) => b,
        Err(code) => return code,
    };

    let mut out = stdout();
    let mut delegate = NopDelegate;
    let options = DecodeOptions {
        read_debug_names: flags.debug_names,
        features: flags.features(),
        log: Some(&mut out),
    };

    match decode_module(&bytes, &mut delegate, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error decoding {}: {}", file, e);
            ExitCode::FAILURE
        }
    }
}

fn check_module(file: &str, flags: &DecodeFlags) -> ExitCode {
    let bytes = match read_module_file(file) {
        Ok(b) => b,
        Err(code) => return code,
    };

    let mut delegate = NopDelegate;
    let options = DecodeOptions {
        read_debug_names: flags.debug_names,
        features: flags.features(),
        log: None,
    };

    match decode_module(&bytes, &mut delegate, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error decoding {}: {}", file, e);
            ExitCode::FAILURE
        }
    }
}
