//! Argument parsing for the `rscode` binary.
//!
//! Built with clap's builder API rather than the derive macros, matching
//! this codebase's existing command-line tools.

use clap::{Arg, ArgAction, Command};

/// The three subcommands this binary exposes, plus the flags shared by all
/// of them: `--k`, `--m`, `--shard` (repeated), `--offset`, `--length`, and
/// `--kernel`.
pub fn build_command() -> Command {
    let k = Arg::new("k")
        .long("k")
        .value_name("COUNT")
        .help("Number of data shards")
        .required(true)
        .value_parser(clap::value_parser!(usize));
    let m = Arg::new("m")
        .long("m")
        .value_name("COUNT")
        .help("Number of parity shards")
        .required(true)
        .value_parser(clap::value_parser!(usize));
    let shard = Arg::new("shard")
        .long("shard")
        .value_name("PATH")
        .help("Shard file, one per --shard flag, data shards first then parity shards")
        .action(ArgAction::Append)
        .required(true);
    let offset = Arg::new("offset")
        .long("offset")
        .value_name("BYTES")
        .help("Byte offset into each shard to start at")
        .default_value("0")
        .value_parser(clap::value_parser!(usize));
    let length = Arg::new("length")
        .long("length")
        .value_name("BYTES")
        .help("Number of bytes to process, starting at --offset (default: whole shard)")
        .value_parser(clap::value_parser!(usize));
    let kernel = Arg::new("kernel")
        .long("kernel")
        .value_name("NAME")
        .help("Coding-loop kernel variant to use (overridden by RS_KERNEL if set)")
        .default_value("input-output-byte-table");

    Command::new("rscode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Systematic Reed-Solomon erasure coding over GF(2^8)")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("encode")
                .visible_alias("e")
                .about("Compute parity shards from data shards")
                .arg(k.clone())
                .arg(m.clone())
                .arg(shard.clone())
                .arg(offset.clone())
                .arg(length.clone())
                .arg(kernel.clone()),
        )
        .subcommand(
            Command::new("verify")
                .visible_alias("v")
                .about("Check that parity shards are consistent with data shards")
                .arg(k.clone())
                .arg(m.clone())
                .arg(shard.clone())
                .arg(offset.clone())
                .arg(length.clone())
                .arg(kernel.clone()),
        )
        .subcommand(
            Command::new("decode")
                .visible_alias("d")
                .about("Reconstruct missing shards from any k surviving shards")
                .arg(k.clone())
                .arg(m.clone())
                .arg(shard.clone())
                .arg(offset.clone())
                .arg(length.clone())
                .arg(kernel.clone())
                .arg(
                    Arg::new("missing")
                        .long("missing")
                        .value_name("INDEX")
                        .help("Index (0-based) of a shard to treat as missing; may repeat")
                        .action(ArgAction::Append)
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

/// Parses a kernel name as accepted by `--kernel`/`RS_KERNEL`, in
/// kebab-case (`input-output-byte-table`), into a [`reed_solomon_gf8::KernelKind`].
pub fn parse_kernel_name(name: &str) -> anyhow::Result<reed_solomon_gf8::KernelKind> {
    use reed_solomon_gf8::KernelKind::*;
    Ok(match name {
        "byte-input-output-table" => ByteInputOutputTable,
        "byte-input-output-log-exp" => ByteInputOutputLogExp,
        "byte-output-input-table" => ByteOutputInputTable,
        "byte-output-input-log-exp" => ByteOutputInputLogExp,
        "input-byte-output-table" => InputByteOutputTable,
        "input-byte-output-log-exp" => InputByteOutputLogExp,
        "input-output-byte-table" => InputOutputByteTable,
        "input-output-byte-log-exp" => InputOutputByteLogExp,
        "output-byte-input-table" => OutputByteInputTable,
        "output-byte-input-log-exp" => OutputByteInputLogExp,
        "output-input-byte-table" => OutputInputByteTable,
        "output-input-byte-log-exp" => OutputInputByteLogExp,
        other => anyhow::bail!(
            "unknown kernel {other:?}; expected one of the twelve loop-nest/backend combinations, e.g. \"input-output-byte-table\""
        ),
    })
}
