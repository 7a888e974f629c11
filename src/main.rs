//! `rscode`: a command-line front end for the `reed_solomon_gf8` library.
//!
//! This binary is ambient tooling around the core codec, not part of its
//! contract: it owns all file I/O, argument parsing, and logging, while the
//! library stays a pure, allocation-light computation over caller-supplied
//! buffers. See `reed_solomon_gf8::codec` for the actual coding algorithms.

mod cli;

use std::fs;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use reed_solomon_gf8::{KernelKind, ReedSolomon};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = cli::build_command().get_matches();

    match matches.subcommand() {
        Some(("encode", sub)) => run_encode(sub),
        Some(("verify", sub)) => run_verify(sub),
        Some(("decode", sub)) => run_decode(sub),
        _ => unreachable!("clap requires a subcommand via arg_required_else_help"),
    }
}

/// Picks the kernel from `RS_KERNEL` if set (for scripted benchmarking),
/// otherwise from `--kernel`.
fn resolve_kernel(sub: &clap::ArgMatches) -> Result<KernelKind> {
    if let Ok(from_env) = std::env::var("RS_KERNEL") {
        log::info!("RS_KERNEL={from_env} overriding --kernel");
        return cli::parse_kernel_name(&from_env);
    }
    let name = sub.get_one::<String>("kernel").expect("has a default value");
    cli::parse_kernel_name(name)
}

fn shard_paths(sub: &clap::ArgMatches) -> Vec<String> {
    sub.get_many::<String>("shard")
        .expect("required")
        .cloned()
        .collect()
}

fn read_shards(paths: &[String]) -> Result<Vec<Vec<u8>>> {
    paths
        .iter()
        .map(|p| fs::read(p).with_context(|| format!("reading shard {p}")))
        .collect()
}

/// Resolves the `[offset, offset+length)` window, defaulting `length` to
/// "the rest of the shortest shard" when not given.
fn resolve_window(sub: &clap::ArgMatches, shard_len: usize) -> Result<(usize, usize)> {
    let offset = *sub.get_one::<usize>("offset").expect("has a default value");
    let length = match sub.get_one::<usize>("length") {
        Some(&len) => len,
        None => shard_len.saturating_sub(offset),
    };
    if offset + length > shard_len {
        bail!("window [{offset}, {}) exceeds shard length {shard_len}", offset + length);
    }
    Ok((offset, length))
}

fn run_encode(sub: &clap::ArgMatches) -> Result<()> {
    let k = *sub.get_one::<usize>("k").expect("required");
    let m = *sub.get_one::<usize>("m").expect("required");
    let kernel = resolve_kernel(sub)?;
    let paths = shard_paths(sub);
    if paths.len() != k + m {
        bail!("expected {} --shard paths (k+m), got {}", k + m, paths.len());
    }

    let data: Vec<Vec<u8>> = paths[..k]
        .iter()
        .map(|p| fs::read(p).with_context(|| format!("reading data shard {p}")))
        .collect::<Result<_>>()?;
    let shard_len = data.first().map_or(0, |s| s.len());
    if data.iter().any(|s| s.len() != shard_len) {
        bail!("all data shards must have identical length");
    }
    let mut parity: Vec<Vec<u8>> = vec![vec![0u8; shard_len]; m];

    let (offset, length) = resolve_window(sub, shard_len)?;
    let rs = ReedSolomon::new(k, m, kernel)?;

    log::info!(
        "encoding k={k} m={m} kernel={kernel:?} window=[{offset}, {})",
        offset + length
    );
    encode_parallel(&rs, &data, &mut parity, offset, length)?;

    for (path, shard) in paths[k..].iter().zip(parity.iter()) {
        fs::write(path, shard).with_context(|| format!("writing parity shard {path}"))?;
    }
    Ok(())
}

/// Fans a large encode request out across disjoint byte-range chunks using
/// one shared, read-only [`ReedSolomon`] instance, matching this codebase's
/// existing use of `rayon` for partitioned, lock-free parallelism.
///
/// Each chunk is encoded against its own owned copy of the relevant data
/// window rather than a shared borrow of `data`/`parity`, so the fan-out
/// needs no unsafe aliasing tricks: chunks are independent allocations and
/// `rayon` can freely run them on any thread.
fn encode_parallel(
    rs: &ReedSolomon,
    data: &[Vec<u8>],
    parity: &mut [Vec<u8>],
    offset: usize,
    length: usize,
) -> Result<()> {
    if length == 0 {
        return Ok(());
    }
    let chunk_count = rayon::current_num_threads().max(1);
    let chunk_size = length.div_ceil(chunk_count).max(1);

    let chunks: Vec<(usize, usize)> = (offset..offset + length)
        .step_by(chunk_size)
        .map(|start| (start, chunk_size.min(offset + length - start)))
        .collect();

    let encoded: Vec<(usize, usize, Vec<Vec<u8>>)> = chunks
        .into_par_iter()
        .map(|(start, len)| -> Result<(usize, usize, Vec<Vec<u8>>)> {
            let mut window: Vec<Vec<u8>> = data
                .iter()
                .map(|s| s[start..start + len].to_vec())
                .chain(std::iter::repeat_with(|| vec![0u8; len]).take(parity.len()))
                .collect();
            {
                let mut refs: Vec<&mut [u8]> = window.iter_mut().map(|s| s.as_mut_slice()).collect();
                rs.encode_parity(&mut refs, 0, len)?;
            }
            Ok((start, len, window.split_off(data.len())))
        })
        .collect::<Result<Vec<_>>>()?;

    for (start, len, parity_window) in encoded {
        for (shard, chunk) in parity.iter_mut().zip(parity_window) {
            shard[start..start + len].copy_from_slice(&chunk);
        }
    }
    Ok(())
}

fn run_verify(sub: &clap::ArgMatches) -> Result<()> {
    let k = *sub.get_one::<usize>("k").expect("required");
    let m = *sub.get_one::<usize>("m").expect("required");
    let kernel = resolve_kernel(sub)?;
    let paths = shard_paths(sub);
    if paths.len() != k + m {
        bail!("expected {} --shard paths (k+m), got {}", k + m, paths.len());
    }

    let shards = read_shards(&paths)?;
    let shard_len = shards.first().map_or(0, |s| s.len());
    let (offset, length) = resolve_window(sub, shard_len)?;

    let rs = ReedSolomon::new(k, m, kernel)?;
    let refs: Vec<&[u8]> = shards.iter().map(|s| s.as_slice()).collect();
    let mut scratch = vec![0u8; offset + length];
    let ok = rs.is_parity_correct(&refs, offset, length, Some(&mut scratch))?;

    if ok {
        println!("OK: parity is consistent with data");
        Ok(())
    } else {
        println!("FAILED: parity does not match data");
        std::process::exit(1);
    }
}

fn run_decode(sub: &clap::ArgMatches) -> Result<()> {
    let k = *sub.get_one::<usize>("k").expect("required");
    let m = *sub.get_one::<usize>("m").expect("required");
    let kernel = resolve_kernel(sub)?;
    let paths = shard_paths(sub);
    if paths.len() != k + m {
        bail!("expected {} --shard paths (k+m), got {}", k + m, paths.len());
    }
    let missing: Vec<usize> = sub
        .get_many::<usize>("missing")
        .map(|vs| vs.copied().collect())
        .unwrap_or_default();
    for &idx in &missing {
        if idx >= k + m {
            bail!("--missing {idx} is out of range for {} shards", k + m);
        }
    }

    let mut shards: Vec<Vec<u8>> = Vec::with_capacity(paths.len());
    let mut known_len = None;
    for (i, path) in paths.iter().enumerate() {
        if missing.contains(&i) {
            shards.push(Vec::new()); // length fixed up below once known_len is set.
        } else {
            let bytes = fs::read(path).with_context(|| format!("reading shard {path}"))?;
            known_len.get_or_insert(bytes.len());
            shards.push(bytes);
        }
    }
    let shard_len = known_len.context("all shards are missing; nothing to reconstruct from")?;
    for (i, shard) in shards.iter_mut().enumerate() {
        if missing.contains(&i) {
            shard.resize(shard_len, 0);
        } else if shard.len() != shard_len {
            bail!("shard {i} has length {} but expected {shard_len}", shard.len());
        }
    }

    let (offset, length) = resolve_window(sub, shard_len)?;
    let present: Vec<bool> = (0..paths.len()).map(|i| !missing.contains(&i)).collect();

    let rs = ReedSolomon::new(k, m, kernel)?;
    log::info!("decoding with {} of {} shards present", present.iter().filter(|&&p| p).count(), k + m);
    {
        let mut refs: Vec<&mut [u8]> = shards.iter_mut().map(|s| s.as_mut_slice()).collect();
        rs.decode_missing(&mut refs, &present, offset, length)?;
    }

    for &idx in &missing {
        fs::write(&paths[idx], &shards[idx])
            .with_context(|| format!("writing reconstructed shard {}", paths[idx]))?;
    }
    Ok(())
}
