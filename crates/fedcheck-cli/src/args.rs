//! Legacy flag spelling
//!
//! Build rules written for the previous tooling pass long flags with a
//! single dash (`-subgraph a=b`, `-tenant=ADMIN`). Those are rewritten to
//! `--subgraph` before clap sees them. Only flags the command actually
//! declares are touched, and nothing after a bare `--`.

use clap::Command;
use std::ffi::OsString;

/// Rewrite single-dash long flags known to `command` into double-dash form
///
/// The first item is the program name and is passed through unchanged.
pub fn normalize_args<I, T>(command: &Command, args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let longs: Vec<&str> = command
        .get_arguments()
        .filter_map(clap::Arg::get_long)
        .collect();

    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        out.push(rewrite(arg, &longs));
    }
    out
}

fn rewrite(arg: OsString, longs: &[&str]) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if longs.contains(&name) {
        OsString::from(format!("-{text}"))
    } else {
        arg
    }
}
