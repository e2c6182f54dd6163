use std::{
    ffi::OsString,
    io::{self, IsTerminal as _},
    path::PathBuf,
};

use clap::{CommandFactory as _, Parser};
use gitinject::{
    Command, DEFAULT_FALLBACK_VERSION, DEFAULT_GEN_DIR, GenDir, Git, Resolver,
    git::DEFAULT_GIT_BIN,
};
use no_color::is_no_color;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

const BUILD_VERSION: &str = env!("GITINJECT_BUILD_VERSION");
const BUILD_SHA: &str = env!("GITINJECT_BUILD_SHA");

/// Long flags that may also be spelled with a single dash, e.g. `-cmd show`.
const LONG_FLAGS: [&str; 5] = ["cmd", "repo", "genDir", "fallbackVer", "git"];

#[derive(Debug, Parser)]
#[clap(author, version = BUILD_VERSION, about, long_about = None)]
struct Opts {
    /// Command to execute: help, show or gen
    #[clap(long, default_value = "help")]
    cmd: String,
    /// Git repository
    #[clap(long, env = "GITINJECT_REPO", default_value = ".")]
    repo: PathBuf,
    /// Directory to generate files with git info, relative to the working directory
    #[clap(long = "genDir", env = "GITINJECT_GEN_DIR", default_value = DEFAULT_GEN_DIR)]
    gen_dir: String,
    /// Version used when HEAD has no semantic version tag
    #[clap(long = "fallbackVer", env = "GITINJECT_FALLBACK_VER", default_value = DEFAULT_FALLBACK_VERSION)]
    fallback_ver: String,
    /// Git executable
    #[clap(long, env = "GITINJECT_GIT", default_value = DEFAULT_GIT_BIN)]
    git: PathBuf,
}

impl Opts {
    fn resolver(&self) -> Resolver {
        Resolver::builder(&self.repo)
            .fallback(&self.fallback_ver)
            .git(Git::new(&self.git))
            .build()
    }
}

/// Rewrites `-flag` and `-flag=value` into their double-dash form.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut terminated = false;
    args.into_iter()
        .map(|arg| {
            if terminated {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                terminated = true;
                return arg;
            }
            let Some(flag) = s.strip_prefix('-').filter(|f| !f.starts_with('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}

fn usage() -> String {
    format!(
        "Version: {BUILD_VERSION} (sha: {BUILD_SHA})\n{}",
        Opts::command().render_help()
    )
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_ansi(!is_no_color() && io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn try_main(opts: &Opts) -> anyhow::Result<()> {
    let command: Command = opts.cmd.parse()?;
    tracing::debug!(%command, repo = %opts.repo.display(), "dispatching");

    match command {
        Command::Help => print!("{}", usage()),
        Command::Show => {
            let info = opts.resolver().resolve()?;
            println!("sha: {}\nver: {}", info.commit_id, info.version);
        }
        Command::Gen => {
            // Validate before any git process runs so a bad directory writes nothing.
            let gen_dir = GenDir::new(&opts.gen_dir)?;
            let info = opts.resolver().resolve()?;
            info.write(&gen_dir)?;
        }
    }

    Ok(())
}

#[allow(clippy::exit)]
fn main() {
    let opts = match Opts::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(opts) => opts,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_tracing();

    if let Err(e) = try_main(&opts) {
        eprintln!("{e}");
        eprint!("{}", usage());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().map(OsString::from))
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test_case(&["gitinject", "-cmd", "show"], &["gitinject", "--cmd", "show"]; "single dash")]
    #[test_case(&["gitinject", "-genDir=out"], &["gitinject", "--genDir=out"]; "single dash with value")]
    #[test_case(&["gitinject", "-genDir="], &["gitinject", "--genDir="]; "empty value")]
    #[test_case(&["gitinject", "--cmd", "gen"], &["gitinject", "--cmd", "gen"]; "double dash")]
    #[test_case(&["gitinject", "-h"], &["gitinject", "-h"]; "short help")]
    #[test_case(&["gitinject", "-unknown"], &["gitinject", "-unknown"]; "unknown flag")]
    #[test_case(&["gitinject", "--", "-cmd"], &["gitinject", "--", "-cmd"]; "after terminator")]
    fn test_normalize_args(args: &[&str], expected: &[&str]) {
        assert_eq!(expected, normalize(args));
    }

    #[test]
    fn test_opts_defaults() {
        let opts = Opts::try_parse_from(normalize_args([OsString::from("gitinject")])).unwrap();
        assert_eq!("help", opts.cmd);
        assert_eq!(PathBuf::from("."), opts.repo);
        assert_eq!(".gitinject", opts.gen_dir);
        assert_eq!("<dev>", opts.fallback_ver);
    }

    #[test]
    fn test_usage() {
        let usage = usage();
        assert!(usage.starts_with(&format!("Version: {BUILD_VERSION} (sha: {BUILD_SHA})\n")));
        assert!(usage.contains("--genDir <GEN_DIR>"));
        assert!(usage.contains("--fallbackVer <FALLBACK_VER>"));
    }

    #[test]
    fn test_verify_cli() {
        Opts::command().debug_assert();
    }
}
