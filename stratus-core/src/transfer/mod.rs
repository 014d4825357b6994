use crate::config::{destination, sync};
use std::{ffi::OsStr, path::PathBuf, process::Stdio};
use tokio::process::Command;

pub use process::*;

mod process;
mod util;

#[derive(Debug, Default, Copy, Clone)]
pub enum Output {
    #[default]
    Null,
    Inherit,
    Capture,
}

impl From<Output> for Stdio {
    fn from(v: Output) -> Self {
        match v {
            Output::Null => Stdio::null(),
            Output::Inherit => Stdio::inherit(),
            Output::Capture => Stdio::piped(),
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Options {
    pub stdout: Output,
    pub stderr: Output,
}

impl Options {
    pub fn capture_output() -> Options {
        Options {
            stdout: Output::Capture,
            stderr: Output::Capture,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub cp_binary: PathBuf,
    pub rsync_binary: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cp_binary: PathBuf::from("cp"),
            rsync_binary: PathBuf::from("rsync"),
        }
    }
}

impl Config {
    fn binary(&self, strategy: sync::Strategy) -> &PathBuf {
        match strategy {
            sync::Strategy::Copy => &self.cp_binary,
            sync::Strategy::Mirror => &self.rsync_binary,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start transfer process")]
    FailedToStartProcess(#[source] std::io::Error),
    #[error("error reading from subprocess output")]
    SubprocessIoError(#[source] std::io::Error),
    #[error("error getting subprocess status")]
    SubprocessStatusError(#[source] std::io::Error),
    #[error("{}", .0.message())]
    TransferFailed(ExitStatus),
    #[error("couldn't determine version from output")]
    FailedToGetVersion,
}

#[derive(Debug)]
pub struct Transfer {
    config: Config,
}

impl Transfer {
    pub fn new(config: Config) -> Self {
        Transfer { config }
    }

    pub fn transfer(
        &self,
        source: &sync::Source,
        destination: &destination::Path,
        delete_extraneous: bool,
        options: &Options,
    ) -> Result<TransferProcess, Error> {
        let args = match source.strategy {
            sync::Strategy::Copy => Self::copy_args(source, destination),
            sync::Strategy::Mirror => Self::mirror_args(source, destination, delete_extraneous),
        };
        self.run(source.strategy, &args, options)
    }

    pub fn run(
        &self,
        strategy: sync::Strategy,
        args: &[impl AsRef<OsStr>],
        options: &Options,
    ) -> Result<TransferProcess, Error> {
        let mut cmd = Command::new(self.config.binary(strategy));
        cmd.stdin(Stdio::null())
            .stdout(options.stdout)
            .stderr(options.stderr)
            // kill-on-drop is a final fallback, normally the process runs to completion
            .kill_on_drop(true);

        for arg in args {
            cmd.arg(arg.as_ref());
        }

        let child = cmd.spawn().map_err(Error::FailedToStartProcess)?;
        Ok(TransferProcess::new(child))
    }

    // cp has no exclude support, excludes only apply to mirror sources
    fn copy_args(source: &sync::Source, destination: &destination::Path) -> Vec<String> {
        let mut args = vec!["-r".to_owned()];
        for arg in &source.extra_args {
            args.push(arg.clone());
        }
        args.push(source.path.0.clone());
        args.push(format!("{}/", destination.0));
        args
    }

    fn mirror_args(
        source: &sync::Source,
        destination: &destination::Path,
        delete_extraneous: bool,
    ) -> Vec<String> {
        let mut args = vec!["-ah".to_owned(), "--progress".to_owned()];
        for exclude in &source.excludes {
            args.push("--exclude".to_owned());
            args.push(exclude.0.clone());
        }
        if delete_extraneous {
            args.push("--delete".to_owned());
        }
        for arg in &source.extra_args {
            args.push(arg.clone());
        }
        args.push(format!("{}/", source.path.0));
        args.push(format!("{}/", destination.0));
        args
    }
}
