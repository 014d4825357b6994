use crate::{
    config::{destination, sync},
    transfer::{self, Event, Options, Transfer},
};
use futures::StreamExt;

pub mod cancellation;
mod progress;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Batch {
    pub destination: destination::Definition,
    pub delete_extraneous: bool,
    pub sources: Vec<sync::Source>,
}

impl Batch {
    pub fn from_definitions(
        sync: &sync::Definition,
        destination: &destination::Definition,
    ) -> Batch {
        Batch {
            destination: destination.clone(),
            delete_extraneous: sync.delete_extraneous,
            sources: sync.sources.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidBatch> {
        if self.destination.path.0.is_empty() {
            return Err(InvalidBatch::NoDestination);
        }
        if self.sources.is_empty() {
            return Err(InvalidBatch::NoSources);
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBatch {
    #[error("batch contains no sources")]
    NoSources,
    #[error("batch destination path is empty")]
    NoDestination,
}

#[derive(Debug, thiserror::Error)]
#[error("error backing up '{}'", source.0)]
pub struct Failure {
    pub source: sync::Path,
    #[source]
    pub error: transfer::Error,
    pub stderr: Vec<String>,
}

impl Failure {
    /// the collected stderr of the failed process, or the error message if it
    /// produced none
    pub fn diagnostic(&self) -> String {
        if self.stderr.is_empty() {
            self.error.to_string()
        } else {
            self.stderr.join("\n")
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Completed,
    Failed(Failure),
    Cancelled,
    Invalid(InvalidBatch),
}

/// Callbacks for batch lifecycle events, invoked synchronously from the runner.
pub trait Observer {
    fn source_started(&mut self, _source: &sync::Source) {}

    fn source_succeeded(&mut self, _source: &sync::Source) {}

    fn progress(&mut self, _percent: u8) {}

    fn completed(&mut self) {}

    fn failed(&mut self, _failure: &Failure) {}

    fn cancelled(&mut self) {}
}

#[derive(Debug)]
pub struct Runner {
    transfer: Transfer,
}

impl Runner {
    pub fn new(transfer: Transfer) -> Self {
        Runner { transfer }
    }

    #[tracing::instrument(name = "batch", skip_all, fields(destination = %batch.destination.path.0, sources = batch.sources.len()))]
    pub async fn execute(
        &self,
        batch: &Batch,
        observer: &mut dyn Observer,
        cancellation: &cancellation::Token,
    ) -> Outcome {
        if let Err(invalid) = batch.validate() {
            tracing::error!(%invalid, "refusing to run invalid batch");
            return Outcome::Invalid(invalid);
        }

        for source in &batch.sources {
            if cancellation.is_cancelled() {
                tracing::info!("cancelled before '{}'", source.path.0);
                observer.cancelled();
                return Outcome::Cancelled;
            }

            tracing::info!("backing up '{}'", source.path.0);
            observer.source_started(source);
            match self.run_source(batch, source, observer).await {
                Ok(()) => {
                    tracing::info!("finished '{}'", source.path.0);
                    observer.source_succeeded(source);
                }
                Err(failure) => {
                    tracing::error!(error = %failure, "failed");
                    observer.failed(&failure);
                    return Outcome::Failed(failure);
                }
            }
        }

        if cancellation.is_cancelled() {
            observer.cancelled();
            return Outcome::Cancelled;
        }
        observer.completed();
        Outcome::Completed
    }

    async fn run_source(
        &self,
        batch: &Batch,
        source: &sync::Source,
        observer: &mut dyn Observer,
    ) -> Result<(), Failure> {
        let mut process = self
            .transfer
            .transfer(
                source,
                &batch.destination.path,
                batch.delete_extraneous,
                &Options::capture_output(),
            )
            .map_err(|error| Failure {
                source: source.path.clone(),
                error,
                stderr: Vec::new(),
            })?;

        let mut tracker = progress::Tracker::new();
        let mut stderr = Vec::new();
        while let Some(event) = process.next().await {
            match event {
                Ok(Event::StdoutLine(line)) => {
                    if let Some(percent) = tracker.update(&line) {
                        observer.progress(percent);
                    }
                    tracing::debug!("{}", line);
                }
                Ok(Event::StderrLine(line)) => {
                    tracing::warn!("{}", line);
                    stderr.push(line);
                }
                Err(error) => {
                    // output trouble never fails the source, only the exit status does
                    tracing::warn!(%error, "error reading transfer output");
                    break;
                }
            }
        }

        match process.wait().await.and_then(|status| status.check_status()) {
            Ok(()) => Ok(()),
            Err(error) => Err(Failure {
                source: source.path.clone(),
                error,
                stderr,
            }),
        }
    }
}
