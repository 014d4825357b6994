use super::Error;
use futures::{prelude::*, stream::BoxStream};
use tokio::{
    io::{AsyncBufReadExt as _, BufReader},
    process::Child,
};
use tokio_stream::wrappers::LinesStream;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum ExitStatus {
    Successful,
    Failed(Option<i32>),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        self == &ExitStatus::Successful
    }

    pub fn check_status(&self) -> Result<(), Error> {
        if self.success() {
            Ok(())
        } else {
            Err(Error::TransferFailed(*self))
        }
    }

    pub fn message(&self) -> String {
        match self {
            ExitStatus::Successful => "transfer process exited successfully".to_owned(),
            ExitStatus::Failed(Some(code)) => {
                format!("transfer process exited with error status {}", code)
            }
            ExitStatus::Failed(None) => {
                "transfer process exited with unknown error status".to_owned()
            }
        }
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if status.success() {
            ExitStatus::Successful
        } else {
            ExitStatus::Failed(status.code())
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Event {
    StdoutLine(String),
    StderrLine(String),
}

fn merge_output_streams(child: &'_ mut Child) -> BoxStream<'static, std::io::Result<Event>> {
    let stdout = child
        .stdout
        .take()
        .map(|io| LinesStream::new(BufReader::new(io).lines()).map_ok(Event::StdoutLine));
    let stderr = child
        .stderr
        .take()
        .map(|io| LinesStream::new(BufReader::new(io).lines()).map_ok(Event::StderrLine));

    match (stdout, stderr) {
        (Some(stdout), Some(stderr)) => Box::pin(stream::select(stdout, stderr)),
        (Some(stdout), None) => Box::pin(stdout),
        (None, Some(stderr)) => Box::pin(stderr),
        (None, None) => Box::pin(stream::empty()),
    }
}

pub struct TransferProcess {
    child: Child,
    events: BoxStream<'static, std::io::Result<Event>>,
}

impl std::fmt::Debug for TransferProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferProcess")
            .field("child", &self.child)
            .field("events", &"<...>")
            .finish()
    }
}

impl TransferProcess {
    pub(super) fn new(mut child: Child) -> Self {
        let events = merge_output_streams(&mut child);
        TransferProcess { child, events }
    }

    pub async fn wait(&mut self) -> Result<ExitStatus, Error> {
        while let Some(_) = self.next().await {}
        self.child
            .wait()
            .await
            .map(ExitStatus::from)
            .map_err(Error::SubprocessStatusError)
    }

    pub async fn check_wait(&mut self) -> Result<(), Error> {
        self.wait().await?.check_status()
    }
}

impl Stream for TransferProcess {
    type Item = std::io::Result<Event>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.events.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}
