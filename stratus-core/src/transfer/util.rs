use super::{Error, Event, Options, Output, Transfer};
use crate::config::sync;
use futures::prelude::*;

impl Transfer {
    pub async fn version_string(&self, strategy: sync::Strategy) -> Result<String, Error> {
        let mut process = self.run(
            strategy,
            &["--version"],
            &Options {
                stdout: Output::Capture,
                ..Default::default()
            },
        )?;
        let mut version = None;
        while let Some(event) = process.next().await {
            match event.map_err(Error::SubprocessIoError)? {
                Event::StdoutLine(line) => {
                    if let Some(v) = version_line(&line) {
                        version = Some(v.to_string());
                        break;
                    }
                }
                Event::StderrLine(_) => {}
            }
        }
        process.wait().await?;
        version.ok_or(Error::FailedToGetVersion)
    }
}

fn version_line(line: &str) -> Option<&str> {
    Some(line.trim()).filter(|s| !s.is_empty())
}
