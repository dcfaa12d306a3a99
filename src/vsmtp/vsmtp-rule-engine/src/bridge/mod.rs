/*
 * vSMTP mail transfer agent
 * Copyright (C) 2022 viridIT SAS
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License along with
 * this program. If not, see https://www.gnu.org/licenses/.
 *
*/

use crate::{BridgeError, VerdictSender};
use tokio_stream::StreamExt;
use vsmtp_common::{FilterPhase, FilterResponse};

mod protocol;
mod reader;
mod writer;

pub use protocol::{format_request, parse_response, LINE_MAX};
pub use reader::{ReadError, Reader};
pub use writer::Writer;

/// Task serving a filter, it ends with the first error.
pub type FilterTask = tokio::task::JoinHandle<Result<(), BridgeError>>;

#[derive(Debug)]
struct FilterInstance {
    name: String,
    outbound: tokio::sync::mpsc::UnboundedSender<String>,
}

/// The external filters attached, by name.
///
/// Requests are written by a task per filter, and the responses are turned
/// into verdicts sent to the session. The filters are attached at startup,
/// the bridge is read-only afterward.
///
/// The bridge owns the channel of the session: local and delegated verdicts
/// are all delivered on it.
#[derive(Debug)]
pub struct FilterBridge {
    verdicts: VerdictSender,
    filters: std::collections::HashMap<String, FilterInstance>,
}

impl FilterBridge {
    /// Create a bridge delivering the verdicts to `verdicts`.
    #[must_use]
    pub fn new(verdicts: VerdictSender) -> Self {
        Self {
            verdicts,
            filters: std::collections::HashMap::new(),
        }
    }

    /// Send a verdict to the session.
    ///
    /// # Errors
    ///
    /// * [`BridgeError::SessionClosed`] the receiver of the session is dropped
    pub fn deliver(&self, response: FilterResponse) -> Result<(), BridgeError> {
        self.verdicts
            .send(response)
            .map_err(|_| BridgeError::SessionClosed)
    }

    /// Is a filter attached under this name ?
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Attach the connection of a filter process.
    ///
    /// The returned task ends with an error if the filter misbehaves or closes
    /// the connection, the owner must then stop the filter subsystem. It ends
    /// successfully when the bridge is dropped.
    ///
    /// Must be called from a tokio runtime.
    pub fn attach<S>(&mut self, name: impl Into<String>, stream: S) -> FilterTask
    where
        S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Send + 'static,
    {
        let name = name.into();
        let verdicts = self.verdicts.clone();
        let (outbound, requests) = tokio::sync::mpsc::unbounded_channel();

        if let Some(previous) = self.filters.insert(
            name.clone(),
            FilterInstance {
                name: name.clone(),
                outbound,
            },
        ) {
            tracing::warn!(
                filter = %previous.name,
                "Filter attached twice, the previous connection is dropped."
            );
        }

        tokio::spawn(async move {
            let (read_half, write_half) = tokio::io::split(stream);

            let result = tokio::select! {
                result = read_responses(&name, read_half, verdicts) => result,
                result = write_requests(&name, write_half, requests) => result,
            };

            if let Err(error) = &result {
                tracing::error!(filter = %name, %error, "Filter subsystem failure.");
            }
            result
        })
    }

    /// Ask `filter` for the verdict of a phase. The verdict is sent to the
    /// session once the filter answers.
    ///
    /// # Errors
    ///
    /// * [`BridgeError::UnknownFilter`] the filter is not attached
    /// * [`BridgeError::FilterClosed`] the task of the filter has stopped
    pub fn send_request(
        &self,
        filter: &str,
        reqid: u64,
        phase: FilterPhase,
        param: &str,
    ) -> Result<(), BridgeError> {
        let instance = self
            .filters
            .get(filter)
            .ok_or_else(|| BridgeError::UnknownFilter(filter.to_string()))?;

        instance
            .outbound
            .send(format_request(reqid, phase, param))
            .map_err(|_| BridgeError::FilterClosed(instance.name.clone()))
    }
}

async fn read_responses<R>(
    filter: &str,
    read_half: R,
    verdicts: VerdictSender,
) -> Result<(), BridgeError>
where
    R: tokio::io::AsyncRead + Unpin + Send,
{
    let mut reader = Reader::new(read_half, LINE_MAX);
    let stream = reader.as_line_stream();
    tokio::pin!(stream);

    while let Some(line) = stream.next().await {
        let line = line.map_err(|error| match error {
            ReadError::Io(source) => BridgeError::Io {
                filter: filter.to_string(),
                source,
            },
            ReadError::Violation(violation) => BridgeError::MisbehavingFilter {
                filter: filter.to_string(),
                line: String::new(),
                violation,
            },
        })?;

        let response = parse_response(&line).map_err(|violation| {
            BridgeError::MisbehavingFilter {
                filter: filter.to_string(),
                line: line.clone(),
                violation,
            }
        })?;

        tracing::debug!(
            filter,
            reqid = response.reqid,
            phase = %response.phase,
            verdict = %response.verdict,
            "Filter response."
        );

        verdicts
            .send(response)
            .map_err(|_| BridgeError::SessionClosed)?;
    }

    Err(BridgeError::FilterClosed(filter.to_string()))
}

async fn write_requests<W>(
    filter: &str,
    write_half: W,
    mut requests: tokio::sync::mpsc::UnboundedReceiver<String>,
) -> Result<(), BridgeError>
where
    W: tokio::io::AsyncWrite + Unpin + Send,
{
    let mut writer = Writer::new(write_half);

    while let Some(request) = requests.recv().await {
        writer
            .write_all(&request)
            .await
            .map_err(|source| BridgeError::Io {
                filter: filter.to_string(),
                source,
            })?;
    }

    Ok(())
}
