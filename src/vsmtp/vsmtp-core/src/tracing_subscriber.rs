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

//! Logging backend of the command line: stderr, stdout with `--stdout`,
//! and the file set in the `[logs]` section of the configuration.

use crate::Args;
use vsmtp_config::Config;

#[cfg(debug_assertions)]
macro_rules! get_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_target(true)
            .with_ansi(false)
    };
}

#[cfg(not(debug_assertions))]
macro_rules! get_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_thread_ids(false)
            .with_target(false)
            .with_ansi(false)
    };
}

fn env_filter(config: &Config) -> tracing_subscriber::EnvFilter {
    config
        .logs
        .level
        .iter()
        .fold(tracing_subscriber::EnvFilter::default(), |filter, directive| {
            filter.add_directive(directive.clone())
        })
}

/// Initialize the tracing subsystem.
///
/// The logs are written to stderr (stdout with `--stdout`), and to the
/// file of `logs.filepath` if any.
///
/// # Errors
///
/// * The logs path in the configuration file is invalid.
/// * Failed to initialize the tracing subsystem.
pub fn initialize(args: &Args, config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let subscriber = tracing_subscriber::registry().with(env_filter(config));

    let subscriber = subscriber.with(if args.stdout {
        get_fmt!()
            .with_writer(tracing_subscriber::fmt::writer::BoxMakeWriter::new(
                std::io::stdout,
            ))
            .with_ansi(true)
    } else {
        get_fmt!().with_writer(tracing_subscriber::fmt::writer::BoxMakeWriter::new(
            std::io::stderr,
        ))
    });

    if let Some(filepath) = &config.logs.filepath {
        let writer = if let (Some(directory), Some(file_name)) = (
            filepath.parent(),
            filepath.file_name().and_then(std::ffi::OsStr::to_str),
        ) {
            tracing_appender::rolling::never(directory, file_name)
        } else {
            anyhow::bail!("filepath for logs at {filepath:?} does not have a parent or is not valid")
        };

        subscriber
            .with(get_fmt!().with_writer(writer))
            .try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| anyhow::anyhow!("{e}"))
}
