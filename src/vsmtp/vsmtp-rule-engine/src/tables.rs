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

use crate::TableError;
use vsmtp_common::{iter_to_root, Lookup, LookupKind};
use vsmtp_config::field::FieldTable;

/// A lookup table, loaded in memory.
#[derive(Debug, Clone)]
pub enum Table {
    /// Addresses, networks, domains or mail addresses.
    List(Vec<String>),
    /// Regular expressions.
    Regex(regex::RegexSet),
}

impl Table {
    /// Load a table of the configuration, reading its file if any.
    ///
    /// # Errors
    ///
    /// * the csv file cannot be read
    /// * the delimiter is not an ascii character
    /// * a pattern is invalid
    pub fn load(name: &str, field: &FieldTable) -> Result<Self, TableError> {
        match field {
            FieldTable::Static { values } => Ok(Self::List(values.clone())),
            FieldTable::File { path, delimiter } => {
                let delimiter = u8::try_from(*delimiter)
                    .ok()
                    .filter(u8::is_ascii)
                    .ok_or_else(|| TableError::InvalidDelimiter {
                        table: name.to_string(),
                        delimiter: *delimiter,
                    })?;

                let csv_error = |source| TableError::Csv {
                    table: name.to_string(),
                    path: path.clone(),
                    source,
                };

                let mut reader = csv::ReaderBuilder::new()
                    .has_headers(false)
                    .flexible(true)
                    .comment(Some(b'#'))
                    .trim(csv::Trim::All)
                    .delimiter(delimiter)
                    .from_path(path)
                    .map_err(csv_error)?;

                let mut entries = vec![];
                for record in reader.records() {
                    let record = record.map_err(csv_error)?;
                    if let Some(key) = record.get(0).filter(|key| !key.is_empty()) {
                        entries.push(key.to_string());
                    }
                }

                tracing::debug!(table = name, count = entries.len(), "Table loaded.");
                Ok(Self::List(entries))
            }
            FieldTable::Regex { patterns } => regex::RegexSet::new(patterns)
                .map(Self::Regex)
                .map_err(|source| TableError::Regex {
                    table: name.to_string(),
                    source,
                }),
        }
    }

    /// Number of entries matching `key`.
    #[must_use]
    pub fn count(&self, key: &str, kind: LookupKind) -> usize {
        match (self, kind) {
            (Self::Regex(set), _) => set.matches(key).iter().count(),
            (Self::List(_), LookupKind::Regex) => 0,
            (Self::List(entries), LookupKind::NetAddr) => count_netaddr(entries, key),
            (Self::List(entries), LookupKind::Domain) => {
                entries.iter().filter(|e| domain_matches(e, key)).count()
            }
            (Self::List(entries), LookupKind::MailAddr) => {
                entries.iter().filter(|e| mailaddr_matches(e, key)).count()
            }
        }
    }
}

fn count_netaddr(entries: &[String], key: &str) -> usize {
    let addr = key.parse::<std::net::IpAddr>().ok();

    entries
        .iter()
        .filter(|entry| {
            if entry.as_str() == key {
                return true;
            }
            addr.map_or(false, |addr| match entry.parse::<ipnet::IpNet>() {
                Ok(net) => net.contains(&addr),
                Err(_) => entry
                    .parse::<std::net::IpAddr>()
                    .map_or(false, |entry| entry == addr),
            })
        })
        .count()
}

/// `.example.com` matches every sub-domain of `example.com`.
fn domain_matches(entry: &str, key: &str) -> bool {
    let key = key.trim_end_matches('.');

    match entry.strip_prefix('.') {
        Some(parent) => iter_to_root(key).any(|domain| domain.eq_ignore_ascii_case(parent)),
        None => entry.trim_end_matches('.').eq_ignore_ascii_case(key),
    }
}

/// `@example.com` and `example.com` match any user of `example.com`.
fn mailaddr_matches(entry: &str, key: &str) -> bool {
    let domain = key.rsplit_once('@').map_or("", |(_, domain)| domain);

    match entry.split_once('@') {
        Some(("", entry_domain)) => entry_domain.eq_ignore_ascii_case(domain),
        Some(_) => entry.eq_ignore_ascii_case(key),
        None => entry.eq_ignore_ascii_case(domain),
    }
}

/// The lookup tables declared in the configuration.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    tables: std::collections::HashMap<String, Table>,
}

impl Tables {
    /// Load every table of the configuration.
    ///
    /// # Errors
    ///
    /// * see [`Table::load`]
    pub fn from_config(
        tables: &std::collections::BTreeMap<String, FieldTable>,
    ) -> Result<Self, TableError> {
        tables
            .iter()
            .map(|(name, field)| Table::load(name, field).map(|table| (name.clone(), table)))
            .collect::<Result<_, _>>()
            .map(|tables| Self { tables })
    }

    /// Add or replace a table.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    ///
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}

impl Lookup for Tables {
    fn lookup(&self, source: &str, key: &str, kind: LookupKind) -> usize {
        self.tables.get(source).map_or_else(
            || {
                tracing::warn!(table = source, "Lookup in an unknown table.");
                0
            },
            |table| {
                let count = table.count(key, kind);
                tracing::trace!(table = source, key, %kind, count, "Lookup.");
                count
            },
        )
    }
}
