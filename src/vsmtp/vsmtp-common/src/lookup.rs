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

/// How a key must be compared with the entries of a table.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    strum::EnumString,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    /// an ip address, matched against addresses or networks.
    NetAddr,
    /// a domain name.
    Domain,
    /// a mail address, without the enclosing `<>`.
    MailAddr,
    /// any string, matched against regular expressions.
    Regex,
}

/// Table and regex lookup service consulted by the filters.
///
/// `source` is the name of the table declared in the configuration.
/// The returned value is the number of matching entries, `0` if the key
/// (or the table) is unknown.
pub trait Lookup: Send + Sync {
    ///
    fn lookup(&self, source: &str, key: &str, kind: LookupKind) -> usize;
}

impl<T: Lookup + ?Sized> Lookup for std::sync::Arc<T> {
    fn lookup(&self, source: &str, key: &str, kind: LookupKind) -> usize {
        (**self).lookup(source, key, kind)
    }
}
