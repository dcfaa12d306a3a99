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

use crate::{RuleEngine, Rules, Table, Tables};

mod rules;

pub fn list(entries: &[&str]) -> Table {
    Table::List(entries.iter().map(ToString::to_string).collect())
}

pub fn tables() -> Tables {
    let mut tables = Tables::default();
    tables.insert("blocklist", list(&["bad@x", "@spam.example.net"]));
    tables.insert("clients", list(&["192.0.2.0/24", "2001:db8::1"]));
    tables.insert("helos", list(&[".example.org", "localhost"]));
    tables.insert(
        "patterns",
        Table::Regex(regex::RegexSet::new(["^spam", "example\\.com$"]).unwrap()),
    );
    tables
}

pub fn engine(rules: Rules) -> RuleEngine {
    RuleEngine::new(rules, std::sync::Arc::new(tables()))
}
