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

use crate::{
    field::{FieldFilter, FieldLogs, FieldParser, FieldRule, FieldTable},
    Config,
};
use vsmtp_common::{collection, FilterPhase};

const FULL: &str = r#"
version_requirement = ">=2.0.0"

[logs]
level = ["warn", "vsmtp_rule_engine=debug"]
filepath = "/var/log/vsmtp/vfilter.log"

[parser]
value_max = 4096

[tables.clients]
type = "static"
values = ["192.0.2.0/24", "::1"]

[tables.senders]
type = "file"
path = "/etc/vsmtp/senders.csv"
delimiter = ";"

[tables.spam]
type = "regex"
patterns = ['^spam.*@', '@example\.net$']

[filters.spamassassin]
command = "/usr/libexec/filter-spamassassin"

[[rules.connected]]
table = "clients"
not_table = true
disconnect = "421 not welcome"

[[rules.mail-from]]
table = "senders"
regex = "spam"
reject = "550 sender refused"

[[rules.rcpt-to]]
filter = "spamassassin"
"#;

#[test]
fn full() {
    pretty_assertions::assert_eq!(
        Config::from_toml(FULL).unwrap(),
        Config {
            version_requirement: semver::VersionReq::parse(">=2.0.0").unwrap(),
            logs: FieldLogs {
                level: vec![
                    "warn".parse().unwrap(),
                    "vsmtp_rule_engine=debug".parse().unwrap()
                ],
                filepath: Some("/var/log/vsmtp/vfilter.log".into()),
            },
            parser: FieldParser {
                header_name_max: 1024,
                value_max: 4096,
            },
            tables: collection! {
                "clients".to_string() => FieldTable::Static {
                    values: vec!["192.0.2.0/24".to_string(), "::1".to_string()]
                },
                "senders".to_string() => FieldTable::File {
                    path: "/etc/vsmtp/senders.csv".into(),
                    delimiter: ';'
                },
                "spam".to_string() => FieldTable::Regex {
                    patterns: vec!["^spam.*@".to_string(), "@example\\.net$".to_string()]
                },
            },
            filters: collection! {
                "spamassassin".to_string() => FieldFilter {
                    command: Some("/usr/libexec/filter-spamassassin".to_string())
                },
            },
            rules: collection! {
                FilterPhase::Connected => vec![FieldRule {
                    table: Some("clients".to_string()),
                    not_table: true,
                    disconnect: Some("421 not welcome".to_string()),
                    ..FieldRule::default()
                }],
                FilterPhase::MailFrom => vec![FieldRule {
                    table: Some("senders".to_string()),
                    regex: Some("spam".to_string()),
                    reject: Some("550 sender refused".to_string()),
                    ..FieldRule::default()
                }],
                FilterPhase::RcptTo => vec![FieldRule {
                    filter: Some("spamassassin".to_string()),
                    ..FieldRule::default()
                }],
            },
        }
    );
}

#[test]
fn minimal() {
    let config = Config::from_toml(r#"version_requirement = ">=2.0.0""#).unwrap();

    assert_eq!(config.logs, FieldLogs::default());
    assert_eq!(config.parser, FieldParser::default());
    assert!(config.tables.is_empty());
    assert!(config.rules.is_empty());
}

#[test]
fn default_matches_the_minimal_file() {
    let config = Config::new_default();
    let minimal = Config::from_toml(&format!(
        "version_requirement = \"{}\"",
        config.version_requirement
    ))
    .unwrap();

    pretty_assertions::assert_eq!(config, minimal);
}

#[test]
fn version_not_fulfilled() {
    let error = Config::from_toml(r#"version_requirement = "<1.0.0""#).unwrap_err();
    assert!(error
        .to_string()
        .starts_with("Version requirement not fulfilled"));
}

#[test]
fn version_missing() {
    assert!(Config::from_toml("[logs]\nlevel = [\"info\"]").is_err());
}

#[rstest::rstest]
#[case::unknown_field("[logs]\nlevels = [\"info\"]")]
#[case::unknown_phase("[[rules.mail_from]]\nfilter = \"f\"")]
#[case::unknown_table_type("[tables.t]\ntype = \"ldap\"")]
#[case::field_of_another_table_type("[tables.t]\ntype = \"static\"\npatterns = []")]
#[case::unknown_rule_field("[[rules.helo]]\ntable = \"t\"\naccept = \"yes\"")]
fn syntax_error(#[case] body: &str) {
    let toml = format!("version_requirement = \">=2.0.0\"\n{body}");
    assert!(Config::from_toml(&toml).is_err());
}

#[test]
fn to_json() {
    let config = Config::from_toml(FULL).unwrap();
    let json = config.to_json().unwrap();

    let value = serde_json::from_str::<serde_json::Value>(&json).unwrap();
    assert_eq!(value["rules"]["rcpt-to"][0]["filter"], "spamassassin");
    assert_eq!(value["tables"]["senders"]["type"], "file");
    assert_eq!(value["logs"]["level"][1], "vsmtp_rule_engine=debug");
    assert!(value["rules"]["rcpt-to"][0].get("table").is_none());
}
