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

use super::engine;
use crate::{Evaluation, FilterRule, Outcome, Predicate, RuleEngine};
use vsmtp_common::{collection, FilterPhase, Lookup, LookupKind, Verdict};

fn reject(predicate: Predicate, message: &str) -> FilterRule {
    FilterRule::Check {
        predicate,
        outcome: Outcome::Reject(message.to_string()),
    }
}

fn delegate(filter: &str) -> FilterRule {
    FilterRule::Delegate {
        filter: filter.to_string(),
    }
}

#[test]
fn reject_then_proceed() {
    let engine = engine(collection! {
        FilterPhase::RcptTo => vec![
            reject(Predicate::table("blocklist"), "550 recipient refused"),
            reject(Predicate::regex("patterns"), "550 looks like spam"),
        ]
    });

    assert_eq!(
        engine.evaluate(FilterPhase::RcptTo, "<bad@x>"),
        Evaluation::Decided(Verdict::Reject("550 recipient refused".to_string()))
    );
    assert_eq!(
        engine.evaluate(FilterPhase::RcptTo, "<ok@x>"),
        Evaluation::Decided(Verdict::Proceed("<ok@x>".to_string()))
    );
    assert_eq!(
        engine.evaluate(FilterPhase::RcptTo, "<spammer@x>"),
        Evaluation::Decided(Verdict::Reject("550 looks like spam".to_string()))
    );
}

#[test]
fn no_rules() {
    let engine = engine(collection! {});

    for phase in <FilterPhase as strum::IntoEnumIterator>::iter() {
        assert_eq!(
            engine.evaluate(phase, "anything"),
            Evaluation::Decided(Verdict::Proceed("anything".to_string()))
        );
    }
}

#[test]
fn envelope_is_stripped() {
    #[derive(Default)]
    struct Recorder(std::sync::Mutex<Vec<(String, String, LookupKind)>>);

    impl Lookup for Recorder {
        fn lookup(&self, source: &str, key: &str, kind: LookupKind) -> usize {
            self.0
                .lock()
                .unwrap()
                .push((source.to_string(), key.to_string(), kind));
            0
        }
    }

    let recorder = std::sync::Arc::new(Recorder::default());
    let engine = RuleEngine::new(
        collection! {
            FilterPhase::MailFrom => vec![reject(
                Predicate { regex: Some("r".to_string()), ..Predicate::table("t") },
                "550"
            )],
            FilterPhase::Helo => vec![reject(Predicate::table("t"), "550")],
        },
        recorder.clone(),
    );

    engine.evaluate(FilterPhase::MailFrom, "<user@example.com>");
    engine.evaluate(FilterPhase::Helo, "<mx.example.com>");

    pretty_assertions::assert_eq!(
        *recorder.0.lock().unwrap(),
        vec![
            ("t".to_string(), "user@example.com".to_string(), LookupKind::MailAddr),
            ("r".to_string(), "user@example.com".to_string(), LookupKind::Regex),
            ("t".to_string(), "<mx.example.com>".to_string(), LookupKind::Domain),
        ]
    );
}

#[test]
fn first_blocking_rule_wins() {
    let engine = engine(collection! {
        FilterPhase::MailFrom => vec![
            reject(Predicate::table("blocklist"), "first"),
            FilterRule::Check {
                predicate: Predicate::table("blocklist"),
                outcome: Outcome::Disconnect("second".to_string()),
            },
        ]
    });

    assert_eq!(
        engine.evaluate(FilterPhase::MailFrom, "<someone@spam.example.net>"),
        Evaluation::Decided(Verdict::Reject("first".to_string()))
    );
}

#[test]
fn delegation_stops_the_evaluation() {
    let engine = engine(collection! {
        FilterPhase::RcptTo => vec![
            reject(Predicate::table("blocklist"), "550 refused"),
            delegate("spamassassin"),
            reject(Predicate::regex("patterns"), "never reached"),
        ]
    });

    assert_eq!(
        engine.evaluate(FilterPhase::RcptTo, "<bad@x>"),
        Evaluation::Decided(Verdict::Reject("550 refused".to_string()))
    );
    assert_eq!(
        engine.evaluate(FilterPhase::RcptTo, "<spammer@x>"),
        Evaluation::Deferred {
            filter: "spamassassin".to_string()
        }
    );
}

#[test]
fn outcomes() {
    let engine = engine(collection! {
        FilterPhase::Connected => vec![FilterRule::Check {
            predicate: Predicate::table("clients").not_table(),
            outcome: Outcome::Disconnect("421 not welcome".to_string()),
        }],
        FilterPhase::Helo => vec![FilterRule::Check {
            predicate: Predicate::table("helos"),
            outcome: Outcome::Rewrite("mx.example.com".to_string()),
        }],
    });

    assert_eq!(
        engine.evaluate(FilterPhase::Connected, "198.51.100.7"),
        Evaluation::Decided(Verdict::Disconnect("421 not welcome".to_string()))
    );
    assert_eq!(
        engine.evaluate(FilterPhase::Connected, "192.0.2.7"),
        Evaluation::Decided(Verdict::Proceed("192.0.2.7".to_string()))
    );
    assert_eq!(
        engine.evaluate(FilterPhase::Helo, "mail.example.org"),
        Evaluation::Decided(Verdict::Rewrite("mx.example.com".to_string()))
    );
    assert_eq!(
        engine.evaluate(FilterPhase::Helo, "example.org"),
        Evaluation::Decided(Verdict::Proceed("example.org".to_string()))
    );
}

#[rstest::rstest]
#[case(FilterPhase::Auth)]
#[case(FilterPhase::Data)]
#[case(FilterPhase::StartTls)]
#[case(FilterPhase::Noop)]
#[case(FilterPhase::Quit)]
#[case(FilterPhase::Rset)]
fn phases_always_passing(#[case] phase: FilterPhase) {
    let engine = engine(collection! {
        phase => vec![reject(Predicate::regex("patterns").not_regex(), "550")]
    });

    assert_eq!(
        engine.evaluate(phase, "x"),
        Evaluation::Decided(Verdict::Proceed("x".to_string()))
    );
}

#[rstest::rstest]
#[case(FilterPhase::Auth)]
#[case(FilterPhase::Data)]
#[case(FilterPhase::Quit)]
fn delegation_on_any_phase(#[case] phase: FilterPhase) {
    let engine = engine(collection! { phase => vec![delegate("f")] });

    assert_eq!(
        engine.evaluate(phase, "x"),
        Evaluation::Deferred {
            filter: "f".to_string()
        }
    );
}

#[test]
fn from_config() {
    let config = vsmtp_config::Config::from_toml(
        r#"
version_requirement = ">=2.0.0"

[tables.blocklist]
type = "static"
values = ["@spam.example.net"]

[filters.spamassassin]

[[rules.rcpt-to]]
table = "blocklist"
reject = "550 refused"
disconnect = "421 bye"

[[rules.rcpt-to]]
filter = "spamassassin"
"#,
    )
    .unwrap();

    let engine = RuleEngine::from_config(&config).unwrap();

    pretty_assertions::assert_eq!(
        engine.rules(FilterPhase::RcptTo),
        &[
            FilterRule::Check {
                predicate: Predicate::table("blocklist"),
                outcome: Outcome::Disconnect("421 bye".to_string()),
            },
            delegate("spamassassin"),
        ]
    );
    assert!(engine.rules(FilterPhase::MailFrom).is_empty());

    assert_eq!(
        engine.evaluate(FilterPhase::RcptTo, "<john@spam.example.net>"),
        Evaluation::Decided(Verdict::Disconnect("421 bye".to_string()))
    );
}
