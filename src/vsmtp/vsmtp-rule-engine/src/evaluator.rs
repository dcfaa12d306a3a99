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

use crate::Predicate;
use vsmtp_common::{FilterPhase, Lookup, LookupKind};

/// How the parameter of a phase is checked by the rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Evaluator {
    /// The phase always passes.
    NotImpl,
    /// The parameter is an ip address.
    NetAddr,
    /// The parameter is the domain given by the client.
    Domain,
    /// The parameter is an envelope address, `<local@domain>`.
    MailAddr,
}

impl Evaluator {
    /// The evaluator of each phase.
    #[must_use]
    pub const fn for_phase(phase: FilterPhase) -> Self {
        match phase {
            FilterPhase::Auth
            | FilterPhase::Data
            | FilterPhase::StartTls
            | FilterPhase::Noop
            | FilterPhase::Quit
            | FilterPhase::Rset => Self::NotImpl,
            FilterPhase::Connected => Self::NetAddr,
            FilterPhase::Ehlo | FilterPhase::Helo => Self::Domain,
            FilterPhase::MailFrom | FilterPhase::RcptTo => Self::MailAddr,
        }
    }

    /// Kind of the table lookups, `None` if the phase is never checked.
    #[must_use]
    pub const fn lookup_kind(self) -> Option<LookupKind> {
        match self {
            Self::NotImpl => None,
            Self::NetAddr => Some(LookupKind::NetAddr),
            Self::Domain => Some(LookupKind::Domain),
            Self::MailAddr => Some(LookupKind::MailAddr),
        }
    }

    /// Does `param` pass the predicate ? `false` means the phase is blocked.
    #[must_use]
    pub fn passes(self, predicate: &Predicate, param: &str, lookup: &dyn Lookup) -> bool {
        let kind = match self.lookup_kind() {
            Some(kind) => kind,
            None => return true,
        };

        let key = if self == Self::MailAddr {
            strip_envelope(param)
        } else {
            param
        };

        !(check_table(predicate, kind, key, lookup) || check_regex(predicate, key, lookup))
    }
}

/// Remove the envelope of an address: the first character is dropped, and
/// the address stops at the first `>`.
///
/// ```
/// assert_eq!(vsmtp_rule_engine::strip_envelope("<john@example.com>"), "john@example.com");
/// assert_eq!(vsmtp_rule_engine::strip_envelope("<john@example.com> SIZE=1000"), "john@example.com");
/// assert_eq!(vsmtp_rule_engine::strip_envelope("<>"), "");
/// ```
#[must_use]
pub fn strip_envelope(param: &str) -> &str {
    let mut chars = param.chars();
    chars.next();
    let rest = chars.as_str();

    rest.find('>').map_or(rest, |end| &rest[..end])
}

fn check_table(predicate: &Predicate, kind: LookupKind, key: &str, lookup: &dyn Lookup) -> bool {
    predicate.table.as_ref().map_or(false, |table| {
        (lookup.lookup(table, key, kind) > 0) != predicate.not_table
    })
}

fn check_regex(predicate: &Predicate, key: &str, lookup: &dyn Lookup) -> bool {
    predicate.regex.as_ref().map_or(false, |regex| {
        (lookup.lookup(regex, key, LookupKind::Regex) > 0) != predicate.not_regex
    })
}

#[cfg(test)]
mod tests {
    use super::{strip_envelope, Evaluator};
    use crate::Predicate;
    use vsmtp_common::{FilterPhase, Lookup, LookupKind};

    /// Every key containing "bad" is in every table.
    struct Bad;

    impl Lookup for Bad {
        fn lookup(&self, _: &str, key: &str, _: LookupKind) -> usize {
            usize::from(key.contains("bad"))
        }
    }

    #[rstest::rstest]
    #[case("<user@example.com>", "user@example.com")]
    #[case("<user@example.com> BODY=8BITMIME", "user@example.com")]
    #[case("<>", "")]
    #[case("user@example.com", "ser@example.com")]
    #[case("", "")]
    #[case("<no-end", "no-end")]
    fn envelope(#[case] param: &str, #[case] expected: &str) {
        assert_eq!(strip_envelope(param), expected);
    }

    #[rstest::rstest]
    #[case(FilterPhase::Auth, Evaluator::NotImpl)]
    #[case(FilterPhase::Connected, Evaluator::NetAddr)]
    #[case(FilterPhase::Data, Evaluator::NotImpl)]
    #[case(FilterPhase::Ehlo, Evaluator::Domain)]
    #[case(FilterPhase::Helo, Evaluator::Domain)]
    #[case(FilterPhase::StartTls, Evaluator::NotImpl)]
    #[case(FilterPhase::MailFrom, Evaluator::MailAddr)]
    #[case(FilterPhase::Noop, Evaluator::NotImpl)]
    #[case(FilterPhase::Quit, Evaluator::NotImpl)]
    #[case(FilterPhase::RcptTo, Evaluator::MailAddr)]
    #[case(FilterPhase::Rset, Evaluator::NotImpl)]
    fn dispatch_table(#[case] phase: FilterPhase, #[case] evaluator: Evaluator) {
        assert_eq!(Evaluator::for_phase(phase), evaluator);
    }

    #[rstest::rstest]
    #[case(Predicate::table("t"), "good", true)]
    #[case(Predicate::table("t"), "bad", false)]
    #[case(Predicate::table("t").not_table(), "good", false)]
    #[case(Predicate::table("t").not_table(), "bad", true)]
    #[case(Predicate::regex("r"), "bad", false)]
    #[case(Predicate::regex("r").not_regex(), "bad", true)]
    #[case(Predicate { regex: Some("r".to_string()), ..Predicate::table("t") }, "bad", false)]
    // the negated regex blocks even if the table does not
    #[case(Predicate { regex: Some("r".to_string()), not_regex: true, ..Predicate::table("t") }, "good", false)]
    #[case(Predicate::default(), "bad", true)]
    fn predicates(#[case] predicate: Predicate, #[case] param: &str, #[case] passes: bool) {
        assert_eq!(Evaluator::Domain.passes(&predicate, param, &Bad), passes);
    }

    #[test]
    fn not_implemented_always_passes() {
        assert!(Evaluator::NotImpl.passes(&Predicate::table("t"), "bad", &Bad));
    }

    #[test]
    fn mail_address_is_stripped() {
        struct Exact;
        impl Lookup for Exact {
            fn lookup(&self, _: &str, key: &str, kind: LookupKind) -> usize {
                assert_eq!(kind, LookupKind::MailAddr);
                usize::from(key == "user@example.com")
            }
        }

        assert!(!Evaluator::MailAddr.passes(&Predicate::table("t"), "<user@example.com>", &Exact));
        assert!(Evaluator::MailAddr.passes(&Predicate::table("t"), "<other@example.com>", &Exact));
    }
}
