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

/// Point of the SMTP transaction where the filters are consulted.
///
/// The string representation is the one used on the filter wire protocol
/// and in the configuration (`mail-from`, `rcpt-to`, ...).
#[derive(
    Debug,
    Eq,
    PartialEq,
    Hash,
    Copy,
    Clone,
    Ord,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FilterPhase {
    /// After receiving AUTH command
    Auth,
    /// After TCP/IP socket has been accepted
    Connected,
    /// After receiving DATA command
    Data,
    /// After receiving EHLO command
    Ehlo,
    /// After receiving HELO command
    Helo,
    /// After receiving STARTTLS command
    #[strum(serialize = "starttls")]
    #[serde(rename = "starttls")]
    StartTls,
    /// After receiving MAIL FROM command
    MailFrom,
    /// After receiving NOOP command
    Noop,
    /// After receiving QUIT command
    Quit,
    /// After receiving RCPT TO command
    RcptTo,
    /// After receiving RSET command
    Rset,
}

impl FilterPhase {
    /// Name of the phase on the filter protocol.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::FilterPhase;

    #[rstest::rstest]
    #[case(FilterPhase::Auth, "auth")]
    #[case(FilterPhase::Connected, "connected")]
    #[case(FilterPhase::Data, "data")]
    #[case(FilterPhase::Ehlo, "ehlo")]
    #[case(FilterPhase::Helo, "helo")]
    #[case(FilterPhase::StartTls, "starttls")]
    #[case(FilterPhase::MailFrom, "mail-from")]
    #[case(FilterPhase::Noop, "noop")]
    #[case(FilterPhase::Quit, "quit")]
    #[case(FilterPhase::RcptTo, "rcpt-to")]
    #[case(FilterPhase::Rset, "rset")]
    fn wire_name(#[case] phase: FilterPhase, #[case] name: &str) {
        assert_eq!(phase.as_str(), name);
        assert_eq!(phase.to_string(), name);
        assert_eq!(name.parse::<FilterPhase>().unwrap(), phase);
    }

    #[test]
    fn unknown_name() {
        assert!("mail_from".parse::<FilterPhase>().is_err());
        assert!("RCPT-TO".parse::<FilterPhase>().is_err());
        assert!("".parse::<FilterPhase>().is_err());
    }
}
