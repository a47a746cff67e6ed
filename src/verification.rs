//! Verification Challenges
//!
//! A challenge binds a short numeric one-time code to an email address. Codes
//! expire [`CODE_TTL`] after issue and can be consumed once.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a verification code.
pub const CODE_LENGTH: usize = 6;

/// How long an issued code stays valid.
pub const CODE_TTL: SignedDuration = SignedDuration::from_mins(10);

/// Exclusive upper bound of the numeric code space.
pub const CODE_SPACE: u32 = 1_000_000;

/// Verification rejected a code.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The code does not match, was already used, or no challenge exists
    #[error("Invalid verification code")]
    InvalidCode,

    /// The challenge expired before the code was checked
    #[error("Verification code expired")]
    ExpiredCode,
}

/// Input is not a six digit code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("verification codes are exactly {CODE_LENGTH} digits")]
pub struct MalformedCode;

/// A six digit numeric code.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Parse user input, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedCode`] unless the input is exactly six ASCII digits.
    pub fn parse(input: &str) -> Result<Self, MalformedCode> {
        let code = input.trim();

        if code.len() != CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedCode);
        }

        Ok(Self(code.to_string()))
    }

    /// Zero-padded code for `number`, reduced into the six digit code space.
    pub fn from_number(number: u32) -> Self {
        Self(format!("{:06}", number % CODE_SPACE))
    }

    /// The digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = MalformedCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VerificationCode> for String {
    fn from(code: VerificationCode) -> Self {
        code.0
    }
}

/// Server-held one-time code state for an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationChallenge {
    /// Normalized email the code was issued to
    pub email: String,

    /// Issued code
    pub code: VerificationCode,

    /// Issue time
    pub issued_at: Timestamp,

    /// Expiry time, `issued_at + CODE_TTL`
    pub expires_at: Timestamp,

    /// Whether the code has already been used
    pub consumed: bool,
}

impl VerificationChallenge {
    /// New, unconsumed challenge expiring [`CODE_TTL`] after `now`.
    pub fn issue(email: impl Into<String>, code: VerificationCode, now: Timestamp) -> Self {
        Self {
            email: email.into(),
            code,
            issued_at: now,
            expires_at: now + CODE_TTL,
            consumed: false,
        }
    }

    /// Whether the challenge has expired at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Check a candidate code without consuming the challenge.
    ///
    /// Expiry is checked first, so a correct but late code reports
    /// [`VerificationError::ExpiredCode`].
    ///
    /// # Errors
    ///
    /// Returns the reason the candidate is not accepted.
    pub fn check(&self, candidate: &VerificationCode, now: Timestamp) -> Result<(), VerificationError> {
        if self.is_expired(now) {
            return Err(VerificationError::ExpiredCode);
        }

        if self.consumed || self.code != *candidate {
            return Err(VerificationError::InvalidCode);
        }

        Ok(())
    }

    /// Check a candidate code and mark the challenge as used.
    ///
    /// # Errors
    ///
    /// Returns the reason the candidate is not accepted; the challenge is left unchanged.
    pub fn consume(
        &mut self,
        candidate: &VerificationCode,
        now: Timestamp,
    ) -> Result<(), VerificationError> {
        self.check(candidate, now)?;
        self.consumed = true;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn issued_at() -> TestResult<Timestamp> {
        Ok("2026-03-01T09:00:00Z".parse()?)
    }

    fn challenge() -> TestResult<VerificationChallenge> {
        Ok(VerificationChallenge::issue(
            "a@b.com",
            VerificationCode::parse("042917")?,
            issued_at()?,
        ))
    }

    #[test]
    fn parse_trims_and_requires_six_digits() -> TestResult {
        assert_eq!(VerificationCode::parse(" 123456 ")?.as_str(), "123456");
        assert_eq!(VerificationCode::parse("12345"), Err(MalformedCode));
        assert_eq!(VerificationCode::parse("12345a"), Err(MalformedCode));
        assert_eq!(VerificationCode::parse("1234567"), Err(MalformedCode));

        Ok(())
    }

    #[test]
    fn from_number_zero_pads() {
        assert_eq!(VerificationCode::from_number(42).as_str(), "000042");
        assert_eq!(VerificationCode::from_number(999_999).as_str(), "999999");
        assert_eq!(VerificationCode::from_number(CODE_SPACE + 7).as_str(), "000007");
    }

    #[test]
    fn debug_output_hides_the_digits() -> TestResult {
        let code = VerificationCode::parse("123456")?;

        assert!(!format!("{code:?}").contains("123456"), "code leaked");

        Ok(())
    }

    #[test]
    fn expires_ten_minutes_after_issue() -> TestResult {
        let challenge = challenge()?;

        assert_eq!(challenge.expires_at, issued_at()? + SignedDuration::from_mins(10));

        Ok(())
    }

    #[test]
    fn matching_code_within_ttl_is_accepted() -> TestResult {
        let mut challenge = challenge()?;
        let code = VerificationCode::parse("042917")?;
        let now = issued_at()? + SignedDuration::from_mins(9);

        challenge.consume(&code, now)?;

        assert!(challenge.consumed, "challenge should be consumed");

        Ok(())
    }

    #[test]
    fn code_is_single_use() -> TestResult {
        let mut challenge = challenge()?;
        let code = VerificationCode::parse("042917")?;
        let now = issued_at()?;

        challenge.consume(&code, now)?;

        assert_eq!(
            challenge.consume(&code, now),
            Err(VerificationError::InvalidCode)
        );

        Ok(())
    }

    #[test]
    fn wrong_code_is_invalid_and_leaves_challenge_live() -> TestResult {
        let mut challenge = challenge()?;
        let wrong = VerificationCode::parse("111111")?;

        assert_eq!(
            challenge.consume(&wrong, issued_at()?),
            Err(VerificationError::InvalidCode)
        );
        assert!(!challenge.consumed, "failed attempts must not consume");

        Ok(())
    }

    #[test]
    fn correct_code_after_expiry_is_expired() -> TestResult {
        let challenge = challenge()?;
        let code = VerificationCode::parse("042917")?;
        let late = issued_at()? + SignedDuration::from_secs(10 * 60 + 1);

        assert_eq!(challenge.check(&code, late), Err(VerificationError::ExpiredCode));

        Ok(())
    }

    #[test]
    fn code_is_still_valid_at_the_expiry_instant() -> TestResult {
        let challenge = challenge()?;
        let code = VerificationCode::parse("042917")?;

        challenge.check(&code, challenge.expires_at)?;

        Ok(())
    }

    #[test]
    fn error_messages_match_the_wire_strings() {
        assert_eq!(VerificationError::InvalidCode.to_string(), "Invalid verification code");
        assert_eq!(VerificationError::ExpiredCode.to_string(), "Verification code expired");
    }
}
