//! Challenges Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use viscend::verification::{VerificationChallenge, VerificationCode};

const UPSERT_CHALLENGE_SQL: &str = include_str!("sql/upsert_challenge.sql");
const LOCK_CHALLENGE_SQL: &str = include_str!("sql/lock_challenge.sql");
const CONSUME_CHALLENGE_SQL: &str = include_str!("sql/consume_challenge.sql");
const PURGE_CHALLENGES_SQL: &str = include_str!("sql/purge_challenges.sql");

/// Row shape of `verification_challenges`.
#[derive(Debug)]
pub(crate) struct ChallengeRow(pub(crate) VerificationChallenge);

impl<'r> FromRow<'r, PgRow> for ChallengeRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code = VerificationCode::parse(row.try_get::<&str, _>("code")?).map_err(|error| {
            sqlx::Error::ColumnDecode {
                index: "code".to_string(),
                source: Box::new(error),
            }
        })?;

        Ok(Self(VerificationChallenge {
            email: row.try_get("email")?,
            code,
            issued_at: row.try_get::<SqlxTimestamp, _>("issued_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            consumed: row.try_get("consumed")?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgChallengesRepository;

impl PgChallengesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn upsert_challenge(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        challenge: &VerificationChallenge,
    ) -> Result<VerificationChallenge, sqlx::Error> {
        let row = query_as::<Postgres, ChallengeRow>(UPSERT_CHALLENGE_SQL)
            .bind(&challenge.email)
            .bind(challenge.code.as_str())
            .bind(SqlxTimestamp::from(challenge.issued_at))
            .bind(SqlxTimestamp::from(challenge.expires_at))
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }

    /// Fetch the challenge for `email`, holding a row lock until the transaction ends.
    pub(crate) async fn lock_challenge(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<VerificationChallenge>, sqlx::Error> {
        let row = query_as::<Postgres, ChallengeRow>(LOCK_CHALLENGE_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|row| row.0))
    }

    pub(crate) async fn consume_challenge(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CONSUME_CHALLENGE_SQL)
            .bind(email)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn purge_challenges(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PURGE_CHALLENGES_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
