//! Contracts Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use viscend::{draft::ContractDraft, language::Language};

use crate::domain::contracts::{
    data::NewContract,
    records::{ContractId, ContractRecord},
};

const CREATE_CONTRACT_SQL: &str = include_str!("sql/create_contract.sql");
const GET_CONTRACT_SQL: &str = include_str!("sql/get_contract.sql");
const LIST_CONTRACTS_SQL: &str = include_str!("sql/list_contracts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgContractsRepository;

impl PgContractsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_contract(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client_email: &str,
        contract: &NewContract,
        now: Timestamp,
    ) -> Result<ContractRecord, sqlx::Error> {
        query_as::<Postgres, ContractRecord>(CREATE_CONTRACT_SQL)
            .bind(contract.contract_id.into_uuid())
            .bind(client_email)
            .bind(Json(&contract.draft))
            .bind(contract.language.code())
            .bind(&contract.document_html)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_contract(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contract: ContractId,
    ) -> Result<ContractRecord, sqlx::Error> {
        query_as::<Postgres, ContractRecord>(GET_CONTRACT_SQL)
            .bind(contract.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_contracts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ContractRecord>, sqlx::Error> {
        query_as::<Postgres, ContractRecord>(LIST_CONTRACTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ContractRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let language = row
            .try_get::<&str, _>("language")?
            .parse::<Language>()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "language".to_string(),
                source: Box::new(error),
            })?;

        Ok(Self {
            contract_id: ContractId::from_uuid(row.try_get("uuid")?),
            client_email: row.try_get("client_email")?,
            draft: row.try_get::<Json<ContractDraft>, _>("draft")?.0,
            language,
            document_html: row.try_get("document_html")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
