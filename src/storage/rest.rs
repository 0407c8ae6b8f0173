//! PostgREST store
//!
//! Talks to a hosted Supabase project through its REST endpoint:
//! `GET {url}/rest/v1/<view>?select=*`, `POST` with
//! `Prefer: return=representation`, and `PATCH`/`DELETE` filtered with
//! `?id=eq.<id>`. Every request carries the anon key both as `apikey` and
//! as a bearer token.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{
    Store, ACCOUNT_BALANCE_VIEW, BALANCE_VIEW, LEDGER_TABLE, TRANSACTIONS_TABLE, TRANSACTIONS_VIEW,
};
use crate::error::{BalanceError, BalanceResult};
use crate::models::{
    AccountBalance, AmountUpdate, BalanceView, LedgerEntry, NewLedgerEntry, NewTransaction,
    Transaction, TransactionId, TransactionWithBalance,
};

/// PostgREST code for "single row requested, zero or many returned"
pub const NO_ROWS_CODE: &str = "PGRST116";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error body PostgREST sends with non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Turn a failed response body into a [`BalanceError::Backend`]
fn backend_error(status: u16, body: &str) -> BalanceError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let mut message = parsed
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "no response body".to_string()
            } else {
                body.trim().to_string()
            }
        });
    if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
        message.push_str(&format!(" ({})", details));
    }
    if let Some(hint) = parsed.hint.filter(|h| !h.is_empty()) {
        message.push_str(&format!(" hint: {}", hint));
    }

    BalanceError::Backend {
        status,
        code: parsed.code,
        message,
    }
}

/// `eq.<uuid>` filter value
/// An empty balance view answers PGRST116 to a single-object request
fn balance_or_empty(result: BalanceResult<BalanceView>) -> BalanceResult<BalanceView> {
    match result {
        Ok(view) => Ok(view),
        Err(err) if err.backend_code() == Some(NO_ROWS_CODE) => {
            tracing::debug!("balance view has no row, using zeros");
            Ok(BalanceView::default())
        }
        Err(err) => Err(err),
    }
}

fn eq_filter(id: TransactionId) -> String {
    format!("eq.{}", id.as_uuid())
}

/// Store backed by a hosted PostgREST endpoint
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// Build a client for `url` authenticated with `key`
    pub fn new(url: &str, key: &str, timeout: Duration) -> BalanceResult<Self> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(key)
            .map_err(|_| BalanceError::Config("Access key contains invalid characters".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| BalanceError::Config("Access key contains invalid characters".into()))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| BalanceError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of a table or view
    pub fn endpoint(&self, relation: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, relation)
    }

    fn request(&self, method: Method, relation: &str) -> RequestBuilder {
        self.client.request(method, self.endpoint(relation))
    }

    /// Send and fail on non-2xx, keeping the backend's code and message
    fn send(&self, relation: &str, request: RequestBuilder) -> BalanceResult<Response> {
        let response = request.send().map_err(|e| {
            tracing::error!(relation, error = %e, "request failed");
            BalanceError::from(e)
        })?;

        let status = response.status();
        tracing::debug!(relation, status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let err = backend_error(status.as_u16(), &body);
        if err.backend_code() != Some(NO_ROWS_CODE) {
            tracing::error!(relation, status = status.as_u16(), error = %err, "backend rejected request");
        }
        Err(err)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        relation: &str,
        request: RequestBuilder,
    ) -> BalanceResult<T> {
        self.send(relation, request)?
            .json::<T>()
            .map_err(|e| BalanceError::Json(format!("Unexpected {} payload: {}", relation, e)))
    }
}

impl Store for RestStore {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    fn fetch_transactions(&self) -> BalanceResult<Vec<TransactionWithBalance>> {
        let request = self
            .request(Method::GET, TRANSACTIONS_VIEW)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.send_json(TRANSACTIONS_VIEW, request)
    }

    fn fetch_balance(&self) -> BalanceResult<BalanceView> {
        let request = self
            .request(Method::GET, BALANCE_VIEW)
            .query(&[("select", "*")])
            .header(ACCEPT, SINGLE_OBJECT);

        balance_or_empty(self.send_json(BALANCE_VIEW, request))
    }

    fn fetch_account_balances(&self) -> BalanceResult<Vec<AccountBalance>> {
        let request = self
            .request(Method::GET, ACCOUNT_BALANCE_VIEW)
            .query(&[("select", "*")]);
        self.send_json(ACCOUNT_BALANCE_VIEW, request)
    }

    fn get_transaction(&self, id: TransactionId) -> BalanceResult<Option<Transaction>> {
        let request = self
            .request(Method::GET, TRANSACTIONS_TABLE)
            .query(&[("select", "*".to_string()), ("id", eq_filter(id))]);
        let rows: Vec<Transaction> = self.send_json(TRANSACTIONS_TABLE, request)?;
        Ok(rows.into_iter().next())
    }

    fn insert_transaction(&self, txn: &NewTransaction) -> BalanceResult<Transaction> {
        let request = self
            .request(Method::POST, TRANSACTIONS_TABLE)
            .header("Prefer", RETURN_REPRESENTATION)
            .header(ACCEPT, SINGLE_OBJECT)
            .json(txn);
        self.send_json(TRANSACTIONS_TABLE, request)
    }

    fn insert_ledger_entries(&self, entries: &[NewLedgerEntry]) -> BalanceResult<Vec<LedgerEntry>> {
        let request = self
            .request(Method::POST, LEDGER_TABLE)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(entries);
        self.send_json(LEDGER_TABLE, request)
    }

    fn update_transaction_amounts(
        &self,
        id: TransactionId,
        update: AmountUpdate,
    ) -> BalanceResult<Transaction> {
        let request = self
            .request(Method::PATCH, TRANSACTIONS_TABLE)
            .query(&[("id", eq_filter(id))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&update);
        let rows: Vec<Transaction> = self.send_json(TRANSACTIONS_TABLE, request)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BalanceError::transaction_not_found(id.to_string()))
    }

    fn delete_transaction(&self, id: TransactionId) -> BalanceResult<()> {
        let request = self
            .request(Method::DELETE, TRANSACTIONS_TABLE)
            .query(&[("id", eq_filter(id))])
            .header("Prefer", RETURN_REPRESENTATION);
        let rows: Vec<Transaction> = self.send_json(TRANSACTIONS_TABLE, request)?;
        if rows.is_empty() {
            return Err(BalanceError::transaction_not_found(id.to_string()));
        }
        Ok(())
    }

    fn fetch_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<Vec<LedgerEntry>> {
        let request = self
            .request(Method::GET, LEDGER_TABLE)
            .query(&[("select", "*".to_string()), ("transaction_id", eq_filter(id))]);
        self.send_json(LEDGER_TABLE, request)
    }

    fn delete_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<()> {
        let request = self
            .request(Method::DELETE, LEDGER_TABLE)
            .query(&[("transaction_id", eq_filter(id))]);
        self.send(LEDGER_TABLE, request)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let store = RestStore::new(
            "https://demo.supabase.co/",
            "anon-key",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            store.endpoint(TRANSACTIONS_VIEW),
            "https://demo.supabase.co/rest/v1/transactions_with_balance"
        );
    }

    #[test]
    fn test_invalid_key_is_config_error() {
        let err = RestStore::new("https://demo.supabase.co", "bad\nkey", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, BalanceError::Config(_)));
    }

    #[test]
    fn test_no_rows_error_is_recognised() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let err = backend_error(406, body);
        assert_eq!(err.backend_code(), Some(NO_ROWS_CODE));
        assert!(err.to_string().contains("0 rows"));
    }

    #[test]
    fn test_empty_balance_view_is_zeros() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let view = balance_or_empty(Err(backend_error(406, body))).unwrap();
        assert_eq!(view, BalanceView::default());
        assert!(view.balance.is_zero());
    }

    #[test]
    fn test_other_balance_errors_propagate() {
        let body = r#"{"code":"42P01","message":"relation \"balance_view\" does not exist"}"#;
        let err = balance_or_empty(Err(backend_error(404, body))).unwrap_err();
        assert_eq!(err.backend_code(), Some("42P01"));

        let err = balance_or_empty(Err(backend_error(502, "Bad Gateway"))).unwrap_err();
        assert!(matches!(err, BalanceError::Backend { status: 502, .. }));
    }

    #[test]
    fn test_balance_row_passes_through() {
        let view: BalanceView =
            serde_json::from_str(r#"{"total_income":5000000,"total_expense":75000,"balance":4925000}"#)
                .unwrap();
        assert_eq!(balance_or_empty(Ok(view)).unwrap(), view);
    }

    #[test]
    fn test_non_json_error_body() {
        let err = backend_error(502, "Bad Gateway");
        assert_eq!(err.backend_code(), None);
        assert_eq!(err.to_string(), "Backend error (502): Bad Gateway");

        let err = backend_error(500, "");
        assert_eq!(err.to_string(), "Backend error (500): no response body");
    }

    #[test]
    fn test_constraint_violation_keeps_code_and_hint() {
        let body = r#"{"code":"23514","details":null,"hint":"check price","message":"new row violates check constraint"}"#;
        let err = backend_error(400, body);
        assert_eq!(err.backend_code(), Some("23514"));
        assert_eq!(
            err.to_string(),
            "Backend error (400): new row violates check constraint hint: check price"
        );
    }

    #[test]
    fn test_eq_filter() {
        let id = TransactionId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(eq_filter(id), "eq.550e8400-e29b-41d4-a716-446655440000");
    }
}
