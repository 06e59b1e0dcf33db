//! JSON-lines request and response format
//!
//! This module centralizes the wire format of the operation surface:
//! - one JSON object per request line, tagged by `op`
//! - one JSON object per response line, carrying either `data` or `error`
//!
//! A request line looks like
//!
//! ```text
//! {"requestId":7,"op":"transactionConnection","page":0,"pageSize":10,"order":"asc","orderBy":"amount","filter":"BTC"}
//! ```
//!
//! and is answered by
//!
//! ```text
//! {"requestId":7,"data":{"edges":[...],"pageInfo":{"totalCount":2,"hasNextPage":true}}}
//! ```
//!
//! Decoding never fails outright: a line that cannot be decoded becomes an
//! envelope holding the decode error, which is answered like any other
//! failed request.

use crate::types::{
    LedgerError, NewTransaction, QueryParams, Request, Response, SortKey, SortOrder,
    TransactionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

/// Wire shape of a request body, tagged by `op`
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum RequestBody {
    TransactionConnection {
        page: usize,
        page_size: usize,
        order: Option<String>,
        order_by: Option<String>,
        filter: Option<String>,
    },
    Currencies,
    AddTransaction {
        uuid: String,
        #[serde(with = "rust_decimal::serde::float")]
        amount: Decimal,
        currency: String,
    },
    #[serde(alias = "editTransaction")]
    UpdateTransaction {
        id: TransactionId,
        uuid: String,
        #[serde(with = "rust_decimal::serde::float")]
        amount: Decimal,
        currency: String,
    },
    DeleteTransaction {
        id: TransactionId,
    },
    DeleteTransactionsBulk {
        id_list: Vec<TransactionId>,
    },
}

impl From<RequestBody> for Request {
    fn from(body: RequestBody) -> Self {
        match body {
            RequestBody::TransactionConnection {
                page,
                page_size,
                order,
                order_by,
                filter,
            } => Request::TransactionConnection(QueryParams {
                page,
                page_size,
                order: SortOrder::from_name(order.as_deref().unwrap_or_default()),
                order_by: SortKey::from_name(order_by.as_deref().unwrap_or_default()),
                filter: filter.unwrap_or_default(),
            }),
            RequestBody::Currencies => Request::Currencies,
            RequestBody::AddTransaction {
                uuid,
                amount,
                currency,
            } => Request::AddTransaction(NewTransaction::new(uuid, amount, currency)),
            RequestBody::UpdateTransaction {
                id,
                uuid,
                amount,
                currency,
            } => Request::UpdateTransaction {
                id,
                payload: NewTransaction::new(uuid, amount, currency),
            },
            RequestBody::DeleteTransaction { id } => Request::DeleteTransaction { id },
            RequestBody::DeleteTransactionsBulk { id_list } => {
                Request::DeleteTransactionsBulk { ids: id_list }
            }
        }
    }
}

/// A decoded request line
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    /// Caller-chosen correlation id, echoed in the response
    pub request_id: Option<u64>,

    /// 1-based input line number
    pub line: u64,

    /// The request, or the reason the line could not be decoded
    pub request: Result<Request, LedgerError>,
}

/// Decode one request line
///
/// # Arguments
///
/// * `line` - The raw line, without its trailing newline
/// * `line_num` - 1-based line number, used in error messages
pub fn decode_request_line(line: &str, line_num: u64) -> RequestEnvelope {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            return RequestEnvelope {
                request_id: None,
                line: line_num,
                request: Err(LedgerError::invalid_request(Some(line_num), e.to_string())),
            }
        }
    };

    // Pick up the correlation id first so even a bad body can be answered
    // under the caller's id.
    let request_id = value.get("requestId").and_then(Value::as_u64);

    let request = RequestBody::deserialize(value)
        .map(Request::from)
        .map_err(|e| LedgerError::invalid_request(Some(line_num), e.to_string()));

    RequestEnvelope {
        request_id,
        line: line_num,
        request,
    }
}

/// Decode one raw request line as read from the input
///
/// Surrounding whitespace (including a trailing `\r\n`) is ignored.
///
/// # Returns
///
/// * `None` - the line is blank
/// * `Some(envelope)` - otherwise; a line that is not valid UTF-8 yields an
///   envelope holding an `InvalidRequest` error
pub fn decode_request_bytes(raw: &[u8], line_num: u64) -> Option<RequestEnvelope> {
    match std::str::from_utf8(raw) {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(decode_request_line(trimmed, line_num))
            }
        }
        Err(e) => {
            // The lossy text is only used to recover the correlation id.
            let lossy = String::from_utf8_lossy(raw);
            let request_id = decode_request_line(lossy.trim(), line_num).request_id;
            Some(RequestEnvelope {
                request_id,
                line: line_num,
                request: Err(LedgerError::invalid_request(
                    Some(line_num),
                    format!("line is not valid UTF-8: {}", e),
                )),
            })
        }
    }
}

/// Log a failed request at a level matching who is at fault
pub fn log_request_failure(line: u64, request_id: Option<u64>, error: &LedgerError) {
    if error.is_client_error() {
        tracing::warn!(line, ?request_id, kind = error.kind(), error = %error, "request rejected");
    } else {
        tracing::error!(line, ?request_id, kind = error.kind(), error = %error, "request failed");
    }
}

/// Error payload of a failed response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Stable error identifier, e.g. `notFound`
    pub kind: &'static str,
    pub message: String,
}

/// One response line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLine {
    pub request_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Response>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ResponseLine {
    /// Build a response line from the outcome of a request
    pub fn from_result(request_id: Option<u64>, result: Result<Response, LedgerError>) -> Self {
        match result {
            Ok(data) => ResponseLine {
                request_id,
                data: Some(data),
                error: None,
            },
            Err(e) => ResponseLine {
                request_id,
                data: None,
                error: Some(ErrorBody {
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            },
        }
    }
}

/// Write one response as a single JSON line
pub fn write_response(response: &ResponseLine, output: &mut dyn Write) -> Result<(), LedgerError> {
    serde_json::to_writer(&mut *output, response)
        .map_err(|e| LedgerError::io("Failed to write response", e))?;
    output
        .write_all(b"\n")
        .map_err(|e| LedgerError::io("Failed to write response", e))?;
    Ok(())
}
