//! Domain models for the conversion pipeline.
//!
//! - [`InputRow`] - One Bitvavo export line, keyed by column name
//! - [`OutputRow`] - One Parqet import line, in fixed column order
//! - [`TransactionType`] - Bitvavo transaction kind
//! - [`HEADER`] - Parqet import header

use std::collections::HashMap;

use csv::StringRecord;

// =============================================================================
// Bitvavo Columns
// =============================================================================

/// Bitvavo export column names used by the converter.
pub mod columns {
    pub const TYPE: &str = "Type";
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
    pub const QUOTE_CURRENCY: &str = "Quote Currency";
    pub const QUOTE_PRICE: &str = "Quote Price";
    pub const AMOUNT: &str = "Amount";
    pub const RECEIVED_PAID_AMOUNT: &str = "Received / Paid Amount";
    pub const FEE_AMOUNT: &str = "Fee amount";
    pub const CURRENCY: &str = "Currency";

    /// Columns that must be present in the header.
    ///
    /// Numeric columns are optional and fall back to `0,00`.
    pub const REQUIRED: [&str; 5] = [TYPE, DATE, TIME, QUOTE_CURRENCY, CURRENCY];
}

// =============================================================================
// Parqet Header
// =============================================================================

/// Number of columns in a Parqet import row.
pub const OUTPUT_WIDTH: usize = 14;

/// Parqet import header, emitted once as the first output line.
pub const HEADER: [&str; OUTPUT_WIDTH] = [
    "currency",
    "date",
    "datetime",
    "fee",
    "fxrate",
    "assetType",
    "identifier",
    "price",
    "shares",
    "amount",
    "tax",
    "time",
    "type",
    "wkn",
];

// =============================================================================
// Transaction Type
// =============================================================================

/// Kind of a Bitvavo transaction, read from the `Type` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    Buy,
    /// Anything else (sell, deposit, staking, ...), kept verbatim.
    Other(String),
}

impl TransactionType {
    /// Classify a raw `Type` value, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        if raw.to_lowercase() == "buy" {
            TransactionType::Buy
        } else {
            TransactionType::Other(raw.to_string())
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, TransactionType::Buy)
    }
}

// =============================================================================
// Input Row
// =============================================================================

/// A single Bitvavo export line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// 1-based line number in the input file.
    pub line: u64,
    fields: HashMap<String, String>,
}

impl InputRow {
    /// Pair a data record with the header names, positionally.
    pub fn from_record(headers: &StringRecord, record: &StringRecord, line: u64) -> Self {
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { line, fields }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<'a, I>(line: u64, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { line, fields }
    }

    /// Raw value of a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Raw value of a column, or `""` when absent.
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn transaction_type(&self) -> TransactionType {
        TransactionType::parse(self.get_or_empty(columns::TYPE))
    }
}

// =============================================================================
// Output Row
// =============================================================================

/// A single Parqet import line.
///
/// Field order follows [`HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub currency: String,
    pub date: String,
    pub datetime: String,
    pub fee: String,
    pub fxrate: String,
    pub asset_type: String,
    pub identifier: String,
    pub price: String,
    pub shares: String,
    pub amount: String,
    pub tax: String,
    pub time: String,
    pub r#type: String,
    pub wkn: String,
}

impl OutputRow {
    /// Fields in header order.
    pub fn fields(&self) -> [&str; OUTPUT_WIDTH] {
        [
            self.currency.as_str(),
            self.date.as_str(),
            self.datetime.as_str(),
            self.fee.as_str(),
            self.fxrate.as_str(),
            self.asset_type.as_str(),
            self.identifier.as_str(),
            self.price.as_str(),
            self.shares.as_str(),
            self.amount.as_str(),
            self.tax.as_str(),
            self.time.as_str(),
            self.r#type.as_str(),
            self.wkn.as_str(),
        ]
    }
}
