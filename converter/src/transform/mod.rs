//! Transformation module.
//!
//! - Rules: field-level conversions (decimals, signs, timestamps)
//! - [`transform_row`]: one Bitvavo row to at most one Parqet row
//! - Pipeline: reader → transformer → writer orchestration

pub mod pipeline;
pub mod rules;

pub use pipeline::*;

use crate::error::TransformResult;
use crate::models::{columns, InputRow, OutputRow};
use rules::{
    decimal_or_zero, format_date, format_datetime, parse_timestamp, strip_sign, ASSET_TYPE,
    PARQET_BUY, TAX,
};

/// Convert one Bitvavo row.
///
/// Returns `Ok(None)` for anything that is not a buy.
pub fn transform_row(row: &InputRow) -> TransformResult<Option<OutputRow>> {
    if !row.transaction_type().is_buy() {
        return Ok(None);
    }

    let timestamp = parse_timestamp(
        row.get_or_empty(columns::DATE),
        row.get_or_empty(columns::TIME),
        row.line,
    )?;

    let received_paid = decimal_or_zero(row.get(columns::RECEIVED_PAID_AMOUNT));

    Ok(Some(OutputRow {
        currency: row.get_or_empty(columns::QUOTE_CURRENCY).to_string(),
        date: format_date(&timestamp),
        datetime: format_datetime(&timestamp),
        fee: decimal_or_zero(row.get(columns::FEE_AMOUNT)),
        fxrate: String::new(),
        asset_type: ASSET_TYPE.to_string(),
        identifier: row.get_or_empty(columns::CURRENCY).to_string(),
        price: decimal_or_zero(row.get(columns::QUOTE_PRICE)),
        shares: decimal_or_zero(row.get(columns::AMOUNT)),
        amount: strip_sign(&received_paid).to_string(),
        tax: TAX.to_string(),
        time: String::new(),
        r#type: PARQET_BUY.to_string(),
        wkn: String::new(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::models::HEADER;

    fn buy_row() -> InputRow {
        InputRow::from_pairs(
            2,
            [
                ("Type", "buy"),
                ("Date", "2026-01-14"),
                ("Time", "15:57:09.152"),
                ("Quote Currency", "EUR"),
                ("Quote Price", "42000.50"),
                ("Amount", "0.001"),
                ("Received / Paid Amount", "-42.00"),
                ("Fee amount", "0.10"),
                ("Currency", "BTC"),
            ],
        )
    }

    #[test]
    fn test_buy_row() {
        let out = transform_row(&buy_row()).unwrap().unwrap();

        assert_eq!(
            out.fields().join(";"),
            "EUR;2026-01-14;2026-01-14T15:57:09.152Z;0,10;;Crypto;BTC;42000,50;0,001;42,00;0,00;;Buy;"
        );
        assert_eq!(out.fields().len(), HEADER.len());
    }

    #[test]
    fn test_non_buy_filtered() {
        for kind in ["sell", "deposit", "withdrawal", "staking", ""] {
            let row = InputRow::from_pairs(3, [("Type", kind), ("Date", "garbage")]);
            assert!(transform_row(&row).unwrap().is_none(), "{kind}");
        }
    }

    #[test]
    fn test_uppercase_buy_accepted() {
        let row = InputRow::from_pairs(
            2,
            [
                ("Type", "BUY"),
                ("Date", "2026-01-14"),
                ("Time", "15:56:05"),
                ("Quote Currency", "EUR"),
                ("Currency", "ETH"),
            ],
        );
        let out = transform_row(&row).unwrap().unwrap();
        assert_eq!(out.datetime, "2026-01-14T15:56:05.000Z");
        assert_eq!(out.r#type, "Buy");
    }

    #[test]
    fn test_missing_numeric_fields_default() {
        let row = InputRow::from_pairs(
            2,
            [
                ("Type", "buy"),
                ("Date", "2026-01-14"),
                ("Time", "15:56:05"),
                ("Quote Currency", "EUR"),
                ("Quote Price", ""),
                ("Currency", "ETH"),
            ],
        );
        let out = transform_row(&row).unwrap().unwrap();
        assert_eq!(out.price, "0,00");
        assert_eq!(out.shares, "0,00");
        assert_eq!(out.amount, "0,00");
        assert_eq!(out.fee, "0,00");
    }

    #[test]
    fn test_positive_amount_unchanged() {
        let mut pairs: Vec<(&str, &str)> = vec![
            ("Type", "buy"),
            ("Date", "2026-01-14"),
            ("Time", "15:56:05"),
            ("Quote Currency", "EUR"),
            ("Currency", "ETH"),
        ];
        pairs.push(("Received / Paid Amount", "12.5"));
        let out = transform_row(&InputRow::from_pairs(2, pairs)).unwrap().unwrap();
        assert_eq!(out.amount, "12,5");
    }

    #[test]
    fn test_bad_date_fails() {
        let row = InputRow::from_pairs(
            5,
            [
                ("Type", "buy"),
                ("Date", "14/01/2026"),
                ("Time", "15:56:05"),
            ],
        );
        match transform_row(&row) {
            Err(TransformError::DateParse { line, value }) => {
                assert_eq!(line, 5);
                assert_eq!(value, "14/01/2026 15:56:05.000");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
