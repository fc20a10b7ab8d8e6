//! Ordered checks of a hold request.
//!
//! The first failing check decides the error code:
//!
//! | # | check | code |
//! |---|-------|------|
//! | 1 | card number checksum | 1 |
//! | 2 | expiry is a real month | 2 |
//! | 3 | expiry has not passed | 7 |
//! | 4 | holder matches the ledger | 3 |
//! | 5 | CVV in range and matches the ledger | 4 |
//! | 6 | order id present | 5 |
//! | 7 | amount positive | 6 |
//!
//! Nothing here mutates state. The fund check is separate
//! ([`validate_funds`]) and runs only at hold time, under the card lock.

use cardgate_types::{CardRecord, DealDetails, GatewayError, HoldRequest, Result, constants};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{CardStore, card_validator};

/// Validate `request` against the ledger row `reference`.
///
/// `reference` is `None` when the card is not in the ledger; such a request
/// fails at the holder check.
///
/// # Errors
/// The [`GatewayError`] of the first failing check.
pub fn validate(
    request: &HoldRequest,
    reference: Option<&CardRecord>,
    today: NaiveDate,
) -> Result<()> {
    let card = &request.card;

    if !card_validator::is_valid_card_number(card.pan.as_str()) {
        return Err(GatewayError::WrongCardNumber);
    }
    if !card_validator::is_plausible_expiry(card.e_month, card.e_year) {
        return Err(GatewayError::WrongCardExpiryDate);
    }
    if !card_validator::is_valid_expiry(card.e_month, card.e_year, today) {
        return Err(GatewayError::CardHasExpired);
    }

    let holder = card.holder.trim();
    let Some(reference) = reference.filter(|r| !holder.is_empty() && r.holder.trim() == holder)
    else {
        return Err(GatewayError::WrongCardHolder);
    };

    let cvv_range = i32::from(constants::CVV_MIN)..=i32::from(constants::CVV_MAX);
    if !cvv_range.contains(&card.cvv) || card.cvv != i32::from(reference.cvv) {
        return Err(GatewayError::WrongCvv);
    }

    validate_deal(&request.deal)
}

/// [`validate`] with the reference row looked up in `store`.
///
/// # Errors
/// The [`GatewayError`] of the first failing check.
pub fn validate_with_store(
    request: &HoldRequest,
    store: &impl CardStore,
    today: NaiveDate,
) -> Result<()> {
    let reference = store.get(&request.card.pan);
    validate(request, reference.as_ref(), today)
}

fn validate_deal(deal: &DealDetails) -> Result<()> {
    if deal.order_id.0.trim().is_empty() {
        return Err(GatewayError::WrongOrderId);
    }
    if deal.amount <= Decimal::ZERO || !deal.amount.fract().is_zero() {
        return Err(GatewayError::WrongAmount);
    }
    Ok(())
}

/// Whether `card` can cover `deal` from its spendable balance.
///
/// # Errors
/// `InsufficientFunds` if it cannot.
pub fn validate_funds(card: &CardRecord, deal: &DealDetails) -> Result<()> {
    if card.can_cover(deal.amount) {
        Ok(())
    } else {
        Err(GatewayError::InsufficientFunds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryCardLedger;
    use cardgate_types::{CardNumber, OrderId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn card() -> CardRecord {
        CardRecord::dummy(Decimal::new(1000, 0))
    }

    fn request() -> HoldRequest {
        HoldRequest::dummy(&card(), "A-1", Decimal::new(100, 0))
    }

    fn check(request: &HoldRequest) -> Result<()> {
        validate(request, Some(&card()), today())
    }

    #[test]
    fn well_formed_request_passes() {
        assert_eq!(check(&request()), Ok(()));
    }

    #[test]
    fn bad_checksum_is_code_1() {
        let mut req = request();
        req.card.pan = CardNumber::new("4012888888881882");
        assert_eq!(check(&req), Err(GatewayError::WrongCardNumber));
    }

    #[test]
    fn empty_pan_is_code_1() {
        let mut req = request();
        req.card.pan = CardNumber::default();
        assert_eq!(check(&req), Err(GatewayError::WrongCardNumber));
    }

    #[test]
    fn month_out_of_range_is_code_2() {
        for month in [0, 13, -1] {
            let mut req = request();
            req.card.e_month = month;
            assert_eq!(check(&req), Err(GatewayError::WrongCardExpiryDate));
        }
    }

    #[test]
    fn missing_year_is_code_2() {
        let mut req = request();
        req.card.e_year = 0;
        assert_eq!(check(&req), Err(GatewayError::WrongCardExpiryDate));
    }

    #[test]
    fn passed_expiry_is_code_7() {
        let mut req = request();
        req.card.e_month = 9;
        req.card.e_year = 2026;
        assert_eq!(check(&req), Err(GatewayError::CardHasExpired));
    }

    #[test]
    fn supplied_expiry_is_not_matched_against_ledger() {
        let mut req = request();
        req.card.e_month = 1;
        req.card.e_year = 2040;
        assert_eq!(check(&req), Ok(()));
    }

    #[test]
    fn holder_mismatch_is_code_3() {
        let mut req = request();
        req.card.holder = "PETROV PETR".to_string();
        assert_eq!(check(&req), Err(GatewayError::WrongCardHolder));
    }

    #[test]
    fn missing_holder_is_code_3() {
        let mut req = request();
        req.card.holder = "   ".to_string();
        assert_eq!(check(&req), Err(GatewayError::WrongCardHolder));
    }

    #[test]
    fn holder_ignores_surrounding_whitespace() {
        let mut req = request();
        req.card.holder = " IVANOV IVAN ".to_string();
        assert_eq!(check(&req), Ok(()));

        req.card.holder = "   ".to_string();
        assert_eq!(check(&req), Err(GatewayError::WrongCardHolder));
    }

    #[test]
    fn unknown_card_is_code_3() {
        let mut req = request();
        req.card.pan = CardNumber::new("4111111111111111");
        assert_eq!(validate(&req, None, today()), Err(GatewayError::WrongCardHolder));
    }

    #[test]
    fn cvv_out_of_range_is_code_4() {
        for cvv in [0, 99, 1000] {
            let mut req = request();
            req.card.cvv = cvv;
            assert_eq!(check(&req), Err(GatewayError::WrongCvv));
        }
    }

    #[test]
    fn cvv_mismatch_is_code_4() {
        let mut req = request();
        req.card.cvv = 101;
        assert_eq!(check(&req), Err(GatewayError::WrongCvv));
    }

    #[test]
    fn empty_order_id_is_code_5() {
        for id in ["", "  "] {
            let mut req = request();
            req.deal.order_id = OrderId::new(id);
            assert_eq!(check(&req), Err(GatewayError::WrongOrderId));
        }
    }

    #[test]
    fn non_positive_amount_is_code_6() {
        for amount in [Decimal::ZERO, Decimal::new(-5, 0)] {
            let mut req = request();
            req.deal.amount = amount;
            assert_eq!(check(&req), Err(GatewayError::WrongAmount));
        }
    }

    #[test]
    fn fractional_amount_is_code_6() {
        for amount in [Decimal::new(1, 3), Decimal::new(10_050, 2)] {
            let mut req = request();
            req.deal.amount = amount;
            assert_eq!(check(&req), Err(GatewayError::WrongAmount));
        }
    }

    #[test]
    fn first_failure_wins() {
        let mut req = request();
        req.card.pan = CardNumber::new("4012888888881882");
        req.card.e_month = 0;
        req.card.holder.clear();
        req.card.cvv = 0;
        req.deal.order_id = OrderId::default();
        req.deal.amount = Decimal::ZERO;
        assert_eq!(check(&req), Err(GatewayError::WrongCardNumber));

        req.card.pan = card().number;
        assert_eq!(check(&req), Err(GatewayError::WrongCardExpiryDate));

        req.card.e_month = 1;
        req.card.e_year = 2020;
        assert_eq!(check(&req), Err(GatewayError::CardHasExpired));

        req.card.e_year = 2099;
        assert_eq!(check(&req), Err(GatewayError::WrongCardHolder));

        req.card.holder = CardRecord::DUMMY_HOLDER.to_string();
        assert_eq!(check(&req), Err(GatewayError::WrongCvv));

        req.card.cvv = i32::from(CardRecord::DUMMY_CVV);
        assert_eq!(check(&req), Err(GatewayError::WrongOrderId));

        req.deal.order_id = OrderId::new("A-1");
        assert_eq!(check(&req), Err(GatewayError::WrongAmount));

        req.deal.amount = Decimal::ONE;
        assert_eq!(check(&req), Ok(()));
    }

    #[test]
    fn amount_above_balance_still_validates() {
        let mut req = request();
        req.deal.amount = Decimal::new(1_000_000, 0);
        assert_eq!(check(&req), Ok(()));
        assert_eq!(
            validate_funds(&card(), &req.deal),
            Err(GatewayError::InsufficientFunds)
        );
    }

    #[test]
    fn funds_cover_exact_balance() {
        let mut req = request();
        req.deal.amount = Decimal::new(1000, 0);
        assert_eq!(validate_funds(&card(), &req.deal), Ok(()));
    }

    #[test]
    fn store_lookup() {
        let ledger = InMemoryCardLedger::from_cards([card()]);
        assert_eq!(validate_with_store(&request(), &ledger, today()), Ok(()));

        let empty = InMemoryCardLedger::new();
        assert_eq!(
            validate_with_store(&request(), &empty, today()),
            Err(GatewayError::WrongCardHolder)
        );
    }
}
