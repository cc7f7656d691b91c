//! Payment details and form validation.
//!
//! Checkout is simulated: card details are only ever validated locally and
//! never leave the process.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use jiff::civil::Date;
use thiserror::Error;
use zeroize::Zeroize;

/// Number of digits a card number must have once spaces are removed.
pub const CARD_NUMBER_DIGITS: usize = 16;

/// Minimum trimmed length of the cardholder name.
pub const MIN_CARDHOLDER_NAME_CHARS: usize = 3;

/// Number of years after the current one offered for expiry.
pub const EXPIRY_YEARS_AHEAD: i16 = 10;

/// Card details as typed into the payment form.
#[derive(Clone, Default)]
pub struct CardDetails {
    /// Card number, possibly grouped with spaces
    pub card_number: String,

    /// Cardholder name
    pub cardholder_name: String,

    /// Expiry month (`"1"`..`"12"`, leading zero allowed)
    pub expiry_month: String,

    /// Expiry year (four digits)
    pub expiry_year: String,

    /// Card verification value
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &"**redacted**")
            .field("cardholder_name", &self.cardholder_name)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"**redacted**")
            .finish()
    }
}

impl Drop for CardDetails {
    fn drop(&mut self) {
        self.card_number.zeroize();
        self.cvv.zeroize();
    }
}

/// Payment form field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentField {
    /// Card number
    CardNumber,

    /// Cardholder name
    CardholderName,

    /// Expiry month
    ExpiryMonth,

    /// Expiry year
    ExpiryYear,

    /// Combined expiry date
    ExpiryDate,

    /// Card verification value
    Cvv,
}

impl PaymentField {
    /// Form field key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::CardholderName => "cardholderName",
            Self::ExpiryMonth => "expiryMonth",
            Self::ExpiryYear => "expiryYear",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
        }
    }
}

impl Display for PaymentField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure of a single payment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentFieldError {
    /// The field is empty.
    #[error("this field is required")]
    Required,

    /// The card number does not have exactly 16 digits.
    #[error("card number must have 16 digits")]
    InvalidCardLength,

    /// The cardholder name is too short.
    #[error("name must have at least 3 characters")]
    NameTooShort,

    /// The month is not a number between 1 and 12.
    #[error("invalid month")]
    InvalidMonth,

    /// The year is not a number.
    #[error("invalid year")]
    InvalidYear,

    /// The card expired before the current month.
    #[error("the card has expired")]
    Expired,

    /// The CVV is not 3 or 4 digits.
    #[error("CVV must have 3 or 4 digits")]
    InvalidCvv,
}

/// Every field error found in one validation pass, keyed by field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{} payment field(s) are invalid", .0.len())]
pub struct PaymentErrors(BTreeMap<PaymentField, PaymentFieldError>);

impl PaymentErrors {
    /// Error for `field`, if any.
    pub fn get(&self, field: PaymentField) -> Option<PaymentFieldError> {
        self.0.get(&field).copied()
    }

    /// Iterate fields and errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (PaymentField, PaymentFieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is invalid.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: PaymentField, error: PaymentFieldError) {
        self.0.insert(field, error);
    }
}

/// Validate every payment field against `today`.
///
/// All checks run; the form is valid only when none of them fails.
///
/// # Errors
///
/// Returns the collected [`PaymentErrors`] when at least one field is invalid.
pub fn validate(details: &CardDetails, today: Date) -> Result<(), PaymentErrors> {
    let mut errors = PaymentErrors::default();

    if details.card_number.is_empty() {
        errors.insert(PaymentField::CardNumber, PaymentFieldError::Required);
    } else if !is_valid_card_number(&details.card_number) {
        errors.insert(PaymentField::CardNumber, PaymentFieldError::InvalidCardLength);
    }

    if details.cardholder_name.is_empty() {
        errors.insert(PaymentField::CardholderName, PaymentFieldError::Required);
    } else if !is_valid_cardholder_name(&details.cardholder_name) {
        errors.insert(PaymentField::CardholderName, PaymentFieldError::NameTooShort);
    }

    let month = parse_field(&details.expiry_month);
    let year = parse_field(&details.expiry_year);

    match month {
        None if details.expiry_month.trim().is_empty() => {
            errors.insert(PaymentField::ExpiryMonth, PaymentFieldError::Required);
        }
        Some(month) if (1..=12).contains(&month) => {}
        _ => errors.insert(PaymentField::ExpiryMonth, PaymentFieldError::InvalidMonth),
    }

    if details.expiry_year.trim().is_empty() {
        errors.insert(PaymentField::ExpiryYear, PaymentFieldError::Required);
    } else if year.is_none() {
        errors.insert(PaymentField::ExpiryYear, PaymentFieldError::InvalidYear);
    }

    if let (Some(month), Some(year)) = (month, year)
        && !is_unexpired(month, year, today)
    {
        errors.insert(PaymentField::ExpiryDate, PaymentFieldError::Expired);
    }

    if details.cvv.is_empty() {
        errors.insert(PaymentField::Cvv, PaymentFieldError::Required);
    } else if !is_valid_cvv(&details.cvv) {
        errors.insert(PaymentField::Cvv, PaymentFieldError::InvalidCvv);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether `card_number` has exactly 16 digits once whitespace is removed.
pub fn is_valid_card_number(card_number: &str) -> bool {
    let mut digits = 0_usize;

    for c in card_number.chars().filter(|c| !c.is_whitespace()) {
        if !c.is_ascii_digit() {
            return false;
        }

        digits += 1;
    }

    digits == CARD_NUMBER_DIGITS
}

/// Whether `cvv` is 3 or 4 ASCII digits.
pub fn is_valid_cvv(cvv: &str) -> bool {
    matches!(cvv.len(), 3 | 4) && cvv.bytes().all(|b| b.is_ascii_digit())
}

/// Whether the trimmed cardholder name has at least three characters.
pub fn is_valid_cardholder_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_CARDHOLDER_NAME_CHARS
}

/// Whether a card expiring at `month`/`year` is still usable in `today`'s month.
///
/// Granularity is the calendar month: a card expiring this month passes.
pub fn is_unexpired(month: i64, year: i64, today: Date) -> bool {
    let current_year = i64::from(today.year());
    let current_month = i64::from(today.month());

    (year, month) >= (current_year, current_month)
}

/// Keep only digits and group them by four, e.g. `"4111111111111111"` becomes
/// `"4111 1111 1111 1111"`.
pub fn format_card_number(raw: &str) -> String {
    let mut formatted = String::with_capacity(raw.len() + raw.len() / 4);

    for (index, digit) in raw.chars().filter(char::is_ascii_digit).enumerate() {
        if index > 0 && index % 4 == 0 {
            formatted.push(' ');
        }

        formatted.push(digit);
    }

    formatted
}

/// Years offered for expiry: the current year and the following ten.
pub fn expiry_years(today: Date) -> Vec<i16> {
    let current = today.year();

    (current..=current.saturating_add(EXPIRY_YEARS_AHEAD)).collect()
}

/// Months offered for expiry.
pub fn expiry_months() -> Vec<i8> {
    (1..=12).collect()
}

fn parse_field(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn march_2025() -> Date {
        date(2025, 3, 14)
    }

    fn valid_details() -> CardDetails {
        CardDetails {
            card_number: "4111 1111 1111 1111".to_string(),
            cardholder_name: "Ana Torres".to_string(),
            expiry_month: "03".to_string(),
            expiry_year: "2025".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn valid_details_pass() {
        assert_eq!(validate(&valid_details(), march_2025()), Ok(()));
    }

    #[test]
    fn card_number_needs_sixteen_digits() {
        assert!(is_valid_card_number("4111111111111111"));
        assert!(!is_valid_card_number("4111 1111 1111"));
        assert!(!is_valid_card_number("4111 1111 1111 111a"));
    }

    #[test]
    fn short_card_number_reports_length_error() {
        let mut details = valid_details();
        details.card_number = "4111 1111 1111".to_string();

        let errors = validate(&details, march_2025()).err().unwrap_or_default();

        assert_eq!(
            errors.get(PaymentField::CardNumber),
            Some(PaymentFieldError::InvalidCardLength)
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn cvv_lengths() {
        assert!(!is_valid_cvv("12"));
        assert!(is_valid_cvv("123"));
        assert!(is_valid_cvv("1234"));
        assert!(!is_valid_cvv("12345"));
        assert!(!is_valid_cvv("12a"));
    }

    #[test]
    fn expiry_uses_calendar_month_granularity() {
        let today = march_2025();

        assert!(!is_unexpired(2, 2025, today));
        assert!(is_unexpired(3, 2025, today));
        assert!(is_unexpired(1, 2026, today));
        assert!(!is_unexpired(12, 2024, today));
    }

    #[test]
    fn expired_card_reports_expiry_date() {
        let mut details = valid_details();
        details.expiry_month = "02".to_string();

        let errors = validate(&details, march_2025()).err().unwrap_or_default();

        assert_eq!(
            errors.get(PaymentField::ExpiryDate),
            Some(PaymentFieldError::Expired)
        );
    }

    #[test]
    fn every_check_runs() {
        let details = CardDetails::default();

        let errors = validate(&details, march_2025()).err().unwrap_or_default();

        let fields: Vec<PaymentField> = errors.iter().map(|(field, _)| field).collect();

        assert_eq!(
            fields,
            vec![
                PaymentField::CardNumber,
                PaymentField::CardholderName,
                PaymentField::ExpiryMonth,
                PaymentField::ExpiryYear,
                PaymentField::Cvv,
            ]
        );
        assert!(
            errors
                .iter()
                .all(|(_, error)| error == PaymentFieldError::Required)
        );
    }

    #[test]
    fn month_out_of_range_is_invalid() {
        let mut details = valid_details();
        details.expiry_month = "13".to_string();
        details.expiry_year = "2030".to_string();

        let errors = validate(&details, march_2025()).err().unwrap_or_default();

        assert_eq!(
            errors.get(PaymentField::ExpiryMonth),
            Some(PaymentFieldError::InvalidMonth)
        );
    }

    #[test]
    fn cardholder_name_is_trimmed() {
        assert!(!is_valid_cardholder_name("  Al  "));
        assert!(is_valid_cardholder_name(" Ana "));
    }

    #[test]
    fn format_card_number_groups_digits() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-11x11"), "4111 1111");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn expiry_options() {
        let years = expiry_years(march_2025());

        assert_eq!(years.first(), Some(&2025));
        assert_eq!(years.last(), Some(&2035));
        assert_eq!(years.len(), 11);
        assert_eq!(expiry_months().len(), 12);
    }

    #[test]
    fn debug_redacts_secrets() {
        let rendered = format!("{:?}", valid_details());

        assert!(!rendered.contains("4111"));
        assert!(!rendered.contains("123"));
    }
}
