//! Prediction request record collected from the form

use crate::error::PredictorError;
use serde::{Deserialize, Serialize};

/// Maximum tenure (months) accepted by the form
pub const MAX_TENURE: u32 = 100;

/// A categorical form field with a closed value domain.
///
/// `COLUMN` is the column name used in the training frame; one-hot columns
/// are named `{COLUMN}_{label}`.
pub trait Category: Copy + 'static {
    const COLUMN: &'static str;
    const ALL: &'static [Self];

    /// Category label exactly as it appeared in the training data
    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Category for Gender {
    const COLUMN: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contract {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl Category for Contract {
    const COLUMN: &'static str = "Contract";
    const ALL: &'static [Self] = &[Contract::MonthToMonth, Contract::OneYear, Contract::TwoYear];

    fn label(&self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partner {
    Yes,
    No,
}

impl Category for Partner {
    const COLUMN: &'static str = "Partner";
    const ALL: &'static [Self] = &[Partner::Yes, Partner::No];

    fn label(&self) -> &'static str {
        match self {
            Partner::Yes => "Yes",
            Partner::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Electronic check")]
    ElectronicCheck,
    #[serde(rename = "Mailed check")]
    MailedCheck,
    #[serde(rename = "Bank transfer (automatic)")]
    BankTransfer,
    #[serde(rename = "Credit card (automatic)")]
    CreditCard,
}

impl Category for PaymentMethod {
    const COLUMN: &'static str = "PaymentMethod";
    const ALL: &'static [Self] = &[
        PaymentMethod::ElectronicCheck,
        PaymentMethod::MailedCheck,
        PaymentMethod::BankTransfer,
        PaymentMethod::CreditCard,
    ];

    fn label(&self) -> &'static str {
        match self {
            PaymentMethod::ElectronicCheck => "Electronic check",
            PaymentMethod::MailedCheck => "Mailed check",
            PaymentMethod::BankTransfer => "Bank transfer (automatic)",
            PaymentMethod::CreditCard => "Credit card (automatic)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultipleLines {
    Yes,
    No,
    #[serde(rename = "No phone service")]
    NoPhoneService,
}

impl Category for MultipleLines {
    const COLUMN: &'static str = "MultipleLines";
    const ALL: &'static [Self] = &[
        MultipleLines::Yes,
        MultipleLines::No,
        MultipleLines::NoPhoneService,
    ];

    fn label(&self) -> &'static str {
        match self {
            MultipleLines::Yes => "Yes",
            MultipleLines::No => "No",
            MultipleLines::NoPhoneService => "No phone service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamingTv {
    Yes,
    No,
    #[serde(rename = "No internet service")]
    NoInternetService,
}

impl Category for StreamingTv {
    const COLUMN: &'static str = "StreamingTV";
    const ALL: &'static [Self] = &[
        StreamingTv::Yes,
        StreamingTv::No,
        StreamingTv::NoInternetService,
    ];

    fn label(&self) -> &'static str {
        match self {
            StreamingTv::Yes => "Yes",
            StreamingTv::No => "No",
            StreamingTv::NoInternetService => "No internet service",
        }
    }
}

/// One customer record as submitted through the prediction form.
///
/// Every field is restricted to its declared domain: categorical fields by
/// their enum type, `tenure` by [`RawInput::new`]. Deserialization goes
/// through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInputRecord")]
pub struct RawInput {
    pub gender: Gender,
    pub contract: Contract,
    /// Months with the company
    pub tenure: u32,
    pub partner: Partner,
    pub payment_method: PaymentMethod,
    pub multiple_lines: MultipleLines,
    pub streaming_tv: StreamingTv,
}

/// Unvalidated wire form of [`RawInput`]
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInputRecord {
    gender: Gender,
    contract: Contract,
    tenure: i64,
    partner: Partner,
    payment_method: PaymentMethod,
    multiple_lines: MultipleLines,
    streaming_tv: StreamingTv,
}

impl TryFrom<RawInputRecord> for RawInput {
    type Error = String;

    fn try_from(record: RawInputRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            gender: record.gender,
            contract: record.contract,
            tenure: check_tenure(record.tenure)?,
            partner: record.partner,
            payment_method: record.payment_method,
            multiple_lines: record.multiple_lines,
            streaming_tv: record.streaming_tv,
        })
    }
}

fn check_tenure(tenure: i64) -> Result<u32, String> {
    u32::try_from(tenure)
        .ok()
        .filter(|&t| t <= MAX_TENURE)
        .ok_or_else(|| {
            format!(
                "tenure must be between 0 and {} months, got {}",
                MAX_TENURE, tenure
            )
        })
}

impl RawInput {
    /// Build a validated record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gender: Gender,
        contract: Contract,
        tenure: u32,
        partner: Partner,
        payment_method: PaymentMethod,
        multiple_lines: MultipleLines,
        streaming_tv: StreamingTv,
    ) -> Result<Self, PredictorError> {
        let tenure = check_tenure(i64::from(tenure)).map_err(PredictorError::InvalidInput)?;

        Ok(Self {
            gender,
            contract,
            tenure,
            partner,
            payment_method,
            multiple_lines,
            streaming_tv,
        })
    }

    /// Parse a record from a JSON document
    pub fn from_json(json: &str) -> Result<Self, PredictorError> {
        serde_json::from_str(json).map_err(|e| PredictorError::InvalidInput(e.to_string()))
    }
}

impl Default for RawInput {
    /// Form defaults: first option of every select box, 12 months tenure
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            contract: Contract::MonthToMonth,
            tenure: 12,
            partner: Partner::Yes,
            payment_method: PaymentMethod::ElectronicCheck,
            multiple_lines: MultipleLines::Yes,
            streaming_tv: StreamingTv::Yes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenure_bounds() {
        let d = RawInput::default();
        let build = |tenure| {
            RawInput::new(
                d.gender,
                d.contract,
                tenure,
                d.partner,
                d.payment_method,
                d.multiple_lines,
                d.streaming_tv,
            )
        };

        assert!(build(0).is_ok());
        assert!(build(100).is_ok());
        assert!(matches!(build(101), Err(PredictorError::InvalidInput(_))));
    }

    #[test]
    fn test_deserialize_form_values() {
        let json = r#"{
            "gender": "Female",
            "contract": "One year",
            "tenure": 24,
            "partner": "No",
            "payment_method": "Bank transfer (automatic)",
            "multiple_lines": "No phone service",
            "streaming_tv": "No internet service"
        }"#;

        let input = RawInput::from_json(json).unwrap();
        assert_eq!(input.gender, Gender::Female);
        assert_eq!(input.contract, Contract::OneYear);
        assert_eq!(input.tenure, 24);
        assert_eq!(input.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(input.multiple_lines, MultipleLines::NoPhoneService);
        assert_eq!(input.streaming_tv, StreamingTv::NoInternetService);
    }

    #[test]
    fn test_deserialize_rejects_out_of_domain() {
        let unknown_contract = r#"{"gender":"Male","contract":"Three year","tenure":1,
            "partner":"Yes","payment_method":"Mailed check","multiple_lines":"No",
            "streaming_tv":"No"}"#;
        assert!(RawInput::from_json(unknown_contract).is_err());

        let negative_tenure = r#"{"gender":"Male","contract":"Two year","tenure":-3,
            "partner":"Yes","payment_method":"Mailed check","multiple_lines":"No",
            "streaming_tv":"No"}"#;
        let err = RawInput::from_json(negative_tenure).unwrap_err();
        assert!(err.to_string().contains("tenure"));
    }

    #[test]
    fn test_labels_match_serialized_form() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.label()));
        }
        for contract in Contract::ALL {
            let json = serde_json::to_string(contract).unwrap();
            assert_eq!(json, format!("\"{}\"", contract.label()));
        }
    }
}
