//! The order record published to the topic.
//!
//! Field names follow the value schema (`source_topic_value.avsc`) exactly;
//! every field is a string on the wire.

use serde::{Deserialize, Serialize};

/// Values of `ONHOLDFLAG`.
pub const HOLD_FLAGS: [&str; 2] = ["ONHOLD", "OFFHOLD"];

/// Values of `TRXNTYPE`.
pub const TRANSACTION_TYPES: [&str; 2] = ["SALE", "RETURN"];

/// Values of `TARGETTYPE`.
pub const TARGET_TYPES: [&str; 3] = ["TYPEX", "TYPEY", "TYPEZ"];

/// Values of `ACTNCODE`.
pub const ACTION_CODES: [&str; 3] = ["NEW", "UPDATE", "CANCEL"];

/// Suffix appended to the 8 hex characters of `CORRELIDHEX`.
pub const CORRELATION_SUFFIX: &str = "hex";

/// Constants shared by every record of the privileged subset.
///
/// Downstream consumers filter on this exact combination, so the values
/// must not change.
pub mod privileged {
    pub const DEALER_CODE: &str = "D010";
    pub const SOURCE_ID: &str = "SRC147";
    pub const MANAGEMENT_CODE: &str = "MGMT00";
    pub const ACTION_CODE: &str = "NEW";
    pub const REVISION: &str = "2";
}

/// Which generation branch produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Filter fields pinned to the [`privileged`] constants.
    Privileged,
    /// Every field drawn independently from its domain.
    Generic,
}

/// A single synthetic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "ORDERKEY")]
    pub order_key: String,
    #[serde(rename = "CORRELIDHEX")]
    pub correlation_id: String,
    #[serde(rename = "ONHOLDFLAG")]
    pub on_hold_flag: String,
    #[serde(rename = "TRXNREVN")]
    pub revision: String,
    #[serde(rename = "TRXNTYPE")]
    pub transaction_type: String,
    #[serde(rename = "DLRCODE")]
    pub dealer_code: String,
    #[serde(rename = "SRCID")]
    pub source_id: String,
    #[serde(rename = "TARGETTYPE")]
    pub target_type: String,
    #[serde(rename = "MGMTCODE")]
    pub management_code: String,
    #[serde(rename = "ACTNCODE")]
    pub action_code: String,
    #[serde(rename = "MESSAGEPAYLOAD")]
    pub message_payload: String,
}

impl OrderRecord {
    /// Wire field names in schema order.
    pub const FIELD_NAMES: [&'static str; 11] = [
        "ORDERKEY",
        "CORRELIDHEX",
        "ONHOLDFLAG",
        "TRXNREVN",
        "TRXNTYPE",
        "DLRCODE",
        "SRCID",
        "TARGETTYPE",
        "MGMTCODE",
        "ACTNCODE",
        "MESSAGEPAYLOAD",
    ];

    /// The message key: the order identifier.
    pub fn key(&self) -> &str {
        &self.order_key
    }

    /// Field `(name, value)` pairs in schema order.
    pub fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("ORDERKEY", self.order_key.as_str()),
            ("CORRELIDHEX", self.correlation_id.as_str()),
            ("ONHOLDFLAG", self.on_hold_flag.as_str()),
            ("TRXNREVN", self.revision.as_str()),
            ("TRXNTYPE", self.transaction_type.as_str()),
            ("DLRCODE", self.dealer_code.as_str()),
            ("SRCID", self.source_id.as_str()),
            ("TARGETTYPE", self.target_type.as_str()),
            ("MGMTCODE", self.management_code.as_str()),
            ("ACTNCODE", self.action_code.as_str()),
            ("MESSAGEPAYLOAD", self.message_payload.as_str()),
        ]
    }

    /// Whether all four filter fields carry the privileged constants.
    pub fn matches_privileged_filter(&self) -> bool {
        self.dealer_code == privileged::DEALER_CODE
            && self.source_id == privileged::SOURCE_ID
            && self.management_code == privileged::MANAGEMENT_CODE
            && self.action_code == privileged::ACTION_CODE
    }
}
