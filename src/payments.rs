//! Payment methods

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Label for a payment method's recipient name.
pub const RECIPIENT_NAME_LABEL: &str = "اسم المستلم";

/// Label for a payment method's account number.
pub const ACCOUNT_NUMBER_LABEL: &str = "رقم الحساب";

/// Label for a payment method's transfer number.
pub const TRANSFER_NUMBER_LABEL: &str = "رقم التحويل";

/// A manual payment channel shown to buyers at checkout.
///
/// Payment is settled out of band: the buyer transfers to the listed
/// details and the order message names the channel used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PaymentMethodWire", into = "PaymentMethodWire")]
pub struct PaymentMethod {
    /// Opaque, caller-unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Deactivated methods are hidden from buyer-facing selectors.
    pub is_active: bool,
    /// Name the transfer should be addressed to, if published.
    pub recipient_name: Option<String>,
    /// Account number to transfer to, if published.
    pub account_number: Option<String>,
    /// Transfer or remittance number, if published.
    pub transfer_number: Option<String>,
}

/// One populated, individually copyable payment detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisclosedField<'a> {
    /// Display label for the field.
    pub label: &'static str,
    /// The stored value, as entered by the administrator.
    pub value: &'a str,
}

/// Stored layout of a [`PaymentMethod`].
///
/// Stored documents hold blank strings for details that were never filled
/// in; those read back as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentMethodWire {
    id: String,
    name: String,
    is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transfer_number: Option<String>,
}

fn published(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl From<PaymentMethodWire> for PaymentMethod {
    fn from(wire: PaymentMethodWire) -> Self {
        PaymentMethod {
            id: wire.id,
            name: wire.name,
            is_active: wire.is_active,
            recipient_name: published(wire.recipient_name),
            account_number: published(wire.account_number),
            transfer_number: published(wire.transfer_number),
        }
    }
}

impl From<PaymentMethod> for PaymentMethodWire {
    fn from(payment: PaymentMethod) -> Self {
        PaymentMethodWire {
            id: payment.id,
            name: payment.name,
            is_active: payment.is_active,
            recipient_name: published(payment.recipient_name),
            account_number: published(payment.account_number),
            transfer_number: published(payment.transfer_number),
        }
    }
}

impl PaymentMethod {
    /// The populated detail fields, in display order.
    ///
    /// Absent fields are omitted entirely, never rendered as empty values.
    #[must_use]
    pub fn disclosed_fields(&self) -> SmallVec<[DisclosedField<'_>; 3]> {
        let mut fields = SmallVec::new();

        if let Some(value) = &self.recipient_name {
            fields.push(DisclosedField {
                label: RECIPIENT_NAME_LABEL,
                value,
            });
        }

        if let Some(value) = &self.account_number {
            fields.push(DisclosedField {
                label: ACCOUNT_NUMBER_LABEL,
                value,
            });
        }

        if let Some(value) = &self.transfer_number {
            fields.push(DisclosedField {
                label: TRANSFER_NUMBER_LABEL,
                value,
            });
        }

        fields
    }
}
