//! Recipient resolution and email construction

use validator::ValidateEmail;

use domain_receipt::Receipt;

use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::ports::{OutboundEmail, OwnerProfile, RenderedDocument};

/// Resolves and validates the target address for one receipt.
///
/// An explicit override wins; otherwise the receipt's stored tenant address
/// is used. Absence of both is `MissingRecipient`; a syntactically invalid
/// address is `InvalidRecipient`.
pub fn resolve_recipient(
    receipt: &Receipt,
    recipient_override: Option<&str>,
) -> Result<String, DispatchError> {
    let address = recipient_override
        .or(receipt.tenant_email.as_deref())
        .ok_or_else(|| DispatchError::MissingRecipient {
            receipt_number: receipt.receipt_number.clone(),
        })?;

    if !address.validate_email() {
        return Err(DispatchError::InvalidRecipient {
            address: address.to_string(),
        });
    }

    Ok(address.to_string())
}

/// Builds the outbound email for one receipt.
///
/// Subject carries the receipt number; both a plain-text and an HTML body
/// are produced, plus the rendered document as the single attachment.
pub fn build_email(
    config: &DispatchConfig,
    owner: &OwnerProfile,
    receipt: &Receipt,
    recipient: &str,
    document: RenderedDocument,
    shared_note: Option<&str>,
) -> OutboundEmail {
    let subject = format!(
        "Rent Receipt {} - {}",
        receipt.receipt_number, owner.property_name
    );

    let note_text = shared_note.map(|n| format!("\n{n}\n")).unwrap_or_default();
    let text_body = format!(
        "Dear {tenant},\n\
         \n\
         Please find attached your rent receipt {number} for {period}.\n\
         \n\
         Amount paid: {paid} ({words})\n\
         Balance due: {balance}\n\
         {note}\n\
         Regards,\n\
         {owner_name}\n\
         {property}\n",
        tenant = receipt.tenant_name,
        number = receipt.receipt_number,
        period = receipt.period,
        paid = receipt.amount_paid,
        words = receipt.amount_in_words,
        balance = receipt.balance_due,
        note = note_text,
        owner_name = owner.display_name,
        property = owner.property_name,
    );

    let note_html = shared_note
        .map(|n| format!("<p>{n}</p>"))
        .unwrap_or_default();
    let html_body = format!(
        "<p>Dear {tenant},</p>\
         <p>Please find attached your rent receipt <strong>{number}</strong> for {period}.</p>\
         <table>\
         <tr><td>Amount paid</td><td><strong>{paid}</strong> ({words})</td></tr>\
         <tr><td>Balance due</td><td>{balance}</td></tr>\
         </table>\
         {note}\
         <p>Regards,<br>{owner_name}<br>{property}</p>",
        tenant = receipt.tenant_name,
        number = receipt.receipt_number,
        period = receipt.period,
        paid = receipt.amount_paid,
        words = receipt.amount_in_words,
        balance = receipt.balance_due,
        note = note_html,
        owner_name = owner.display_name,
        property = owner.property_name,
    );

    OutboundEmail {
        from: config.from_address.clone(),
        reply_to: config.reply_to.clone().or_else(|| Some(owner.email.clone())),
        to: recipient.to_string(),
        subject,
        text_body,
        html_body,
        attachment: document.into(),
    }
}
