//! Order confirmation email

use shared::util::format_rupiah;

use crate::cart::CartLine;

/// Short order reference: first 8 characters of the transaction id, upper-cased
pub fn order_reference(transaction_id: &str) -> String {
    transaction_id.chars().take(8).collect::<String>().to_uppercase()
}

pub fn confirmation_subject(transaction_id: &str) -> String {
    format!("Order Confirmation: Item Summary #{}", order_reference(transaction_id))
}

/// HTML fragment listing each line (name, quantity, line price) and the total
pub fn confirmation_html(transaction_id: &str, lines: &[CartLine], total: i64) -> String {
    let rows: String = lines
        .iter()
        .map(|line| {
            format!(
                r#"<tr><td style="padding: 12px 8px; border-bottom: 1px solid #f0f0f0;"><strong>{}</strong></td><td style="padding: 12px 8px; border-bottom: 1px solid #f0f0f0; text-align: center;">{} x</td><td style="padding: 12px 8px; border-bottom: 1px solid #f0f0f0; text-align: right;">{}</td></tr>"#,
                escape_html(&describe(line)),
                line.quantity,
                format_rupiah(line.line_total()),
            )
        })
        .collect();

    format!(
        r#"<div style="font-family: sans-serif; color: #333; max-width: 600px; margin: auto;">
<div style="background-color: #006241; color: white; padding: 20px; text-align: center;">
<h1 style="margin: 0; font-size: 20px;">Your order has been placed!</h1>
<p style="margin: 5px 0 0;">Transaction ID: #{reference}</p>
</div>
<table style="width: 100%; border-collapse: collapse; margin: 24px 0;">
<thead><tr><th style="text-align: left;">Item</th><th style="text-align: center;">Qty</th><th style="text-align: right;">Price</th></tr></thead>
<tbody>{rows}</tbody>
<tfoot><tr><td colspan="2" style="padding: 20px 8px 8px; font-weight: bold;">Total</td><td style="padding: 20px 8px 8px; font-weight: bold; text-align: right;">{total}</td></tr></tfoot>
</table>
<p style="font-size: 13px; color: #666;">Please show this message to our cashier when collecting your order.</p>
</div>"#,
        reference = order_reference(transaction_id),
        rows = rows,
        total = format_rupiah(total),
    )
}

/// Name plus chosen modifiers, e.g. `Fried Rice (Hot, Egg)`
fn describe(line: &CartLine) -> String {
    if line.selected_modifiers.is_empty() {
        return line.name.clone();
    }
    let names: Vec<&str> = line
        .selected_modifiers
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    format!("{} ({})", line.name, names.join(", "))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
