/// Format an amount in the smallest currency unit as Rupiah with `.` grouping.
///
/// `format_rupiah(25000)` → `"Rp 25.000"`, negative amounts keep their sign
/// after the currency symbol.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
