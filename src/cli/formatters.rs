//! Number and chart formatting for shell output. Values are only rounded here.

const BAR_WIDTH: usize = 30;
const BAR_CHAR: char = '#';

/// `$1234.50`, with the sign ahead of the currency symbol.
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Horizontal bar proportional to `value / max`; empty for non-positive values.
pub fn bar(value: f64, max: f64) -> String {
    if value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH as f64).round() as usize;
    std::iter::repeat(BAR_CHAR)
        .take(cells.clamp(1, BAR_WIDTH))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_round_to_cents() {
        assert_eq!(format_amount(42.5), "$42.50");
        assert_eq!(format_amount(0.006), "$0.01");
        assert_eq!(format_amount(-3.0), "-$3.00");
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        assert_eq!(bar(10.0, 10.0).len(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).len(), BAR_WIDTH / 2);
        assert_eq!(bar(0.01, 10.0).len(), 1);
        assert!(bar(-1.0, 10.0).is_empty());
    }
}
