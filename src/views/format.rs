// Display helpers for prices and countdowns
use chrono::{DateTime, Utc};

pub fn format_countdown(ends_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ends_at) = ends_at else {
        return String::from("No end date");
    };

    let remaining = ends_at - now;
    if remaining <= chrono::Duration::zero() {
        return String::from("Ended");
    }

    let minutes_total = remaining.num_minutes();
    let days = minutes_total / (24 * 60);
    let hours = (minutes_total / 60) % 24;
    let minutes = minutes_total % 60;

    if days > 0 {
        format!("{}d {}h {}m left", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m left", hours, minutes)
    } else if minutes > 0 {
        format!("{}m left", minutes)
    } else {
        String::from("<1m left")
    }
}

fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        String::from("Free")
    } else {
        format!("${:.2}", amount)
    }
}

pub fn format_price(original: Option<f64>, final_price: Option<f64>, discount: Option<u8>) -> String {
    let base = match (original, final_price) {
        (Some(o), Some(f)) if o != f => format!("{} → {}", format_amount(o), format_amount(f)),
        (_, Some(f)) => format_amount(f),
        (Some(o), None) => format_amount(o),
        (None, None) => String::from("Price unavailable"),
    };

    match discount {
        Some(d) if d > 0 => format!("{} (-{}%)", base, d),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_countdown() {
        let now = at(10, 0);
        let in_two_days = now + chrono::Duration::days(2) + chrono::Duration::hours(4) + chrono::Duration::minutes(10);

        assert_eq!(format_countdown(Some(in_two_days), now), "2d 4h 10m left");
        assert_eq!(format_countdown(Some(at(13, 5)), now), "3h 5m left");
        assert_eq!(format_countdown(Some(at(10, 45)), now), "45m left");
        assert_eq!(
            format_countdown(Some(now + chrono::Duration::seconds(20)), now),
            "<1m left"
        );
        assert_eq!(format_countdown(Some(at(9, 0)), now), "Ended");
        assert_eq!(format_countdown(Some(now), now), "Ended");
        assert_eq!(format_countdown(None, now), "No end date");
    }

    #[test]
    fn test_price() {
        assert_eq!(
            format_price(Some(19.99), Some(4.99), Some(75)),
            "$19.99 → $4.99 (-75%)"
        );
        assert_eq!(format_price(Some(29.99), Some(0.0), Some(100)), "$29.99 → Free (-100%)");
        assert_eq!(format_price(None, Some(9.5), None), "$9.50");
        assert_eq!(format_price(Some(10.0), Some(10.0), Some(0)), "$10.00");
        assert_eq!(format_price(None, None, Some(50)), "Price unavailable (-50%)");
    }
}
