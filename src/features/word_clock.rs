use chrono::{NaiveTime, Timelike};

const CARDINALS: [&str; 13] = [
    "twelve", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve",
];

fn hour_word(hour: u32) -> &'static str {
    CARDINALS[(hour % 12) as usize]
}

fn minute_word(minutes: u32) -> &'static str {
    match minutes {
        5 => "five",
        10 => "ten",
        20 => "twenty",
        25 => "twenty-five",
        _ => "",
    }
}

fn period(hour: u32) -> &'static str {
    match hour {
        0..=11 => "in the morning",
        12..=16 => "in the afternoon",
        17..=20 => "in the evening",
        _ => "at night",
    }
}

/// Spell a time of day in words, rounded to the nearest five minutes.
///
/// `phrase(6, 30)` is "It's half past six in the morning".
pub fn phrase(hour: u32, minute: u32) -> String {
    let hour = hour % 24;
    let rounded = (minute % 60 + 2) / 5 * 5;
    let next = hour + 1;

    let body = match rounded {
        0 => format!("{} o'clock", hour_word(hour)),
        60 => format!("{} o'clock", hour_word(next)),
        15 => format!("quarter past {}", hour_word(hour)),
        30 => format!("half past {}", hour_word(hour)),
        45 => format!("quarter to {}", hour_word(next)),
        m if m < 30 => format!("{} past {}", minute_word(m), hour_word(hour)),
        m => format!("{} to {}", minute_word(60 - m), hour_word(next)),
    };
    format!("It's {} {}", body, period(hour))
}

pub fn phrase_for(time: NaiveTime) -> String {
    phrase(time.hour(), time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_quarters() {
        assert_eq!(phrase(6, 30), "It's half past six in the morning");
        assert_eq!(phrase(11, 45), "It's quarter to twelve in the morning");
        assert_eq!(phrase(14, 15), "It's quarter past two in the afternoon");
        assert_eq!(phrase(0, 0), "It's twelve o'clock in the morning");
        assert_eq!(phrase(12, 0), "It's twelve o'clock in the afternoon");
    }

    #[test]
    fn past_and_to() {
        assert_eq!(phrase(9, 5), "It's five past nine in the morning");
        assert_eq!(phrase(18, 25), "It's twenty-five past six in the evening");
        assert_eq!(phrase(18, 35), "It's twenty-five to seven in the evening");
        assert_eq!(phrase(22, 50), "It's ten to eleven at night");
        assert_eq!(phrase(23, 40), "It's twenty to twelve at night");
    }

    #[test]
    fn rounds_to_nearest_five() {
        assert_eq!(phrase(7, 2), "It's seven o'clock in the morning");
        assert_eq!(phrase(7, 3), "It's five past seven in the morning");
        assert_eq!(phrase(7, 28), "It's half past seven in the morning");
        assert_eq!(phrase(7, 58), "It's eight o'clock in the morning");
        assert_eq!(phrase(23, 59), "It's twelve o'clock at night");
    }

    #[test]
    fn is_pure() {
        let t = NaiveTime::from_hms_opt(16, 44, 59).unwrap();
        assert_eq!(phrase_for(t), phrase_for(t));
        assert_eq!(phrase_for(t), "It's quarter to five in the afternoon");
    }
}
