use chrono::NaiveDateTime;

pub fn timestamp(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

pub fn date(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%d").to_string()
}
