/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at venue scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Today's date as a `YYYY-MM-DD` string (UTC).
pub fn today_str() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Compact `YYYYMMDD` stamp for a calendar date, used in invoice numbers
/// and ticket codes.
pub fn date_stamp(date: chrono::NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_id_is_positive_and_js_safe() {
        let id = snowflake_id();
        assert!(id > 0);
        assert!(id <= 0x1F_FFFF_FFFF_FFFF); // 53 bits
    }

    #[test]
    fn test_date_stamp() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(date_stamp(d), "20240501");
    }
}
