//! 时间工具函数 (业务时区)
//!
//! "今天" 一律按业务时区计算 (默认 Asia/Seoul)，
//! 存储层只接收 `i64` Unix millis。

use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use shared::error::{AppError, AppResult, ErrorCode};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_field(
            ErrorCode::InvalidFormat,
            field,
            format!("Invalid date format: {} (expected YYYY-MM-DD)", date),
        )
    })
}

/// 解析时间字符串 (HH:MM)
pub fn parse_time_of_day(time: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
        AppError::invalid_field(
            ErrorCode::InvalidFormat,
            field,
            format!("Invalid time format: {} (expected HH:MM)", time),
        )
    })
}

/// 当前业务日期 (业务时区)
pub fn business_today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// 验证日期严格晚于今天 (当天订单不接收)
pub fn validate_after_today(date: NaiveDate, today: NaiveDate, field: &str) -> AppResult<()> {
    if date <= today {
        return Err(AppError::invalid_field(
            ErrorCode::DeliveryDateTooEarly,
            field,
            format!("Delivery date {} must be after {}", date, today),
        ));
    }
    Ok(())
}

/// Unix millis → "YYYY-MM-DD HH:MM" (业务时区)
pub fn format_millis(millis: i64, tz: Tz) -> String {
    match tz.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}
