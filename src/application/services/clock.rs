//! Realtime Information - 提供给模型的当前时间信息

use chrono::{DateTime, Local, TimeZone};

/// 生成当前时间信息块
pub fn realtime_information() -> String {
    realtime_information_at(&Local::now())
}

/// 按给定时间生成时间信息块
pub fn realtime_information_at<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut data = String::from("Use This Real-time Information if needed:\n");
    data.push_str(&format!(
        "Day: {}\nDate: {}\nMonth: {}\nYear: {}\n",
        now.format("%A"),
        now.format("%d"),
        now.format("%B"),
        now.format("%Y")
    ));
    data.push_str(&format!(
        "Time: {} hours, {} minutes, {} seconds.\n",
        now.format("%H"),
        now.format("%M"),
        now.format("%S")
    ));
    data
}
