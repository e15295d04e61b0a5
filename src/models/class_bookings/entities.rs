use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::db_enum::define_db_enum;

define_db_enum! {
    // 课程状态
    #[ts(export, export_to = "class_booking.ts")]
    ClassStatus("class status") {
        Scheduled => "SCHEDULED",
        Live => "LIVE",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

impl Default for ClassStatus {
    fn default() -> Self {
        ClassStatus::Scheduled
    }
}

// 课程预约实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class_booking.ts")]
pub struct ClassBooking {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub max_students: Option<i32>,
    pub status: ClassStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub teacher_id: i64,
}

impl ClassBooking {
    /// 给定时刻是否处于上课时间段内
    pub fn is_in_session(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time
    }
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class_booking.ts")]
pub struct Enrollment {
    pub class_id: i64,
    pub student_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_default_and_names() {
        assert_eq!(ClassStatus::default(), ClassStatus::Scheduled);
        assert_eq!("CANCELLED".parse::<ClassStatus>(), Ok(ClassStatus::Cancelled));
        assert!("POSTPONED".parse::<ClassStatus>().is_err());
    }

    #[test]
    fn test_is_in_session_is_inclusive() {
        let start = Utc::now();
        let class = ClassBooking {
            id: 1,
            title: "Algebra".into(),
            description: None,
            subject: "Math".into(),
            start_time: start,
            end_time: start + Duration::hours(1),
            meeting_link: None,
            location: None,
            max_students: None,
            status: ClassStatus::Scheduled,
            created_at: start,
            updated_at: None,
            teacher_id: 1,
        };
        assert!(class.is_in_session(start));
        assert!(class.is_in_session(start + Duration::hours(1)));
        assert!(!class.is_in_session(start - Duration::seconds(1)));
    }
}
