use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod, with_query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    /// 员工可执行的下一步状态
    pub fn next(&self) -> Option<ScheduleStatus> {
        match self {
            ScheduleStatus::Assigned => Some(ScheduleStatus::InProgress),
            ScheduleStatus::InProgress => Some(ScheduleStatus::Completed),
            ScheduleStatus::Completed | ScheduleStatus::Cancelled => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Assigned => "Assigned",
            ScheduleStatus::InProgress => "In progress",
            ScheduleStatus::Completed => "Completed",
            ScheduleStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub schedule_id: i64,
    pub booking_id: i64,
    pub service_name: String,
    pub customer_name: String,
    pub address: String,
    pub start_time: NaiveDateTime,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    pub status: ScheduleStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// 员工排班，按日期区间查询
#[derive(Debug, Default, Serialize)]
pub struct ListSchedulesRequest {
    #[serde(skip)]
    pub from: Option<NaiveDate>,
    #[serde(skip)]
    pub to: Option<NaiveDate>,
}

impl ApiRequest for ListSchedulesRequest {
    type Response = Vec<Schedule>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query(
            "/employee/schedules",
            &[
                ("from", self.from.map(|d| d.to_string())),
                ("to", self.to.map(|d| d.to_string())),
            ],
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleStatusRequest {
    #[serde(skip)]
    pub schedule_id: i64,
    pub status: ScheduleStatus,
}

impl ApiRequest for UpdateScheduleStatusRequest {
    type Response = Schedule;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/employee/schedules/{}/status", self.schedule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_progression_stops_at_terminal_states() {
        assert_eq!(ScheduleStatus::Assigned.next(), Some(ScheduleStatus::InProgress));
        assert_eq!(ScheduleStatus::InProgress.next(), Some(ScheduleStatus::Completed));
        assert_eq!(ScheduleStatus::Completed.next(), None);
        assert_eq!(ScheduleStatus::Cancelled.next(), None);
    }

    #[test]
    fn range_query() {
        let req = ListSchedulesRequest {
            from: NaiveDate::from_ymd_opt(2026, 10, 19),
            to: NaiveDate::from_ymd_opt(2026, 10, 25),
        };
        assert_eq!(req.path(), "/employee/schedules?from=2026-10-19&to=2026-10-25");
    }
}
