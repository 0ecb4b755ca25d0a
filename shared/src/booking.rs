use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod, with_query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    /// 只有尚未开始的预约可以取消
    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::InProgress => "In progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    #[serde(default)]
    pub booking_code: Option<String>,
    pub service_id: i64,
    pub service_name: String,
    pub booking_time: NaiveDateTime,
    pub address: String,
    pub status: BookingStatus,
    pub total_amount: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Booking {
    pub fn reference(&self) -> String {
        self.booking_code
            .clone()
            .unwrap_or_else(|| format!("#{}", self.booking_id))
    }
}

// =========================================================
// Request Definitions
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_id: i64,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub address: String,
    pub contact_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ApiRequest for CreateBookingRequest {
    type Response = Booking;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/customer/bookings".to_string()
    }
}

/// 预约历史，可按状态过滤
#[derive(Debug, Default, Serialize)]
pub struct ListBookingsRequest {
    #[serde(skip)]
    pub status: Option<BookingStatus>,
}

impl ApiRequest for ListBookingsRequest {
    type Response = Vec<Booking>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query(
            "/customer/bookings",
            &[("status", self.status.map(|s| s.as_str().to_string()))],
        )
    }
}

#[derive(Debug, Serialize)]
pub struct GetBookingRequest {
    #[serde(skip)]
    pub booking_id: i64,
}

impl ApiRequest for GetBookingRequest {
    type Response = Booking;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/customer/bookings/{}", self.booking_id)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    #[serde(skip)]
    pub booking_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiRequest for CancelBookingRequest {
    type Response = Booking;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/customer/bookings/{}/cancel", self.booking_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unstarted_bookings_cancel() {
        assert!(BookingStatus::Pending.is_cancellable());
        assert!(BookingStatus::Confirmed.is_cancellable());
        assert!(!BookingStatus::InProgress.is_cancellable());
        assert!(!BookingStatus::Completed.is_cancellable());
        assert!(!BookingStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn booking_wire_format() {
        let b: Booking = serde_json::from_str(
            r#"{"bookingId":7,"serviceId":1,"serviceName":"Deep clean",
                "bookingTime":"2026-11-02T09:30:00","address":"12 Le Loi",
                "status":"IN_PROGRESS","totalAmount":300000}"#,
        )
        .unwrap();
        assert_eq!(b.status, BookingStatus::InProgress);
        assert_eq!(b.reference(), "#7");
    }

    #[test]
    fn create_request_serializes_dates() {
        let req = CreateBookingRequest {
            service_id: 3,
            booking_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            address: "12 Le Loi".into(),
            contact_phone: "0901234567".into(),
            note: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["bookingDate"], "2026-11-02");
        assert_eq!(json["startTime"], "09:30:00");
        assert!(json.get("note").is_none());
    }

    #[test]
    fn paths() {
        let list = ListBookingsRequest {
            status: Some(BookingStatus::Cancelled),
        };
        assert_eq!(list.path(), "/customer/bookings?status=CANCELLED");
        let cancel = CancelBookingRequest {
            booking_id: 5,
            reason: None,
        };
        assert_eq!(cancel.path(), "/customer/bookings/5/cancel");
        assert!(cancel.has_body());
        assert_eq!(BookingStatus::parse("pending"), Some(BookingStatus::Pending));
    }
}
