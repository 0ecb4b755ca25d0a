use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod, with_query};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 基础价格（按最小货币单位）
    pub base_price: i64,
    #[serde(default)]
    pub unit: Option<String>,
    /// 预计时长（分钟）
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Service {
    pub fn price_label(&self) -> String {
        format_price(self.base_price)
    }
}

/// 以千位分隔展示价格，如 `150000` → `150,000`
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =========================================================
// Request Definitions
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = Vec<Category>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/customer/categories".to_string()
    }
}

/// 服务列表，可按分类和关键字过滤
#[derive(Debug, Default, Serialize)]
pub struct ListServicesRequest {
    #[serde(skip)]
    pub category_id: Option<i64>,
    #[serde(skip)]
    pub keyword: Option<String>,
}

impl ApiRequest for ListServicesRequest {
    type Response = Vec<Service>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query(
            "/customer/services",
            &[
                ("categoryId", self.category_id.map(|id| id.to_string())),
                ("keyword", self.keyword.clone()),
            ],
        )
    }
}

#[derive(Debug, Serialize)]
pub struct GetServiceRequest {
    #[serde(skip)]
    pub service_id: i64,
}

impl ApiRequest for GetServiceRequest {
    type Response = Service;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/customer/services/{}", self.service_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_is_grouped() {
        assert_eq!(format_price(0), "0");
        assert_eq!(format_price(950), "950");
        assert_eq!(format_price(150000), "150,000");
        assert_eq!(format_price(-1234567), "-1,234,567");
    }

    #[test]
    fn service_list_filters() {
        let req = ListServicesRequest {
            category_id: Some(2),
            keyword: Some("sofa".into()),
        };
        assert_eq!(req.path(), "/customer/services?categoryId=2&keyword=sofa");
        assert_eq!(
            ListServicesRequest::default().path(),
            "/customer/services"
        );
    }

    #[test]
    fn service_defaults_to_active() {
        let s: Service =
            serde_json::from_str(r#"{"serviceId":1,"name":"Deep clean","basePrice":300000}"#)
                .unwrap();
        assert!(s.is_active);
        assert_eq!(s.price_label(), "300,000");
    }
}
