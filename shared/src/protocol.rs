use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Path parameters and query strings live in `path()`, the JSON body is the
/// request value itself (only when `has_body()` is true).
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// 是否附带 Bearer Token
    const REQUIRES_AUTH: bool = true;
    /// 401 时是否刷新令牌并重试一次（仅对 `REQUIRES_AUTH` 的请求生效）
    const REFRESHABLE: bool = true;

    /// The URL path relative to the API base, starting with `/`.
    fn path(&self) -> String;

    /// 是否发送 JSON 请求体
    fn has_body(&self) -> bool {
        !matches!(Self::METHOD, HttpMethod::Get | HttpMethod::Delete)
    }
}

/// 拼接查询字符串，跳过空值
///
/// 值仅做最基本的百分号转义（空格、`&`、`=`、`?`、`#`、`%`、`+`）。
pub fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(k, v)| {
            v.as_ref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| format!("{}={}", k, encode_component(v.trim())))
        })
        .collect();

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            '%' => out.push_str("%25"),
            '+' => out.push_str("%2B"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_skips_empty_values() {
        let path = with_query(
            "/customer/services",
            &[
                ("categoryId", Some("3".into())),
                ("keyword", Some("  ".into())),
                ("page", None),
            ],
        );
        assert_eq!(path, "/customer/services?categoryId=3");
    }

    #[test]
    fn query_escapes_reserved_characters() {
        let path = with_query("/s", &[("keyword", Some("deep clean & iron".into()))]);
        assert_eq!(path, "/s?keyword=deep%20clean%20%26%20iron");
    }

    #[test]
    fn bare_path_without_params() {
        assert_eq!(with_query("/customer/categories", &[]), "/customer/categories");
    }
}
