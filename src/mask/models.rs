use serde::Deserialize;

// storesByGeo response
#[derive(Deserialize, Clone, Debug)]
pub struct StoresByGeo {
    pub count: usize,
    pub stores: Vec<Store>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Store {
    pub name: String,
    pub addr: String,
    #[serde(rename = "type")]
    pub store_type: String,
    #[serde(default)]
    pub remain_stat: Option<RemainStat>,
    #[serde(default)]
    pub stock_at: Option<String>,
}

/// Stock level reported by the outlet.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RemainStat {
    /// 0-1
    Empty,
    /// 2-29
    Few,
    /// 30-99
    #[serde(rename = "some")]
    Moderate,
    /// 100+
    Plenty,
    /// Anything else the API starts sending (e.g. "break").
    #[serde(other)]
    Unknown,
}

impl RemainStat {
    pub fn describe(self) -> Option<&'static str> {
        match self {
            RemainStat::Empty => Some("⚫️ 1개 이하"),
            RemainStat::Few => Some("🔴 2개 ~ 29개"),
            RemainStat::Moderate => Some("🟡 30개 ~99개"),
            RemainStat::Plenty => Some("🟢 100개 이상"),
            RemainStat::Unknown => None,
        }
    }
}

/// Icon for the outlet category code.
pub fn store_type_icon(code: &str) -> &'static str {
    match code {
        "01" => "💊",
        "02" => "📮",
        "03" => "🌾",
        _ => "🏪",
    }
}
