//! Pinterest analytics helpers
//!
//! The analytics report endpoints take a comma-separated `columns` parameter;
//! this module carries the full column list and the date formatting the
//! endpoints expect. There is no check/discover/read surface of its own.

use chrono::{DateTime, Utc};

/// Every analytics column the report endpoints accept
pub const ANALYTICS_COLUMNS: &[&str] = &[
    "AD_ACCOUNT_ID",
    "AD_ID",
    "AD_GROUP_ENTITY_STATUS",
    "AD_GROUP_ID",
    "CAMPAIGN_DAILY_SPEND_CAP",
    "CAMPAIGN_ENTITY_STATUS",
    "CAMPAIGN_ID",
    "CAMPAIGN_LIFETIME_SPEND_CAP",
    "CAMPAIGN_NAME",
    "CHECKOUT_ROAS",
    "CPC_IN_MICRO_DOLLAR",
    "CPM_IN_DOLLAR",
    "CPM_IN_MICRO_DOLLAR",
    "CTR",
    "CTR_2",
    "ECPCV_IN_DOLLAR",
    "ECPCV_P95_IN_DOLLAR",
    "ECPC_IN_DOLLAR",
    "ECPC_IN_MICRO_DOLLAR",
    "ECPE_IN_DOLLAR",
    "ECPM_IN_MICRO_DOLLAR",
    "ECPV_IN_DOLLAR",
    "ECTR",
    "EENGAGEMENT_RATE",
    "ENGAGEMENT_RATE",
    "IDEA_PIN_PRODUCT_TAG_VISIT_1",
    "IDEA_PIN_PRODUCT_TAG_VISIT_2",
    "IMPRESSION_1",
    "IMPRESSION_1_GROSS",
    "IMPRESSION_2",
    "INAPP_CHECKOUT_COST_PER_ACTION",
    "OUTBOUND_CLICK_1",
    "OUTBOUND_CLICK_2",
    "PAGE_VISIT_COST_PER_ACTION",
    "PAGE_VISIT_ROAS",
    "PAID_IMPRESSION",
    "REPIN_RATE",
    "SPEND_IN_DOLLAR",
    "SPEND_IN_MICRO_DOLLAR",
    "TOTAL_CHECKOUT",
    "TOTAL_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_CLICKTHROUGH",
    "TOTAL_CLICK_CHECKOUT",
    "TOTAL_CLICK_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_CLICK_SIGNUP",
    "TOTAL_CLICK_SIGNUP_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_CONVERSIONS",
    "TOTAL_ENGAGEMENT_CHECKOUT",
    "TOTAL_ENGAGEMENT_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_ENGAGEMENT_SIGNUP",
    "TOTAL_ENGAGEMENT_SIGNUP_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_IDEA_PIN_PRODUCT_TAG_VISIT",
    "TOTAL_IMPRESSION_FREQUENCY",
    "TOTAL_IMPRESSION_USER",
    "TOTAL_PAGE_VISIT",
    "TOTAL_REPIN_RATE",
    "TOTAL_SIGNUP",
    "TOTAL_SIGNUP_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_VIDEO_3SEC_VIEWS",
    "TOTAL_VIDEO_AVG_WATCHTIME_IN_SECOND",
    "TOTAL_VIDEO_MRC_VIEWS",
    "TOTAL_VIDEO_P0_COMBINED",
    "TOTAL_VIDEO_P100_COMPLETE",
    "TOTAL_VIDEO_P25_COMBINED",
    "TOTAL_VIDEO_P50_COMBINED",
    "TOTAL_VIDEO_P75_COMBINED",
    "TOTAL_VIDEO_P95_COMBINED",
    "TOTAL_VIEW_CHECKOUT",
    "TOTAL_VIEW_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_VIEW_SIGNUP",
    "TOTAL_VIEW_SIGNUP_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_WEB_CHECKOUT",
    "TOTAL_WEB_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_WEB_CLICK_CHECKOUT",
    "TOTAL_WEB_CLICK_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_WEB_ENGAGEMENT_CHECKOUT",
    "TOTAL_WEB_ENGAGEMENT_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "TOTAL_WEB_VIEW_CHECKOUT",
    "TOTAL_WEB_VIEW_CHECKOUT_VALUE_IN_MICRO_DOLLAR",
    "VIDEO_3SEC_VIEWS_2",
    "VIDEO_MRC_VIEWS_2",
    "VIDEO_P0_COMBINED_2",
    "VIDEO_P100_COMPLETE_2",
    "VIDEO_P25_COMBINED_2",
    "VIDEO_P50_COMBINED_2",
    "VIDEO_P75_COMBINED_2",
    "VIDEO_P95_COMBINED_2",
    "WEB_CHECKOUT_COST_PER_ACTION",
    "WEB_CHECKOUT_ROAS",
];

/// The column list as the comma-separated request parameter
pub fn analytics_columns_param() -> String {
    ANALYTICS_COLUMNS.join(",")
}

/// Format a date the way the report endpoints expect.
///
/// Output example: `2021-07-15` (`%Y-%m-%d`).
pub fn to_date_str(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_columns_complete_and_unique() {
        assert_eq!(ANALYTICS_COLUMNS.len(), 89);

        let unique: HashSet<_> = ANALYTICS_COLUMNS.iter().collect();
        assert_eq!(unique.len(), ANALYTICS_COLUMNS.len());

        assert!(ANALYTICS_COLUMNS.contains(&"AD_ACCOUNT_ID"));
        assert!(ANALYTICS_COLUMNS.contains(&"SPEND_IN_DOLLAR"));
        assert!(ANALYTICS_COLUMNS.contains(&"WEB_CHECKOUT_ROAS"));
    }

    #[test]
    fn test_columns_param_is_comma_joined() {
        let param = analytics_columns_param();
        assert!(param.starts_with("AD_ACCOUNT_ID,AD_ID,"));
        assert!(param.ends_with("WEB_CHECKOUT_COST_PER_ACTION,WEB_CHECKOUT_ROAS"));
        assert_eq!(param.matches(',').count(), ANALYTICS_COLUMNS.len() - 1);
    }

    #[test]
    fn test_to_date_str() {
        let date = DateTime::parse_from_rfc3339("2021-07-15T11:22:33Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(to_date_str(date), "2021-07-15");
    }
}
