//! Tier to feature matrix.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::domain::entities::tier::Tier;

/// A gated product capability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    BasicAnalyticsView,
    AdvancedAnalytics,
    RealTimeAnalytics,
    ContentPreview,
    ContentCreation,
    ContentEditing,
    AiContentGeneration,
    LimitedReports,
    StandardReports,
    AdvancedReports,
    ExportCsv,
    ExportPdf,
    CustomReports,
    ApiAccess,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Feature::BasicAnalyticsView => "Basic Analytics",
            Feature::AdvancedAnalytics => "Advanced Analytics",
            Feature::RealTimeAnalytics => "Real-time Analytics",
            Feature::ContentPreview => "Content Preview",
            Feature::ContentCreation => "Content Creation",
            Feature::ContentEditing => "Advanced Editing",
            Feature::AiContentGeneration => "AI Content Generation",
            Feature::LimitedReports => "Limited Reports",
            Feature::StandardReports => "Standard Reports",
            Feature::AdvancedReports => "Advanced Reports",
            Feature::ExportCsv => "CSV Export",
            Feature::ExportPdf => "PDF Export",
            Feature::CustomReports => "Custom Reports",
            Feature::ApiAccess => "API Access",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::BasicAnalyticsView => "View basic traffic and usage statistics",
            Feature::AdvancedAnalytics => "Detailed metrics, trends, and insights",
            Feature::RealTimeAnalytics => "Live data updates and monitoring",
            Feature::ContentPreview => "Preview content before publishing",
            Feature::ContentCreation => "Create and save content",
            Feature::ContentEditing => "Full content editing capabilities",
            Feature::AiContentGeneration => "Generate content using AI",
            Feature::LimitedReports => "Basic report viewing (last 7 days)",
            Feature::StandardReports => "Monthly reports with basic metrics",
            Feature::AdvancedReports => "Custom date ranges and detailed metrics",
            Feature::ExportCsv => "Export data to CSV format",
            Feature::ExportPdf => "Export reports to PDF",
            Feature::CustomReports => "Build custom reports with filters",
            Feature::ApiAccess => "Programmatic access to your data",
        }
    }

    /// Cheapest tier that includes this feature.
    pub fn required_tier(&self) -> Tier {
        Tier::all()
            .iter()
            .copied()
            .find(|tier| features_for(*tier).contains(self))
            .unwrap_or(Tier::Premium)
    }
}

const FREE_FEATURES: &[Feature] = &[
    Feature::BasicAnalyticsView,
    Feature::ContentPreview,
    Feature::LimitedReports,
];

// Basic replaces limited reports with standard reports.
const BASIC_FEATURES: &[Feature] = &[
    Feature::BasicAnalyticsView,
    Feature::AdvancedAnalytics,
    Feature::ContentPreview,
    Feature::ContentCreation,
    Feature::StandardReports,
    Feature::ExportCsv,
];

const PREMIUM_FEATURES: &[Feature] = &[
    Feature::BasicAnalyticsView,
    Feature::AdvancedAnalytics,
    Feature::RealTimeAnalytics,
    Feature::ContentPreview,
    Feature::ContentCreation,
    Feature::ContentEditing,
    Feature::AiContentGeneration,
    Feature::StandardReports,
    Feature::AdvancedReports,
    Feature::ExportCsv,
    Feature::ExportPdf,
    Feature::CustomReports,
    Feature::ApiAccess,
];

pub fn features_for(tier: Tier) -> &'static [Feature] {
    match tier {
        Tier::Free => FREE_FEATURES,
        Tier::Basic => BASIC_FEATURES,
        Tier::Premium => PREMIUM_FEATURES,
    }
}

pub fn has_feature_access(tier: Tier, feature: Feature) -> bool {
    features_for(tier).contains(&feature)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAccess {
    pub id: Feature,
    pub name: &'static str,
    pub description: &'static str,
    pub available: bool,
    pub required_tier: Tier,
}

/// Every known feature, flagged with whether `tier` unlocks it.
pub fn features_with_access(tier: Tier) -> Vec<FeatureAccess> {
    Feature::iter()
        .map(|feature| FeatureAccess {
            id: feature,
            name: feature.name(),
            description: feature.description(),
            available: has_feature_access(tier, feature),
            required_tier: feature.required_tier(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TierSummary {
    pub tier: Tier,
    pub name: &'static str,
    pub price_cents: i64,
    pub features: &'static [Feature],
}

pub fn tier_comparison() -> Vec<TierSummary> {
    Tier::all()
        .iter()
        .map(|tier| TierSummary {
            tier: *tier,
            name: tier.display_name(),
            price_cents: tier.price_cents(),
            features: features_for(*tier),
        })
        .collect()
}
