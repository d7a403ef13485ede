//! Region resolver configuration.

use std::time::Duration;

use crate::engine::FitOptions;
use crate::location::PositionOptions;

/// Default source holding region polygons.
pub const DEFAULT_REGION_SOURCE: &str = "us_counties";

/// Default source-layer inside [`DEFAULT_REGION_SOURCE`].
pub const DEFAULT_REGION_SOURCE_LAYER: &str = "public.us_counties";

/// Default property used to name the matched region in logs and output.
pub const DEFAULT_LABEL_PROPERTY: &str = "namelsad";

/// Camera fit applied to a resolved region.
pub const DEFAULT_REGION_FIT: FitOptions = FitOptions::new(20, 12.0, Duration::from_millis(1000));

/// Which layer to match against and how to frame the result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Engine source id to query
    pub source: String,
    /// Source-layer within the source
    pub source_layer: String,
    /// Feature property naming the region
    pub label_property: String,
    /// Device position request options
    pub position_options: PositionOptions,
    /// Camera fit for a resolved region
    pub fit: FitOptions,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_REGION_SOURCE.to_string(),
            source_layer: DEFAULT_REGION_SOURCE_LAYER.to_string(),
            label_property: DEFAULT_LABEL_PROPERTY.to_string(),
            position_options: PositionOptions::default(),
            fit: DEFAULT_REGION_FIT,
        }
    }
}

impl ResolverConfig {
    /// Target a different source/source-layer pair.
    pub fn with_target(mut self, source: impl Into<String>, source_layer: impl Into<String>) -> Self {
        self.source = source.into();
        self.source_layer = source_layer.into();
        self
    }

    pub fn with_position_options(mut self, options: PositionOptions) -> Self {
        self.position_options = options;
        self
    }

    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }
}
