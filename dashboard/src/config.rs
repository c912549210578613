use anyhow::Context;
use choroplethcore::view::AccessibilityFlags;
use choroplethcore::MapConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Optional overrides read from `dashboard.yaml` in the working directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub map: MapConfig,
    pub indicator_latency_ms: u64,
    pub large_text: bool,
    pub high_contrast: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let flags = AccessibilityFlags::default();
        Self {
            map: MapConfig::default(),
            indicator_latency_ms: 150,
            large_text: flags.large_text,
            high_contrast: flags.high_contrast,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Built-in defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn accessibility(&self) -> AccessibilityFlags {
        AccessibilityFlags::new(self.high_contrast, self.large_text)
    }

    pub fn indicator_latency(&self) -> Duration {
        Duration::from_millis(self.indicator_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choroplethcore::prelude::DEFAULT_BOUNDARY_URL;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = DashboardConfig::load_or_default("does/not/exist.yaml").unwrap();
        assert_eq!(cfg.map.boundary_url, DEFAULT_BOUNDARY_URL);
        assert_eq!(cfg.map.initial_zoom, 1.1);
        assert_eq!(cfg.accessibility(), AccessibilityFlags::new(false, true));
        assert_eq!(cfg.indicator_latency(), Duration::from_millis(150));
    }

    #[test]
    fn partial_yaml_overrides_only_given_fields() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"high_contrast: true\nmap:\n  boundary_url: http://localhost:8080/states.geojson\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = DashboardConfig::load_or_default(&path).unwrap();
        assert!(cfg.high_contrast);
        assert!(cfg.large_text);
        assert_eq!(cfg.map.boundary_url, "http://localhost:8080/states.geojson");
        assert_eq!(cfg.map.request_timeout_secs, 15);
        assert_eq!(cfg.map.projection.width, 820.0);
    }

    #[test]
    fn invalid_yaml_is_reported_with_path() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"large_text: [not, a, bool]\n").unwrap();
        let path = temp.into_temp_path();
        let err = DashboardConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing dashboard config"));
    }
}
