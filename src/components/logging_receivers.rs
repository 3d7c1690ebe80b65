//! Logging receivers

use crate::model::{ConfigComponent, LoggingReceiver};
use crate::tracking::{Field, Shape, Trackable};
use serde::{Deserialize, Serialize};

/// Tails local files matching glob patterns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    pub include_paths: Vec<String>,
    /// `Some(vec![])` is an explicit empty list and is still reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_refresh_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_log_file_path: Option<bool>,
    /// Set only by the transformation test harness
    #[serde(skip)]
    pub transformation_test: bool,
}

impl_component!(FilesReceiver, "files", [LoggingReceiver]);

impl Trackable for FilesReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("include_paths", &self.include_paths),
            Field::named("exclude_paths", &self.exclude_paths),
            Field::named("wildcard_refresh_interval", &self.wildcard_refresh_interval),
            Field::named("record_log_file_path", &self.record_log_file_path),
            Field::named("transformation_test", &self.transformation_test).excluded(),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyslogReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(default)]
    pub transport_protocol: String,
    pub listen_host: String,
    pub listen_port: u16,
}

impl_component!(SyslogReceiver, "syslog", [LoggingReceiver]);

impl Trackable for SyslogReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("transport_protocol", &self.transport_protocol),
            Field::named("listen_host", &self.listen_host),
            Field::named("listen_port", &self.listen_port),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TcpReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    pub format: String,
    #[serde(default)]
    pub listen_host: String,
    #[serde(default)]
    pub listen_port: u16,
}

impl_component!(TcpReceiver, "tcp", [LoggingReceiver]);

impl Trackable for TcpReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("format", &self.format),
            Field::named("listen_host", &self.listen_host),
            Field::named("listen_port", &self.listen_port),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluentForwardReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(default)]
    pub listen_host: String,
    #[serde(default)]
    pub listen_port: u16,
}

impl_component!(FluentForwardReceiver, "fluent_forward", [LoggingReceiver]);

impl Trackable for FluentForwardReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("listen_host", &self.listen_host),
            Field::named("listen_port", &self.listen_port),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowsEventLogReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    pub channels: Vec<String>,
    /// `1` or `2`
    #[serde(default)]
    pub receiver_version: String,
    #[serde(default)]
    pub render_as_xml: bool,
}

impl_component!(WindowsEventLogReceiver, "windows_event_log", [LoggingReceiver]);

impl Trackable for WindowsEventLogReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("channels", &self.channels),
            Field::named("receiver_version", &self.receiver_version).tracked(),
            Field::named("render_as_xml", &self.render_as_xml).tracked(),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemdJournaldReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
}

impl_component!(SystemdJournaldReceiver, "systemd_journald", [LoggingReceiver]);

impl Trackable for SystemdJournaldReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![Field::inline(&self.config)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;
    use crate::tracking::{walk_component, FeatureRecord};

    fn records<T: Trackable>(component: &T) -> Vec<(String, String)> {
        let template = FeatureRecord::template("logging", "receivers", "test").child("[0]");
        walk_component(component, &template)
            .unwrap()
            .into_iter()
            .map(|r| (r.joined_key(), r.value))
            .collect()
    }

    #[test]
    fn test_files_receiver_from_yaml() {
        let yaml = r#"
type: files
include_paths: [/var/log/app/*.log, /var/log/other.log]
record_log_file_path: true
"#;
        let receiver: FilesReceiver = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(receiver.config.component_type, "files");
        assert_eq!(receiver.include_paths.len(), 2);

        assert_eq!(
            records(&receiver),
            vec![
                ("[0].enabled".to_string(), "true".to_string()),
                ("[0].include_paths.__length".to_string(), "2".to_string()),
                ("[0].record_log_file_path".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_files_receiver_explicit_empty_exclude_paths() {
        let yaml = "type: files\ninclude_paths: [/var/log/app.log]\nexclude_paths: []\n";
        let receiver: FilesReceiver = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(receiver.exclude_paths, Some(Vec::new()));
        assert!(records(&receiver).contains(&(
            "[0].exclude_paths.__length".to_string(),
            "0".to_string()
        )));

        let yaml = "type: files\ninclude_paths: [/var/log/app.log]\n";
        let receiver: FilesReceiver = serde_yaml::from_str(yaml).unwrap();
        assert!(receiver.exclude_paths.is_none());
        assert!(!records(&receiver)
            .iter()
            .any(|(key, _)| key.starts_with("[0].exclude_paths")));
    }

    #[test]
    fn test_files_receiver_explicit_false() {
        let receiver = FilesReceiver {
            include_paths: vec!["/var/log/*.log".into()],
            record_log_file_path: Some(false),
            ..FilesReceiver::new()
        };
        assert!(records(&receiver).contains(&(
            "[0].record_log_file_path".to_string(),
            "false".to_string()
        )));
    }

    #[test]
    fn test_transformation_test_flag_never_reported() {
        let receiver = FilesReceiver {
            transformation_test: true,
            ..FilesReceiver::new()
        };
        assert_eq!(records(&receiver), vec![("[0].enabled".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_syslog_reports_no_literals() {
        let receiver = SyslogReceiver {
            transport_protocol: "tcp".into(),
            listen_host: "10.0.0.1".into(),
            listen_port: 5140,
            ..SyslogReceiver::new()
        };
        assert_eq!(records(&receiver), vec![("[0].enabled".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_windows_event_log_tracked_fields() {
        let receiver = WindowsEventLogReceiver {
            channels: vec!["System".into(), "Application".into()],
            receiver_version: "2".into(),
            render_as_xml: true,
            ..WindowsEventLogReceiver::new()
        };
        assert_eq!(
            records(&receiver),
            vec![
                ("[0].enabled".to_string(), "true".to_string()),
                ("[0].channels.__length".to_string(), "2".to_string()),
                ("[0].receiver_version".to_string(), "2".to_string()),
                ("[0].render_as_xml".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_component_types() {
        assert_eq!(FilesReceiver::new().component_type(), "files");
        assert_eq!(TcpReceiver::new().component_type(), TcpReceiver::TYPE);
        assert_eq!(FluentForwardReceiver::new().config.component_type, "fluent_forward");
        assert_eq!(SystemdJournaldReceiver::new().component_type(), "systemd_journald");
    }
}
