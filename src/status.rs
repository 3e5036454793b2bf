use indexmap::IndexMap;
use serde::Serialize;

/// Whether a dependency's manifest declares any assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredAssets {
    /// The dependency has not been processed yet.
    #[default]
    Unevaluated,
    /// No manifest, or no `extra.assets-dir` in it.
    None,
    Declared,
}

/// Terminal outcome of one (dependency, namespace) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceOutcome {
    Installed,
    Failed,
}

/// What happened to a single dependency during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallationStatus {
    pub declared: DeclaredAssets,
    /// Outcomes keyed by namespace, in the order the dependency declared them.
    pub namespaces: IndexMap<String, NamespaceOutcome>,
}

impl InstallationStatus {
    pub fn outcome(&self, namespace: &str) -> Option<NamespaceOutcome> {
        self.namespaces.get(namespace).copied()
    }

    pub(crate) fn record(&mut self, namespace: &str, outcome: NamespaceOutcome) {
        self.namespaces.insert(namespace.to_string(), outcome);
    }
}

/// Per-dependency statuses of a run, keyed by target and kept in processing order.
pub type StatusReport = IndexMap<String, InstallationStatus>;

/// Counts the namespaces of a report that ended with `outcome`.
pub fn count_outcomes(report: &StatusReport, outcome: NamespaceOutcome) -> usize {
    report
        .values()
        .flat_map(|status| status.namespaces.values())
        .filter(|o| **o == outcome)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_status_is_unevaluated() {
        let status = InstallationStatus::default();
        assert_eq!(status.declared, DeclaredAssets::Unevaluated);
        assert!(status.namespaces.is_empty());
    }

    #[test]
    fn test_count_outcomes() {
        let mut report = StatusReport::new();
        let mut a = InstallationStatus { declared: DeclaredAssets::Declared, ..Default::default() };
        a.record("js", NamespaceOutcome::Installed);
        a.record("css", NamespaceOutcome::Failed);
        let mut b = InstallationStatus { declared: DeclaredAssets::Declared, ..Default::default() };
        b.record("public", NamespaceOutcome::Installed);
        report.insert("acme/a".to_string(), a);
        report.insert("acme/b".to_string(), b);

        assert_eq!(count_outcomes(&report, NamespaceOutcome::Installed), 2);
        assert_eq!(count_outcomes(&report, NamespaceOutcome::Failed), 1);
    }

    #[test]
    fn test_report_serializes_lowercase() {
        let mut status = InstallationStatus { declared: DeclaredAssets::Declared, ..Default::default() };
        status.record("public", NamespaceOutcome::Installed);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["declared"], "declared");
        assert_eq!(json["namespaces"]["public"], "installed");
    }
}
