use std::path::{Path, PathBuf};
use serde_json::Value;
use crate::config::{package_map, resolve_project_map, AssetNamespaceMap};
use crate::directory::{copy_directory, delete_directory, is_directory};
use crate::error::{AssetsError, Result};
use crate::logger::{LogLevel, Logger};
use crate::manifest::{read_manifest, Dependency, RootManifest, MANIFEST_FILE};
use crate::status::{DeclaredAssets, InstallationStatus, NamespaceOutcome, StatusReport};

/// Resolves where the package manager installed a package.
pub trait InstallationManager {
    /// Absolute install path of the package called `package_name`.
    fn install_path(&self, package_name: &str) -> String;
}

/// Composer's layout: every package, the root one included, lives at
/// `<project>/<vendor-dir>/<name>`.
#[derive(Debug, Clone)]
pub struct VendorDirInstallationManager {
    vendor_dir: PathBuf,
}

impl VendorDirInstallationManager {
    pub fn new<P: AsRef<Path>>(project_root: P, vendor_dir: &str) -> Self {
        Self {
            vendor_dir: project_root.as_ref().join(vendor_dir),
        }
    }
}

impl InstallationManager for VendorDirInstallationManager {
    fn install_path(&self, package_name: &str) -> String {
        self.vendor_dir.join(package_name).to_string_lossy().to_string()
    }
}

/// Copies the asset directories declared by each dependency into the project.
///
/// The project map is resolved once from the root manifest when the installer is
/// built. The vendor path is resolved on first use and cached for the lifetime
/// of the installer. Every dependency processed gets an [`InstallationStatus`]
/// that survives the whole run.
pub struct AssetsInstaller<'a> {
    package: RootManifest,
    installation_manager: Box<dyn InstallationManager + 'a>,
    logger: &'a dyn Logger,
    assets_directories: AssetNamespaceMap,
    manifest_name: String,
    vendor_path: Option<String>,
    statuses: StatusReport,
}

impl<'a> AssetsInstaller<'a> {
    pub fn new(
        package: RootManifest,
        installation_manager: impl InstallationManager + 'a,
        logger: &'a dyn Logger,
    ) -> Self {
        let assets_directories = resolve_project_map(package.extra.as_ref());
        Self {
            package,
            installation_manager: Box::new(installation_manager),
            logger,
            assets_directories,
            manifest_name: MANIFEST_FILE.to_string(),
            vendor_path: None,
            statuses: StatusReport::new(),
        }
    }

    /// Reads dependency manifests from `name` instead of `composer.json`.
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    /// The project's namespace → destination map.
    pub fn assets_directories(&self) -> &AssetNamespaceMap {
        &self.assets_directories
    }

    pub fn dependencies(&self) -> Vec<Dependency> {
        self.package.dependencies()
    }

    pub fn statuses(&self) -> &StatusReport {
        &self.statuses
    }

    /// Directory under which all dependencies are installed, with a trailing separator.
    ///
    /// Derived from the root package's own install path by cutting off its name
    /// (the last occurrence) and everything after it.
    ///
    /// # Errors
    /// [`AssetsError::PathDerivation`] if the name does not occur in the install
    /// path. Nothing is cached in that case.
    pub fn vendor_path(&mut self) -> Result<String> {
        if let Some(vendor_path) = &self.vendor_path {
            return Ok(vendor_path.clone());
        }
        let install_path = self.installation_manager.install_path(&self.package.name);
        let cut = install_path
            .rfind(&self.package.name)
            .ok_or_else(|| AssetsError::PathDerivation {
                name: self.package.name.clone(),
                install_path: install_path.clone(),
            })?;
        let vendor_path = install_path[..cut].to_string();
        self.vendor_path = Some(vendor_path.clone());
        Ok(vendor_path)
    }

    /// Reads the manifest of the dependency installed as `target`.
    ///
    /// Returns `Ok(None)` if the dependency has no manifest file.
    pub fn fetch_manifest(&mut self, target: &str) -> Result<Option<Value>> {
        let path = format!("{}{}/{}", self.vendor_path()?, target, self.manifest_name);
        read_manifest(path)
    }

    /// The namespace → source map a dependency declares, if any.
    pub fn package_assets(&mut self, dependency: &Dependency) -> Result<Option<AssetNamespaceMap>> {
        Ok(self
            .fetch_manifest(&dependency.target)?
            .as_ref()
            .and_then(package_map))
    }

    /// Where the `relative` asset directory of `target` lives.
    pub fn source_path(&mut self, target: &str, relative: &str) -> Result<String> {
        Ok(format!("{}{}/{}", self.vendor_path()?, target, relative))
    }

    /// Where `target`'s assets for `namespace` are copied to, or `None` if the
    /// project does not define that namespace.
    pub fn destination_path(&mut self, target: &str, namespace: &str) -> Result<Option<String>> {
        let vendor_path = self.vendor_path()?;
        Ok(self
            .assets_directories
            .get(namespace)
            .map(|dir| format!("{vendor_path}../{dir}{target}")))
    }

    /// Installs the assets of every declared dependency, in manifest order.
    ///
    /// Problems with a single dependency or namespace are logged and recorded in
    /// its status; only a vendor path that cannot be derived aborts the run.
    pub fn install(&mut self) -> Result<&StatusReport> {
        let dependencies = self.package.dependencies();
        for dependency in &dependencies {
            self.statuses
                .insert(dependency.target.clone(), InstallationStatus::default());
        }
        for dependency in &dependencies {
            self.install_package(dependency)?;
        }
        Ok(&self.statuses)
    }

    /// Installs every asset directory declared by `dependency`.
    pub fn install_package(&mut self, dependency: &Dependency) -> Result<()> {
        let target = dependency.target.as_str();
        let assets = match self.package_assets(dependency) {
            Ok(assets) => assets,
            Err(e @ AssetsError::PathDerivation { .. }) => return Err(e),
            Err(e) => {
                self.log(target, LogLevel::Error, &format!("Could not read manifest : {e}"));
                None
            }
        };

        let Some(assets) = assets else {
            self.status_mut(target).declared = DeclaredAssets::None;
            self.log(target, LogLevel::Info, "No assets to install");
            return Ok(());
        };

        self.log(target, LogLevel::Info, "Installation in progress...");
        self.status_mut(target).declared = DeclaredAssets::Declared;
        for (namespace, relative) in assets.iter() {
            self.install_package_dir(dependency, namespace, relative)?;
        }
        Ok(())
    }

    /// Replaces the project's copy of one asset directory of `dependency`.
    ///
    /// The destination is deleted before copying, so files removed upstream do
    /// not linger. A failure halfway through leaves the destination as it is.
    pub fn install_package_dir(
        &mut self,
        dependency: &Dependency,
        namespace: &str,
        relative: &str,
    ) -> Result<()> {
        let target = dependency.target.as_str();
        self.log(target, LogLevel::Info, &format!("Installing assets : \"{namespace}\"..."));

        let Some(destination) = self.destination_path(target, namespace)? else {
            self.log(
                target,
                LogLevel::Warning,
                &format!("Assets directory not set in {} : \"{namespace}\"", self.manifest_name),
            );
            self.status_mut(target).record(namespace, NamespaceOutcome::Failed);
            return Ok(());
        };
        self.log(target, LogLevel::Info, &format!("Assets directory matches : \"{namespace}\""));

        let source = self.source_path(target, relative)?;
        if !is_directory(&source) {
            self.log(target, LogLevel::Error, &format!("Directory not found : \"{source}\""));
            self.status_mut(target).record(namespace, NamespaceOutcome::Failed);
            return Ok(());
        }
        self.log(target, LogLevel::Info, &format!("Directory found : \"{source}\""));

        match replace_directory(&source, &destination) {
            Ok(()) => {
                self.log(target, LogLevel::Info, &format!("Directory installed : \"{destination}\""));
                self.status_mut(target).record(namespace, NamespaceOutcome::Installed);
            }
            Err(e) => {
                self.log(
                    target,
                    LogLevel::Error,
                    &format!("Could not install \"{namespace}\" : {e}"),
                );
                self.status_mut(target).record(namespace, NamespaceOutcome::Failed);
            }
        }
        Ok(())
    }

    fn status_mut(&mut self, target: &str) -> &mut InstallationStatus {
        self.statuses.entry(target.to_string()).or_default()
    }

    fn log(&self, target: &str, level: LogLevel, message: &str) {
        self.logger.log(level, &format!("{target} : {message}"));
    }
}

fn replace_directory(source: &str, destination: &str) -> Result<()> {
    delete_directory(destination)?;
    copy_directory(source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use serde_json::json;
    use tempfile::tempdir;
    use crate::logger::MemoryLogger;

    struct FixedInstallationManager<'c> {
        path: String,
        calls: &'c Cell<usize>,
    }

    impl InstallationManager for FixedInstallationManager<'_> {
        fn install_path(&self, _package_name: &str) -> String {
            self.calls.set(self.calls.get() + 1);
            self.path.clone()
        }
    }

    fn root_manifest(extra: Value) -> RootManifest {
        let mut manifest = RootManifest::new("default/package");
        manifest.extra = Some(extra);
        manifest
    }

    #[test]
    fn test_vendor_path_strips_package_name() {
        let calls = Cell::new(0);
        let logger = MemoryLogger::new();
        let manager = FixedInstallationManager { path: "/tmp/default/package".to_string(), calls: &calls };
        let mut installer = AssetsInstaller::new(RootManifest::new("default/package"), manager, &logger);

        assert_eq!(installer.vendor_path().unwrap(), "/tmp/");
        assert_eq!(installer.vendor_path().unwrap(), "/tmp/");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_vendor_path_uses_last_occurrence() {
        let calls = Cell::new(0);
        let logger = MemoryLogger::new();
        let manager = FixedInstallationManager {
            path: "/home/acme/site/vendor/acme/site".to_string(),
            calls: &calls,
        };
        let mut installer = AssetsInstaller::new(RootManifest::new("acme/site"), manager, &logger);
        assert_eq!(installer.vendor_path().unwrap(), "/home/acme/site/vendor/");
    }

    #[test]
    fn test_vendor_path_derivation_error_is_not_cached() {
        let calls = Cell::new(0);
        let logger = MemoryLogger::new();
        let manager = FixedInstallationManager { path: "/srv/elsewhere".to_string(), calls: &calls };
        let mut installer = AssetsInstaller::new(RootManifest::new("default/package"), manager, &logger);

        assert!(matches!(installer.vendor_path(), Err(AssetsError::PathDerivation { .. })));
        assert!(matches!(installer.vendor_path(), Err(AssetsError::PathDerivation { .. })));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_source_and_destination_paths() {
        let calls = Cell::new(0);
        let logger = MemoryLogger::new();
        let mut manifest = root_manifest(json!({"assets-dir": {"public": "assets/"}}));
        manifest.name = "acme/site".to_string();
        let manager = FixedInstallationManager { path: "/proj/vendor/acme/site".to_string(), calls: &calls };
        let mut installer = AssetsInstaller::new(manifest, manager, &logger);

        assert_eq!(installer.source_path("acme/widgets", "web").unwrap(), "/proj/vendor/acme/widgets/web");
        assert_eq!(
            installer.destination_path("acme/widgets", "public").unwrap().as_deref(),
            Some("/proj/vendor/../assets/acme/widgets")
        );
        assert_eq!(installer.destination_path("acme/widgets", "js").unwrap(), None);
    }

    #[test]
    fn test_assets_directories_resolved_at_construction() {
        let calls = Cell::new(0);
        let logger = MemoryLogger::new();
        let manager = FixedInstallationManager { path: "/tmp/default/package".to_string(), calls: &calls };
        let installer = AssetsInstaller::new(root_manifest(json!({"assets-dir": "customdir"})), manager, &logger);

        assert_eq!(installer.assets_directories(), &AssetNamespaceMap::public("customdir"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unmatched_namespace_fails_without_touching_disk() {
        let dir = tempdir().unwrap();
        let vendor = dir.path().join("vendor");
        fs::create_dir_all(vendor.join("acme/widgets/css")).unwrap();
        let logger = MemoryLogger::new();
        let mut installer = AssetsInstaller::new(
            root_manifest(json!({"assets-dir": {"js": "public/js/"}})),
            VendorDirInstallationManager::new(dir.path(), "vendor"),
            &logger,
        );

        let dependency = Dependency::new("acme/widgets", "*");
        installer.install_package_dir(&dependency, "css", "css").unwrap();

        let status = &installer.statuses()["acme/widgets"];
        assert_eq!(status.outcome("css"), Some(NamespaceOutcome::Failed));
        assert_eq!(
            logger.messages(LogLevel::Warning),
            vec!["acme/widgets : Assets directory not set in composer.json : \"css\""]
        );
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_missing_source_directory_fails() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor/acme/widgets")).unwrap();
        let logger = MemoryLogger::new();
        let mut installer = AssetsInstaller::new(
            RootManifest::new("acme/site"),
            VendorDirInstallationManager::new(dir.path(), "vendor"),
            &logger,
        );

        let dependency = Dependency::new("acme/widgets", "*");
        installer.install_package_dir(&dependency, "public", "web").unwrap();

        assert_eq!(installer.statuses()["acme/widgets"].outcome("public"), Some(NamespaceOutcome::Failed));
        assert_eq!(logger.messages(LogLevel::Error).len(), 1);
        assert!(!dir.path().join("public/assets").exists());
    }

    #[test]
    fn test_install_package_without_manifest_declares_nothing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor/acme/plain")).unwrap();
        let logger = MemoryLogger::new();
        let mut installer = AssetsInstaller::new(
            RootManifest::new("acme/site"),
            VendorDirInstallationManager::new(dir.path(), "vendor"),
            &logger,
        );

        installer.install_package(&Dependency::new("acme/plain", "*")).unwrap();

        let status = &installer.statuses()["acme/plain"];
        assert_eq!(status.declared, DeclaredAssets::None);
        assert!(status.namespaces.is_empty());
        assert_eq!(logger.messages(LogLevel::Info), vec!["acme/plain : No assets to install"]);
    }

    #[test]
    fn test_install_package_with_broken_manifest_is_logged() {
        let dir = tempdir().unwrap();
        let package_dir = dir.path().join("vendor/acme/broken");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(package_dir.join("composer.json"), "{").unwrap();
        let logger = MemoryLogger::new();
        let mut installer = AssetsInstaller::new(
            RootManifest::new("acme/site"),
            VendorDirInstallationManager::new(dir.path(), "vendor"),
            &logger,
        );

        installer.install_package(&Dependency::new("acme/broken", "*")).unwrap();

        assert_eq!(installer.statuses()["acme/broken"].declared, DeclaredAssets::None);
        assert_eq!(logger.messages(LogLevel::Error).len(), 1);
    }

    #[test]
    fn test_custom_manifest_name() {
        let dir = tempdir().unwrap();
        let package_dir = dir.path().join("vendor/acme/widgets");
        fs::create_dir_all(package_dir.join("web")).unwrap();
        fs::write(package_dir.join("web/app.js"), "1").unwrap();
        fs::write(package_dir.join("package.json"), r#"{"extra": {"assets-dir": "web"}}"#).unwrap();
        let logger = MemoryLogger::new();
        let mut installer = AssetsInstaller::new(
            RootManifest::new("acme/site"),
            VendorDirInstallationManager::new(dir.path(), "vendor"),
            &logger,
        )
        .with_manifest_name("package.json");

        installer.install_package(&Dependency::new("acme/widgets", "*")).unwrap();

        assert_eq!(installer.statuses()["acme/widgets"].outcome("public"), Some(NamespaceOutcome::Installed));
        assert!(dir.path().join("public/assets/acme/widgets/app.js").exists());
    }

    #[test]
    fn test_unmatched_namespace_warning_names_custom_manifest() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor/acme/widgets/css")).unwrap();
        let logger = MemoryLogger::new();
        let mut installer = AssetsInstaller::new(
            RootManifest::new("acme/site"),
            VendorDirInstallationManager::new(dir.path(), "vendor"),
            &logger,
        )
        .with_manifest_name("package.json");

        installer
            .install_package_dir(&Dependency::new("acme/widgets", "*"), "css", "css")
            .unwrap();

        assert_eq!(
            logger.messages(LogLevel::Warning),
            vec!["acme/widgets : Assets directory not set in package.json : \"css\""]
        );
    }
}
