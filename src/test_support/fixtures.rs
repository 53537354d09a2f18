//! Test fixtures for common test scenarios.
//!
//! Builds a fake script directory on disk: installer sources, license files
//! and the per-architecture object directories the WDK build would leave.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::arch::{Architecture, BuildType, SubProject};
use crate::core::config::{BuildConfiguration, ReleaseArgs};
use crate::util::config::Settings;
use crate::util::env::ToolEnvironment;

/// A temporary script directory plus a separate output directory.
pub struct ScriptDirFixture {
    pub tmp: TempDir,
}

impl ScriptDirFixture {
    /// Create a script directory with installer sources and license files.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let fixture = ScriptDirFixture { tmp };

        let installer = fixture.script_dir().join("installer");
        fs::create_dir_all(&installer).expect("failed to create installer dir");
        fs::write(installer.join("hone.iss"), "; installer script\n").expect("write hone.iss");
        fs::write(installer.join("AdminCmd.js"), "// admin helper\n").expect("write AdminCmd.js");
        let script_dir = fixture.script_dir();
        fs::write(script_dir.join("License.txt"), "license\n").expect("write License.txt");
        fs::write(script_dir.join("Readme.html"), "<html></html>\n").expect("write Readme.html");
        fixture
    }

    pub fn script_dir(&self) -> PathBuf {
        self.tmp.path().join("scripts")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.tmp.path().join("out")
    }

    /// Place files in a sub-project's object directory for one architecture.
    pub fn add_build_output(
        &self,
        build_type: BuildType,
        arch: Architecture,
        project: SubProject,
        files: &[&str],
    ) -> PathBuf {
        let dir = arch.output_dir(&self.script_dir(), build_type, project);
        fs::create_dir_all(&dir).expect("failed to create object dir");
        for name in files {
            fs::write(dir.join(name), format!("{} {}", arch.tag(), name))
                .expect("write build output");
        }
        dir
    }

    /// Typical output of a successful release build for every architecture.
    pub fn add_full_build_output(&self, build_type: BuildType) {
        for arch in Architecture::ALL {
            self.add_build_output(
                build_type,
                arch,
                SubProject::Sensor,
                &["hone.sys", "hone.pdb", "vc90.pdb"],
            );
            self.add_build_output(
                build_type,
                arch,
                SubProject::Utility,
                &["honeutil.exe", "honeutil.pdb", "vc90.pdb"],
            );
        }
    }

    /// A certificate file inside the fixture.
    pub fn certificate(&self) -> PathBuf {
        let cert = self.tmp.path().join("certs").join("hone.pfx");
        fs::create_dir_all(cert.parent().unwrap()).expect("create certs dir");
        fs::write(&cert, "cert").expect("write certificate");
        cert
    }

    /// Installer compiler placed under a fake Program Files directory.
    pub fn environment(&self) -> ToolEnvironment {
        let program_files = self.tmp.path().join("Program Files");
        let iscc = program_files.join("Inno Setup 5").join("iscc.exe");
        fs::create_dir_all(iscc.parent().unwrap()).expect("create Inno Setup dir");
        fs::write(&iscc, "").expect("write iscc.exe");
        ToolEnvironment {
            program_files: vec![program_files],
            wdk_path: Some(self.tmp.path().join("wdk")),
            installer_compiler_on_path: None,
        }
    }

    /// Raw arguments pointing at this fixture.
    pub fn args(&self, stage: &str, version: &str) -> ReleaseArgs {
        ReleaseArgs {
            stage: stage.to_string(),
            version: Some(version.to_string()),
            output: Some(self.output_dir()),
            script_dir: self.script_dir(),
            ..Default::default()
        }
    }

    /// Validate arguments against this fixture's environment.
    pub fn config(&self, args: &ReleaseArgs) -> BuildConfiguration {
        BuildConfiguration::validate(args, &self.environment(), Settings::default())
            .expect("fixture configuration is valid")
    }
}

impl Default for ScriptDirFixture {
    fn default() -> Self {
        ScriptDirFixture::new()
    }
}

/// Sorted file names directly inside `dir` (empty if it doesn't exist).
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
